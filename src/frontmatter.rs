//! Document metadata header.
//!
//! Exported minutes start with a small header naming the meeting, its start
//! time and the recording:
//!
//! ```text
//! ---
//! title: "Board Meeting"
//! recording_start_time: "2024-05-01T18:30"
//! recording_url: "https://video.test/watch?v=abc"
//! ---
//!
//! [18:42:15](https://video.test/watch?t=735) Roll call
//! ```
//!
//! The field names and quoting are read back by [`relink_document`], which
//! regenerates every timestamp link from the header alone.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::{
    clock::parse_clock_time,
    error::{Error, Result},
    links::{Rewrite, rewrite_links},
};

pub const DEFAULT_TITLE: &str = "Meeting Minutes";
pub const TITLE_KEY: &str = "title";
pub const START_TIME_KEY: &str = "recording_start_time";
pub const RECORDING_URL_KEY: &str = "recording_url";

static HEADER_RE: LazyLock<Regex> = lazy_regex!(
    r"\A---\n(?s:(?P<fields>.*?))\n---\n",
    "metadata header pattern should compile",
);

/// Metadata written at the top of an exported document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub start_time: Option<String>,
    pub recording_url: Option<String>,
}

impl Metadata {
    fn fields(&self) -> Vec<(&str, &str)> {
        let title = if self.title.trim().is_empty() {
            DEFAULT_TITLE
        } else {
            self.title.as_str()
        };
        let mut fields = vec![(TITLE_KEY, title)];
        if let Some(start) = self.start_time.as_deref().filter(|s| !s.is_empty()) {
            fields.push((START_TIME_KEY, start));
        }
        if let Some(url) = self.recording_url.as_deref().filter(|s| !s.is_empty()) {
            fields.push((RECORDING_URL_KEY, url));
        }
        fields
    }
}

/// A document split into its header fields and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document<'a> {
    /// Header fields in the order they appear.
    pub fields: Vec<(&'a str, &'a str)>,
    pub body: &'a str,
}

impl<'a> Document<'a> {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }
}

fn render_header<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut out = String::from("---\n");
    for (key, value) in fields {
        out.push_str(&format!("{key}: \"{value}\"\n"));
    }
    out.push_str("---\n\n");
    out
}

/// Prefix `body` with the metadata header and a blank separator line.
#[must_use]
pub fn render_document(meta: &Metadata, body: &str) -> String {
    render_header(meta.fields()) + body
}

/// Split a document into header fields and body.
///
/// Header lines without a `:` are ignored. Values are trimmed and stripped
/// of surrounding double quotes. One blank line after the header belongs
/// to the header, so rendering a parsed document reproduces it.
#[must_use]
pub fn parse_document(text: &str) -> Option<Document<'_>> {
    let caps = HEADER_RE.captures(text)?;
    let fields = caps
        .name("fields")
        .map_or("", |m| m.as_str())
        .lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim(), value.trim().trim_matches('"')))
        .collect();
    let rest = &text[caps.get(0)?.end()..];
    Some(Document {
        fields,
        body: rest.strip_prefix('\n').unwrap_or(rest),
    })
}

/// Regenerate the timestamp links of a document from its own header.
///
/// Every header field is written back in its original order.
///
/// # Errors
/// Fails without producing output when the header is absent, lacks a start
/// time or recording URL, or the start time does not parse.
pub fn relink_document(text: &str) -> Result<Rewrite> {
    let doc = parse_document(text).ok_or(Error::MissingFrontmatter)?;
    let start = doc
        .get(START_TIME_KEY)
        .filter(|s| !s.is_empty())
        .ok_or(Error::MissingStartTime)?;
    let url = doc
        .get(RECORDING_URL_KEY)
        .filter(|s| !s.is_empty())
        .ok_or(Error::MissingRecordingUrl)?;
    let start = parse_clock_time(start).ok_or_else(|| Error::InvalidStartTime(start.to_string()))?;
    let rewrite = rewrite_links(doc.body, start, url);
    Ok(Rewrite {
        text: render_header(doc.fields) + &rewrite.text,
        count: rewrite.count,
    })
}

/// File name for an exported document: the title with every character
/// other than an ASCII letter or digit replaced by `_`, then the date.
///
/// ```
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
/// assert_eq!(
///     mdminutes::export_file_name("CB 4: Land Use", date),
///     "CB_4__Land_Use_2024-05-01.md"
/// );
/// ```
#[must_use]
pub fn export_file_name(title: &str, date: NaiveDate) -> String {
    let title = if title.trim().is_empty() {
        DEFAULT_TITLE
    } else {
        title
    };
    let stem: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{stem}_{}.md", date.format("%Y-%m-%d"))
}
