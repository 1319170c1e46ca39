//! Rewrite bracketed clock stamps into recording links.
//!
//! A stamp such as `[09:15]` becomes `[09:15](<base>?t=900)`, where the
//! offset is measured from the meeting start. Existing links around stamps
//! are discarded first, so running the rewriter again after the start time
//! or recording URL changes replaces the old targets rather than nesting
//! them.
//!
//! Stamps are matched anywhere in the text, code spans included. Only ASCII
//! digits form a stamp.

use std::{borrow::Cow, sync::LazyLock};

use regex::{Captures, Regex};
use tracing::{debug, info};

use crate::clock::{ClockTime, elapsed_seconds, format_elapsed, parse_clock_time};

static LINKED_STAMP_RE: LazyLock<Regex> = lazy_regex!(
    r"\[(?P<time>[0-9]{1,2}:[0-9]{2}(?::[0-9]{2})?)\]\([^)]+\)",
    "linked timestamp pattern should compile",
);

static STAMP_RE: LazyLock<Regex> = lazy_regex!(
    r"\[(?P<time>[0-9]{1,2}:[0-9]{2}(?::[0-9]{2})?)\]",
    "timestamp pattern should compile",
);

/// Result of a link rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub text: String,
    /// Number of stamps that were linked.
    pub count: usize,
}

/// Drop any query string from a recording URL.
///
/// ```
/// assert_eq!(
///     mdminutes::base_url("https://x.test/v?foo=bar&t=5"),
///     "https://x.test/v"
/// );
/// ```
#[must_use]
pub fn base_url(url: &str) -> &str {
    url.split_once('?').map_or(url, |(base, _)| base)
}

/// Build the link for a stamp at `elapsed` seconds into the recording.
///
/// Parentheses in `base` are percent-encoded so the link target never
/// contains a `)` and can be stripped again on the next pass.
#[must_use]
pub fn timestamp_link(stamp: &str, base: &str, elapsed: i64) -> String {
    let base = base.replace('(', "%28").replace(')', "%29");
    format!("[{stamp}]({base}?t={elapsed})")
}

/// Unwrap linked stamps back to their bare `[HH:MM(:SS)]` form.
#[must_use]
pub fn strip_links(text: &str) -> Cow<'_, str> {
    LINKED_STAMP_RE.replace_all(text, "[$time]")
}

/// Link every bracketed stamp in `text` to its offset in the recording.
///
/// Stamps that do not parse as a time of day are left as they are and are
/// not counted. An existing link target ends at its first `)`; targets
/// written by this function never contain one.
///
/// # Examples
///
/// ```
/// use mdminutes::{ClockTime, rewrite_links};
///
/// let out = rewrite_links(
///     "[09:15] Item discussed",
///     ClockTime::new(9, 0, 0),
///     "https://x.test/v?foo=bar",
/// );
/// assert_eq!(out.text, "[09:15](https://x.test/v?t=900) Item discussed");
/// assert_eq!(out.count, 1);
/// ```
#[must_use]
pub fn rewrite_links(text: &str, start: ClockTime, recording_url: &str) -> Rewrite {
    let base = base_url(recording_url);
    let stripped = strip_links(text);
    let mut count = 0;
    let linked = STAMP_RE.replace_all(&stripped, |caps: &Captures| {
        let stamp = &caps["time"];
        let Some(mark) = parse_clock_time(stamp) else {
            debug!(stamp, "leaving unparsable timestamp");
            return caps[0].to_string();
        };
        let elapsed = elapsed_seconds(start, mark);
        debug!(stamp, elapsed = %format_elapsed(elapsed), "linked timestamp");
        count += 1;
        timestamp_link(stamp, base, elapsed)
    });
    let text = linked.into_owned();
    info!(count, "processed timestamps");
    Rewrite { text, count }
}
