//! Editing session state.
//!
//! A [`Session`] owns everything an editor keeps while minutes are being
//! taken: the meeting metadata, the text buffer, the acronym table and the
//! auto-timestamp toggle. Cursor positions are byte offsets into the buffer.

use tracing::info;

use crate::{
    clock::{ClockTime, parse_clock_time},
    error::{Error, Result},
    footnotes::{FootnoteTable, annotate},
    frontmatter::{Metadata, render_document},
    links::rewrite_links,
    templates::{MEETING_AGENDA, Phrase},
};

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub title: String,
    /// Either a date-time (`2024-05-01T18:30`) or a bare clock time.
    pub start_time: Option<String>,
    pub recording_url: Option<String>,
    pub text: String,
    pub footnotes: FootnoteTable,
    auto_timestamp: bool,
}

fn stamp(now: ClockTime) -> String {
    format!("[{now}]")
}

impl Session {
    /// Start a session with the built-in acronym table and an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the meeting start time and recording URL.
    #[must_use]
    pub fn with_recording(
        mut self,
        start_time: Option<String>,
        recording_url: Option<String>,
    ) -> Self {
        self.start_time = start_time;
        self.recording_url = recording_url;
        self
    }

    #[must_use]
    pub fn auto_timestamp(&self) -> bool {
        self.auto_timestamp
    }

    /// Flip auto-timestamping and return the new state.
    pub fn toggle_auto_timestamp(&mut self) -> bool {
        self.auto_timestamp = !self.auto_timestamp;
        info!(enabled = self.auto_timestamp, "auto-timestamp toggled");
        self.auto_timestamp
    }

    fn check_cursor(&self, cursor: usize) -> Result<()> {
        if self.text.is_char_boundary(cursor) {
            Ok(())
        } else {
            Err(Error::InvalidCursor(cursor))
        }
    }

    /// Replace `start..end` with `insert` and return the cursor after it.
    fn splice(&mut self, start: usize, end: usize, insert: &str) -> Result<usize> {
        self.check_cursor(start)?;
        self.check_cursor(end)?;
        if end < start {
            return Err(Error::InvalidCursor(end));
        }
        self.text.replace_range(start..end, insert);
        Ok(start + insert.len())
    }

    /// Link every timestamp in the buffer to the recording.
    ///
    /// Returns the number of timestamps linked.
    ///
    /// # Errors
    /// Fails, leaving the buffer untouched, if the start time or recording
    /// URL is missing or the start time does not parse.
    pub fn process_timestamps(&mut self) -> Result<usize> {
        let start = self
            .start_time
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(Error::MissingStartTime)?;
        let url = self
            .recording_url
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(Error::MissingRecordingUrl)?;
        let start =
            parse_clock_time(start).ok_or_else(|| Error::InvalidStartTime(start.to_string()))?;
        let rewrite = rewrite_links(&self.text, start, url);
        self.text = rewrite.text;
        Ok(rewrite.count)
    }

    /// Render the buffer as a document with header and footnotes.
    ///
    /// The buffer itself is not modified.
    #[must_use]
    pub fn export(&self) -> String {
        let meta = Metadata {
            title: self.title.clone(),
            start_time: self.start_time.clone(),
            recording_url: self.recording_url.clone(),
        };
        render_document(&meta, &annotate(&self.text, &self.footnotes))
    }

    /// Add an `ACRONYM|Definition` footnote entry.
    ///
    /// # Errors
    /// Returns [`Error::InvalidFootnoteEntry`] for a malformed entry.
    pub fn add_footnote(&mut self, entry: &str) -> Result<()> {
        self.footnotes.add_entry(entry)?;
        info!(entry, "footnote added");
        Ok(())
    }

    /// Replace the selection `start..end` with `[HH:MM:SS] `.
    ///
    /// # Errors
    /// Returns [`Error::InvalidCursor`] if the selection is not a valid
    /// range of the buffer.
    pub fn insert_timestamp(&mut self, start: usize, end: usize, now: ClockTime) -> Result<usize> {
        self.splice(start, end, &format!("{} ", stamp(now)))
    }

    /// Insert the standard agenda at `cursor`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidCursor`] for a cursor outside the buffer.
    pub fn insert_agenda(&mut self, cursor: usize) -> Result<usize> {
        self.splice(cursor, cursor, MEETING_AGENDA)
    }

    /// Insert a timestamped stock phrase at `cursor`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidCursor`] for a cursor outside the buffer.
    pub fn insert_phrase(&mut self, cursor: usize, phrase: Phrase, now: ClockTime) -> Result<usize> {
        self.splice(cursor, cursor, &format!("{} {}", stamp(now), phrase.text()))
    }

    /// Break the line at `cursor`, starting the new line with a timestamp
    /// when auto-timestamping is on.
    ///
    /// # Errors
    /// Returns [`Error::InvalidCursor`] for a cursor outside the buffer.
    pub fn newline(&mut self, cursor: usize, now: ClockTime) -> Result<usize> {
        let insert = if self.auto_timestamp {
            format!("\n{} ", stamp(now))
        } else {
            "\n".to_string()
        };
        self.splice(cursor, cursor, &insert)
    }
}
