//! Clock-time parsing and elapsed offset arithmetic.
//!
//! Timestamps typed into minutes are wall-clock times. The recording is
//! addressed by elapsed seconds, so every stamp is converted relative to the
//! meeting start. A stamp earlier than the start is taken to be on the next
//! day.

use std::fmt;

use chrono::{Local, Timelike};

pub const SECONDS_PER_DAY: i64 = 24 * 3600;

/// A wall-clock time of day.
///
/// Fields are not range checked on construction; [`parse_clock_time`] only
/// yields values for which [`ClockTime::is_valid`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockTime {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl ClockTime {
    #[must_use]
    pub const fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    /// Current local wall-clock time, truncated to whole seconds.
    #[must_use]
    pub fn now() -> Self {
        let now = Local::now();
        Self::new(now.hour(), now.minute(), now.second())
    }

    /// Whether the time lies within a single day.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.hours < 24 && self.minutes < 60 && self.seconds < 60
    }

    #[must_use]
    pub fn total_seconds(self) -> i64 {
        i64::from(self.hours) * 3600 + i64::from(self.minutes) * 60 + i64::from(self.seconds)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

fn parse_field(field: &str) -> Option<u32> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Parse a clock time from either a date-time or a bare `HH:MM[:SS]` string.
///
/// A date-time such as `2024-05-01T18:30` contributes only its hours and
/// minutes; seconds are zero. A bare time must have exactly two or three
/// colon-separated numeric fields. Anything else, including fields out of a
/// day's range, yields `None`.
///
/// # Examples
///
/// ```
/// use mdminutes::{ClockTime, parse_clock_time};
///
/// assert_eq!(parse_clock_time("18:42:15"), Some(ClockTime::new(18, 42, 15)));
/// assert_eq!(parse_clock_time("2024-05-01T18:30"), Some(ClockTime::new(18, 30, 0)));
/// assert_eq!(parse_clock_time("18"), None);
/// ```
#[must_use]
pub fn parse_clock_time(text: &str) -> Option<ClockTime> {
    let text = text.trim();
    let time = if let Some((_date, time)) = text.split_once('T') {
        let mut fields = time.split(':');
        let hours = parse_field(fields.next()?)?;
        let minutes = parse_field(fields.next()?)?;
        ClockTime::new(hours, minutes, 0)
    } else {
        let fields: Vec<&str> = text.split(':').collect();
        match fields.as_slice() {
            [h, m] => ClockTime::new(parse_field(h)?, parse_field(m)?, 0),
            [h, m, s] => ClockTime::new(parse_field(h)?, parse_field(m)?, parse_field(s)?),
            _ => return None,
        }
    };
    time.is_valid().then_some(time)
}

/// Seconds from `start` to `mark`, wrapping once past midnight.
///
/// Only a single day of rollover is corrected; a mark more than a day
/// after the start is indistinguishable from one on the same day.
#[must_use]
pub fn elapsed_seconds(start: ClockTime, mark: ClockTime) -> i64 {
    let elapsed = mark.total_seconds() - start.total_seconds();
    if elapsed < 0 {
        elapsed + SECONDS_PER_DAY
    } else {
        elapsed
    }
}

/// Render an elapsed offset as `H:MM:SS`, or `M:SS` below one hour.
#[must_use]
pub fn format_elapsed(seconds: i64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}
