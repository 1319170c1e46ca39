//! Helper macros used across the crate.

/// Lazily compile a [`Regex`] with a custom panic message.
///
/// # Examples
///
/// ```
/// use std::sync::LazyLock;
///
/// use regex::Regex;
/// static STAMP: LazyLock<Regex> = mdminutes::lazy_regex!(r"\[\d{2}:\d{2}\]", "stamp");
/// assert!(STAMP.is_match("[09:15] Roll call"));
/// ```
#[macro_export]
macro_rules! lazy_regex {
    ($pattern:expr, $msg:expr $(,)?) => {
        LazyLock::new(|| Regex::new($pattern).expect($msg))
    };
}
