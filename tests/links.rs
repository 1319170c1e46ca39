//! Integration tests for timestamp linking.
//!
//! Each case feeds a whole document through `rewrite_links` and checks the
//! properties any companion tool relies on: a second pass is a no-op,
//! changing the start time or URL replaces old links instead of nesting
//! them, and malformed stamps survive untouched.

use mdminutes::{ClockTime, elapsed_seconds, rewrite_links};

#[macro_use]
mod prelude;
use prelude::*;

#[fixture]
fn start() -> ClockTime {
    ClockTime::new(18, 30, 0)
}

#[rstest]
#[case("")]
#[case("No stamps at all.\n")]
#[case(&minutes!("[18:30] Call to order", "[18:42:15] Roll call", "[00:05] After midnight"))]
#[case(&minutes!("[18:31](https://elsewhere.test/x?t=9) Stale link", "[18:32]()", "[7:5] short"))]
#[case(&minutes!("`[18:40]` in code", "[25:99:99] bogus", "[[18:45]] doubled"))]
fn test_second_pass_is_identical(start: ClockTime, #[case] input: &str) {
    let once = rewrite_links(input, start, URL);
    let twice = rewrite_links(&once.text, start, URL);
    assert_eq!(twice.text, once.text);
    assert_eq!(twice.count, once.count);
}

#[rstest]
fn test_rollover_and_plain_offsets() {
    assert_eq!(
        elapsed_seconds(ClockTime::new(10, 0, 0), ClockTime::new(9, 0, 0)),
        23 * 3600
    );
    assert_eq!(
        elapsed_seconds(ClockTime::new(9, 0, 0), ClockTime::new(10, 30, 15)),
        5415
    );
}

#[rstest]
fn test_format_preservation() {
    let out = rewrite_links(
        "[09:15] Item discussed",
        ClockTime::new(9, 0, 0),
        "https://x.test/v?foo=bar",
    );
    assert_eq!(out.text, "[09:15](https://x.test/v?t=900) Item discussed");
}

#[rstest]
fn test_relink_after_start_change() {
    let out = rewrite_links(
        "[09:15](https://x.test/v?t=900) text",
        ClockTime::new(9, 5, 0),
        "https://x.test/v?foo=bar",
    );
    assert_eq!(out.text, "[09:15](https://x.test/v?t=600) text");
}

#[rstest]
fn test_unparsable_stamp_untouched(start: ClockTime) {
    let input = "Before [25:99:99] after [18:31]";
    let out = rewrite_links(input, start, URL);
    assert_eq!(
        out.text,
        "Before [25:99:99] after [18:31](https://video.test/watch?t=60)"
    );
    assert_eq!(out.count, 1);
}

#[rstest]
fn test_counts_every_linked_stamp(start: ClockTime) {
    let input = minutes!("[18:31] a [18:32] b", "[18:33](old) c");
    let out = rewrite_links(&input, start, URL);
    assert_eq!(out.count, 3);
    assert_eq!(out.text.matches("https://video.test/watch?t=").count(), 3);
}

#[rstest]
fn test_url_change_replaces_targets(start: ClockTime) {
    let first = rewrite_links("[18:45] Vote", start, URL);
    let second = rewrite_links(&first.text, start, "https://mirror.test/v/abc");
    assert_eq!(second.text, "[18:45](https://mirror.test/v/abc?t=900) Vote");
}
