//! Library for linking timestamps in meeting minutes to a recording.
//!
//! Minutes taken live carry wall-clock stamps such as `[18:42:15]`. Given
//! the time the recording started and its URL, [`rewrite_links`] turns each
//! stamp into a link that opens the recording at the matching moment, and
//! [`annotate`] footnotes known acronyms. [`Session`] bundles both with the
//! state an editor keeps between edits.

#[macro_use]
mod macros;

pub mod clock;
pub mod error;
pub mod footnotes;
pub mod frontmatter;
pub mod links;
pub mod session;
pub mod templates;

pub use clock::{ClockTime, elapsed_seconds, format_elapsed, parse_clock_time};
pub use error::{Error, Result};
pub use footnotes::{DEFAULT_FOOTNOTES, FootnoteTable, annotate, parse_entry};
pub use frontmatter::{
    Document,
    Metadata,
    export_file_name,
    parse_document,
    relink_document,
    render_document,
};
pub use links::{Rewrite, base_url, rewrite_links, strip_links, timestamp_link};
pub use session::Session;
pub use templates::{MEETING_AGENDA, Phrase};
