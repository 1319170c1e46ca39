//! Error type shared by the library.
//!
//! Every variant is a validation failure raised before the document is
//! touched. Unparsable timestamps inside the body are not errors; the
//! rewriter leaves them as literal text.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("meeting start time is not set")]
    MissingStartTime,

    #[error("recording URL is not set")]
    MissingRecordingUrl,

    #[error("invalid start time: {0:?}")]
    InvalidStartTime(String),

    #[error("invalid footnote entry {0:?}: expected ACRONYM|Definition")]
    InvalidFootnoteEntry(String),

    #[error("cursor {0} is not a character boundary of the document")]
    InvalidCursor(usize),

    #[error(
        "unknown phrase {0:?}; expected one of: call-to-order, quorum, adopted, motion, carried, failed"
    )]
    UnknownPhrase(String),

    #[error("document has no `---` metadata header")]
    MissingFrontmatter,
}

pub type Result<T> = std::result::Result<T, Error>;
