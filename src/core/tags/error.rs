//! core/tags/error.rs
//! Tag reader error taxonomy.
//!
//! Only `Io` ever reaches a caller of the public API. The rest are produced
//! while scanning, logged, and swallowed by [`super::extract`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TagError {
    /// Buffer does not start with "ID3".
    #[error("no ID3 container at start of buffer")]
    NoContainer,

    #[error("tag header truncated: have {have} of 10 bytes")]
    TruncatedHeader { have: usize },

    /// Frame payload runs past the tag end or the buffer end.
    #[error("frame {id} declares {declared} bytes but only {available} remain")]
    TruncatedFrame {
        id: String,
        declared: usize,
        available: usize,
    },

    #[error("malformed picture frame: {0}")]
    MalformedImageFrame(&'static str),

    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),
}
