//! core/tags/mod.rs
//!
//! ID3v2 tag reading, done by hand over a byte buffer.
//! Public API:
//! - [`extract`] decodes a buffer into a [`MetadataRecord`]. Never fails.
//! - [`read_tag_bytes`] pulls just the tag region off disk.
//! - [`read_metadata`] = read_tag_bytes + extract.
//! - [`read_embedded_art`] returns the first embedded picture.
//!
//! [`MetadataRecord`]: crate::core::types::MetadataRecord

mod art;
mod cursor;
mod error;
mod frame;
mod header;
mod read;
mod text;

pub use art::read_embedded_art;
pub use error::TagError;
pub use read::{extract, read_metadata, read_tag_bytes};
