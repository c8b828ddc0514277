//! Core data types shared between core logic and the UI.
//!
//! Rule of thumb:
//! - These structs should be “boring bags of data”
//! - No GUI code
//! - No filesystem code
//! - No tag parsing code
//!
//! `MetadataRecord` is what the tag reader hands back for one file.
//! `Track` is ONE playable file plus the display strings the player shows.

use std::path::{Path, PathBuf};

/// Placeholder shown when a file has no artist tag.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Everything the tag reader could pull out of one tag.
///
/// Every field is `Option` because tags are best-effort:
/// - some files have no tag at all
/// - some frames are missing or garbled
///
/// A field is only `Some` when its frame decoded cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRecord {
    /// TIT2
    pub title: Option<String>,

    /// TPE1
    pub artist: Option<String>,

    /// TALB
    pub album: Option<String>,

    /// First APIC frame
    pub cover: Option<CoverImage>,
}

impl MetadataRecord {
    /// True when no frame yielded anything.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.artist.is_none() && self.album.is_none() && self.cover.is_none()
    }
}

/// An embedded picture (APIC).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverImage {
    /// Like "image/jpeg"
    pub mime_type: String,

    /// ID3 picture type byte (3 = front cover), when the frame carried one.
    pub picture_type: Option<u8>,

    pub description: String,

    /// Raw image file bytes (JPEG/PNG/...), ready for an image decoder.
    pub data: Vec<u8>,
}

/// One row in the playlist.
///
/// Unlike `MetadataRecord`, the display strings are always present:
/// the fallbacks (filename, "Unknown Artist") are applied once, here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Full file path on disk.
    pub path: PathBuf,

    pub title: String,

    pub artist: String,

    pub album: Option<String>,

    /// True if the tag had a picture. The bytes are loaded lazily by the GUI.
    pub has_cover: bool,
}

impl Track {
    /// Build a row from whatever the tag reader found.
    pub fn from_metadata(path: PathBuf, meta: MetadataRecord) -> Self {
        let title = meta.title.unwrap_or_else(|| filename_stem(&path));
        let artist = meta.artist.unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

        Self {
            title,
            artist,
            album: meta.album,
            has_cover: meta.cover.is_some(),
            path,
        }
    }

    /// Row for a file whose tag could not be read at all.
    pub fn untagged(path: PathBuf) -> Self {
        Self::from_metadata(path, MetadataRecord::default())
    }
}

/// Gets filename without extension, used as a fallback title.
/// Ex: 'song.mp3' -> 'song'
pub fn filename_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Unknown Title")
        .to_string()
}
