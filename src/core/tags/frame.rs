//! core/tags/frame.rs
//! Frame ids and the 10-byte frame header.
//!
//! Frame header layout:
//! - bytes\[0..4]  => 4-char id ("TIT2", "APIC", ...)
//! - bytes\[4..8]  => payload size, plain big-endian (NOT synchsafe)
//! - bytes\[8..10] => flags (ignored)

use std::fmt;

use super::cursor::Cursor;

pub(crate) const FRAME_HEADER_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Title,
    Artist,
    Album,
    CoverImage,
    /// Zero bytes where a frame id should be: the rest of the tag is padding.
    Padding,
    /// Anything else. Skipped, but its size still moves the cursor.
    Unknown([u8; 4]),
}

impl FrameKind {
    pub fn from_id(id: [u8; 4]) -> Self {
        match &id {
            b"TIT2" => Self::Title,
            b"TPE1" => Self::Artist,
            b"TALB" => Self::Album,
            b"APIC" => Self::CoverImage,
            [0, ..] => Self::Padding,
            _ => Self::Unknown(id),
        }
    }

    pub fn id(&self) -> [u8; 4] {
        match self {
            Self::Title => *b"TIT2",
            Self::Artist => *b"TPE1",
            Self::Album => *b"TALB",
            Self::CoverImage => *b"APIC",
            Self::Padding => [0; 4],
            Self::Unknown(id) => *id,
        }
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.id()).escape_default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FrameHeader {
    pub kind: FrameKind,
    pub size: u32,
    pub flags: u16,
}

impl FrameHeader {
    /// Reads id, size and flags. `None` if fewer than 10 bytes remain.
    pub(crate) fn read(cursor: &mut Cursor<'_>) -> Option<Self> {
        if cursor.remaining() < FRAME_HEADER_LEN {
            return None;
        }

        let kind = FrameKind::from_id(cursor.take_array::<4>()?);
        let size = cursor.read_u32_be()?;
        let flags = cursor.read_u16_be()?;

        Some(Self { kind, size, flags })
    }
}
