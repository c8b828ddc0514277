//! core/tags/header.rs
//! The 10-byte container header at the start of a tagged file.
//!
//! | bytes | meaning |
//! |-------|---------|
//! | 0..3  | "ID3" |
//! | 3..5  | major version, revision (not interpreted) |
//! | 5     | flags (not interpreted) |
//! | 6..10 | body size, synchsafe (7 bits per byte) |

use super::error::TagError;

pub(crate) const HEADER_LEN: usize = 10;
pub(crate) const TAG_ID: &[u8; 3] = b"ID3";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
    pub major: u8,
    pub revision: u8,
    pub flags: u8,

    /// Size of everything after the 10-byte header.
    pub body_size: u32,
}

impl ContainerHeader {
    pub fn parse(bytes: &[u8]) -> Result<Self, TagError> {
        if !bytes.starts_with(TAG_ID) {
            return Err(TagError::NoContainer);
        }
        if bytes.len() < HEADER_LEN {
            return Err(TagError::TruncatedHeader { have: bytes.len() });
        }

        Ok(Self {
            major: bytes[3],
            revision: bytes[4],
            flags: bytes[5],
            body_size: synchsafe_u32([bytes[6], bytes[7], bytes[8], bytes[9]]),
        })
    }

    /// Offset one past the last byte of the tag.
    pub fn end(&self) -> usize {
        HEADER_LEN + self.body_size as usize
    }
}

/// Decode a 28-bit synchsafe integer. The top bit of every byte is ignored.
pub fn synchsafe_u32(bytes: [u8; 4]) -> u32 {
    bytes
        .iter()
        .fold(0u32, |acc, &b| (acc << 7) | u32::from(b & 0x7F))
}
