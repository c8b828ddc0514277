//! core/tags/art.rs
//! Embedded pictures (APIC).
//!
//! Payload layout handled here:
//! - 1 byte text encoding
//! - MIME type, NUL-terminated (always single-byte)
//! - description, terminated per the encoding
//! - image bytes up to the end of the frame
//!
//! Real APIC frames put a picture-type byte between MIME and description.
//! For single-byte encodings that byte is read as the head of the description
//! and split off when it is a valid type (< 0x15). For UTF-16 it is read
//! explicitly, since it would otherwise break the two-byte alignment.

use std::path::Path;

use super::error::TagError;
use super::read::{extract, read_tag_bytes};
use super::text::{TextEncoding, decode, split_terminated, strip_nulls};
use crate::core::types::CoverImage;

/// Picture types run 0x00..=0x14.
const PICTURE_TYPE_LIMIT: u8 = 0x15;

/// Returns the first embedded picture, if the file has one.
pub fn read_embedded_art(path: &Path) -> Result<Option<CoverImage>, TagError> {
    let bytes = read_tag_bytes(path)?;
    Ok(extract(&bytes).cover)
}

pub(crate) fn decode_picture(payload: &[u8]) -> Result<CoverImage, TagError> {
    let (&encoding_byte, rest) = payload
        .split_first()
        .ok_or(TagError::MalformedImageFrame("empty frame"))?;
    let encoding = TextEncoding::from_byte(encoding_byte).unwrap_or(TextEncoding::Latin1);

    let (mime, rest) = split_terminated(rest, TextEncoding::Latin1)
        .ok_or(TagError::MalformedImageFrame("unterminated MIME type"))?;

    let (picture_type, description, data) = if encoding.is_wide() {
        let (&picture_type, rest) = rest
            .split_first()
            .ok_or(TagError::MalformedImageFrame("missing picture type"))?;
        let (desc, data) = split_terminated(rest, encoding)
            .ok_or(TagError::MalformedImageFrame("unterminated description"))?;
        (Some(picture_type), decode(encoding, desc), data)
    } else if let Some((picture_type, data)) = typed_empty_description(rest) {
        (Some(picture_type), String::new(), data)
    } else {
        let (desc, data) = split_terminated(rest, encoding)
            .ok_or(TagError::MalformedImageFrame("unterminated description"))?;
        match desc.split_first() {
            Some((&b, tail)) if b < PICTURE_TYPE_LIMIT => (Some(b), decode(encoding, tail), data),
            _ => (None, decode(encoding, desc), data),
        }
    };

    if data.is_empty() {
        return Err(TagError::MalformedImageFrame("no image data"));
    }

    Ok(CoverImage {
        mime_type: normalize_mime(&decode(TextEncoding::Latin1, mime)),
        picture_type,
        description: strip_nulls(&description),
        data: data.to_vec(),
    })
}

/// `type | NUL | image`: a picture type with an empty description.
/// Type 0x00 ("Other") is indistinguishable from a description terminator,
/// so this reading needs a known image signature right after the NUL.
fn typed_empty_description(rest: &[u8]) -> Option<(u8, &[u8])> {
    match rest {
        [t, 0x00, data @ ..] if *t < PICTURE_TYPE_LIMIT && has_image_signature(data) => {
            Some((*t, data))
        }
        _ => None,
    }
}

fn has_image_signature(data: &[u8]) -> bool {
    const SIGNATURES: [&[u8]; 5] = [b"\xFF\xD8", b"\x89PNG", b"GIF", b"BM", b"RIFF"];
    SIGNATURES.iter().any(|sig| data.starts_with(sig))
}

/// Old writers store "JPG"/"png" instead of a MIME type.
fn normalize_mime(raw: &str) -> String {
    let raw = raw.trim();
    if raw.contains('/') {
        return raw.to_string();
    }

    match raw.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg".to_string(),
        // Empty MIME means "image/" with the format left unstated.
        "" => "image/".to_string(),
        other => format!("image/{other}"),
    }
}
