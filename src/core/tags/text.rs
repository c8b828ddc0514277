//! core/tags/text.rs
//! Text decoding for frame payloads.
//!
//! Real tags put an encoding byte in front of every text payload:
//! 0 = ISO-8859-1, 1 = UTF-16 with BOM, 2 = UTF-16BE, 3 = UTF-8.
//! Hand-built tags sometimes skip it and store bare text, so the first byte
//! only counts as an encoding marker when it is one of those four values.

const BOM_LE: [u8; 2] = [0xFF, 0xFE];
const BOM_BE: [u8; 2] = [0xFE, 0xFF];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TextEncoding {
    Latin1,
    Utf16,
    Utf16Be,
    Utf8,
}

impl TextEncoding {
    pub(crate) fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(Self::Latin1),
            1 => Some(Self::Utf16),
            2 => Some(Self::Utf16Be),
            3 => Some(Self::Utf8),
            _ => None,
        }
    }

    /// Two-byte code units (and two-byte terminators).
    pub(crate) fn is_wide(self) -> bool {
        matches!(self, Self::Utf16 | Self::Utf16Be)
    }
}

/// Decode a TIT2/TPE1/TALB payload.
/// NULs are dropped; an empty result means "no value".
pub(crate) fn decode_text_frame(payload: &[u8]) -> Option<String> {
    let (&first, rest) = payload.split_first()?;

    let text = match TextEncoding::from_byte(first) {
        Some(encoding) => decode(encoding, rest),
        None => String::from_utf8_lossy(payload).into_owned(),
    };

    let text = strip_nulls(&text);
    (!text.is_empty()).then_some(text)
}

/// Decode bytes in the given encoding (lossy; never fails).
pub(crate) fn decode(encoding: TextEncoding, bytes: &[u8]) -> String {
    match encoding {
        TextEncoding::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
        TextEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        TextEncoding::Utf16 => match bytes.strip_prefix(&BOM_LE) {
            Some(rest) => decode_utf16(rest, false),
            // BE BOM, or no BOM at all: big-endian.
            None => decode_utf16(bytes.strip_prefix(&BOM_BE).unwrap_or(bytes), true),
        },
        TextEncoding::Utf16Be => decode_utf16(bytes, true),
    }
}

fn decode_utf16(bytes: &[u8], big_endian: bool) -> String {
    let units = bytes.chunks_exact(2).map(|pair| {
        let pair = [pair[0], pair[1]];
        if big_endian {
            u16::from_be_bytes(pair)
        } else {
            u16::from_le_bytes(pair)
        }
    });

    char::decode_utf16(units)
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Remove terminators and stray BOMs (multi-value frames repeat the BOM).
pub(crate) fn strip_nulls(s: &str) -> String {
    s.chars().filter(|&c| c != '\0' && c != '\u{FEFF}').collect()
}

/// Split at the first string terminator for `encoding`.
/// Returns (text, rest-after-terminator), or `None` if there is no terminator.
pub(crate) fn split_terminated(bytes: &[u8], encoding: TextEncoding) -> Option<(&[u8], &[u8])> {
    if encoding.is_wide() {
        let at = bytes
            .chunks_exact(2)
            .position(|pair| pair == [0, 0])?
            * 2;
        Some((&bytes[..at], &bytes[at + 2..]))
    } else {
        let at = bytes.iter().position(|&b| b == 0)?;
        Some((&bytes[..at], &bytes[at + 1..]))
    }
}
