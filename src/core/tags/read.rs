//! core/tags/read.rs
//! Scan an ID3v2 buffer and turn recognized frames into a `MetadataRecord`.
//!
//! - Never fails on bad input: the scan stops and whatever decoded so far is returned.
//! - The cursor is bounded by the declared tag end AND the buffer end.
//! - Every frame (known or not) advances the cursor by its declared size.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::{debug, trace};

use super::art::decode_picture;
use super::cursor::Cursor;
use super::error::TagError;
use super::frame::{FRAME_HEADER_LEN, FrameHeader, FrameKind};
use super::header::{ContainerHeader, HEADER_LEN};
use super::text::decode_text_frame;
use crate::core::types::MetadataRecord;

/// Decode the tag at the start of `buffer`.
///
/// Returns an empty record when there is no "ID3" header, and a partial
/// record when the tag is truncated or inconsistent.
pub fn extract(buffer: &[u8]) -> MetadataRecord {
    let mut record = MetadataRecord::default();

    match scan_frames(buffer, &mut record) {
        Ok(()) => {}
        Err(TagError::NoContainer) => trace!("no tag container"),
        Err(e) => debug!(error = %e, "tag scan stopped early"),
    }

    record
}

/// Read just the tag region of a file: the 10-byte header plus its declared body.
///
/// Files without a tag return whatever header-sized prefix exists, which
/// `extract` treats as "no container". Short files are not an error.
pub fn read_tag_bytes(path: &Path) -> Result<Vec<u8>, TagError> {
    let mut file = File::open(path)?;

    let mut head = [0u8; HEADER_LEN];
    let got = read_up_to(&mut file, &mut head)?;
    let mut buf = head[..got].to_vec();

    let Ok(header) = ContainerHeader::parse(&buf) else {
        return Ok(buf);
    };

    buf.reserve(header.body_size as usize);
    file.take(u64::from(header.body_size)).read_to_end(&mut buf)?;
    Ok(buf)
}

/// `read_tag_bytes` + `extract`. Only I/O problems are errors.
pub fn read_metadata(path: &Path) -> Result<MetadataRecord, TagError> {
    let bytes = read_tag_bytes(path)?;
    Ok(extract(&bytes))
}

fn scan_frames(buffer: &[u8], record: &mut MetadataRecord) -> Result<(), TagError> {
    let header = ContainerHeader::parse(buffer)?;
    let mut cursor = Cursor::bounded(buffer, HEADER_LEN, header.end());

    trace!(
        version = header.major,
        revision = header.revision,
        flags = header.flags,
        body_size = header.body_size,
        available = cursor.remaining(),
        "scanning tag"
    );

    // Each frame consumes at least a header, so this is never the binding limit
    // for a well-formed tag; it just caps the work on garbage.
    let max_frames = header.body_size as usize / FRAME_HEADER_LEN + 1;

    for _ in 0..max_frames {
        let offset = cursor.position();
        let Some(frame) = FrameHeader::read(&mut cursor) else {
            break;
        };
        trace!(offset, frame = %frame.kind, size = frame.size, flags = frame.flags, "frame");

        if frame.kind == FrameKind::Padding {
            break;
        }

        let declared = frame.size as usize;
        let available = cursor.remaining();
        let payload = cursor.take(declared).ok_or_else(|| TagError::TruncatedFrame {
            id: frame.kind.to_string(),
            declared,
            available,
        })?;

        apply_frame(frame.kind, payload, record);
    }

    Ok(())
}

fn apply_frame(kind: FrameKind, payload: &[u8], record: &mut MetadataRecord) {
    let slot = match kind {
        FrameKind::Title => &mut record.title,
        FrameKind::Artist => &mut record.artist,
        FrameKind::Album => &mut record.album,
        FrameKind::CoverImage => {
            if record.cover.is_some() {
                return;
            }
            match decode_picture(payload) {
                Ok(cover) => record.cover = Some(cover),
                Err(e) => debug!(error = %e, "skipping picture frame"),
            }
            return;
        }
        FrameKind::Padding | FrameKind::Unknown(_) => {
            trace!(frame = %kind, size = payload.len(), "skipping frame");
            return;
        }
    };

    if let Some(text) = decode_text_frame(payload) {
        *slot = Some(text);
    }
}

/// Like `read_exact`, but a short read is fine: returns how many bytes landed.
fn read_up_to(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use std::io::Write;

    /// Encode a 28-bit size the way the container header expects.
    fn synchsafe(n: usize) -> [u8; 4] {
        let n = n as u32;
        [
            ((n >> 21) & 0x7F) as u8,
            ((n >> 14) & 0x7F) as u8,
            ((n >> 7) & 0x7F) as u8,
            (n & 0x7F) as u8,
        ]
    }

    fn frame(id: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut out = id.to_vec();
        out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        out.extend_from_slice(&[0, 0]);
        out.extend_from_slice(payload);
        out
    }

    /// Tag whose declared size matches its frames exactly.
    fn tag(frames: &[Vec<u8>]) -> Vec<u8> {
        let body = frames.concat();
        tag_with_size(&body, body.len())
    }

    fn tag_with_size(body: &[u8], declared: usize) -> Vec<u8> {
        let mut out = b"ID3\x03\x00\x00".to_vec();
        out.extend_from_slice(&synchsafe(declared));
        out.extend_from_slice(body);
        out
    }

    #[rstest]
    #[case(&b""[..])]
    #[case(&b"RIFF\x24\x00\x00\x00WAVEfmt "[..])]
    #[case(&[0xFF, 0xFB, 0x90, 0x44, 0x00, 0x00, 0x00, 0x00][..])]
    #[case(&b"id3\x03\x00\x00\x00\x00\x00\x10TIT2"[..])]
    #[case(&b"ID3\x03"[..])]
    fn no_container_yields_empty_record(#[case] buffer: &[u8]) {
        assert_eq!(extract(buffer), MetadataRecord::default());
    }

    #[test]
    fn single_title_frame() {
        let buf = tag(&[frame(b"TIT2", b"Song")]);

        let record = extract(&buf);
        assert_eq!(record.title.as_deref(), Some("Song"));
        assert_eq!(record.artist, None);
        assert_eq!(record.album, None);
        assert_eq!(record.cover, None);
    }

    #[test]
    fn all_text_frames() {
        let buf = tag(&[
            frame(b"TIT2", b"\x00Title\x00"),
            frame(b"TPE1", b"\x03Artist"),
            frame(b"TALB", b"Album\x00"),
        ]);

        let record = extract(&buf);
        assert_eq!(record.title.as_deref(), Some("Title"));
        assert_eq!(record.artist.as_deref(), Some("Artist"));
        assert_eq!(record.album.as_deref(), Some("Album"));
    }

    #[test]
    fn unknown_frame_is_skipped_by_its_size() {
        // The unknown payload looks like a frame header; it must not be parsed as one.
        let buf = tag(&[
            frame(b"PRIV", b"TPE1\x00\x00\x00\x01\x00\x00X"),
            frame(b"TIT2", b"Song"),
        ]);

        let record = extract(&buf);
        assert_eq!(record.title.as_deref(), Some("Song"));
        assert_eq!(record.artist, None);
    }

    #[test]
    fn cover_image_frame() {
        let image: Vec<u8> = (0..=255u8).cycle().take(300).collect();
        let mut payload = vec![0x00];
        payload.extend_from_slice(b"image/png\0");
        payload.extend_from_slice(b"\0");
        payload.extend_from_slice(&image);

        let record = extract(&tag(&[frame(b"APIC", &payload)]));
        let cover = record.cover.expect("cover decoded");
        assert_eq!(cover.mime_type, "image/png");
        assert_eq!(cover.data.len(), image.len());
        assert_eq!(cover.data, image);
    }

    #[test]
    fn first_cover_wins() {
        let first = [&[0u8][..], b"image/png\0\0", &[1, 2, 3]].concat();
        let second = [&[0u8][..], b"image/jpeg\0\0", &[4, 5]].concat();

        let record = extract(&tag(&[frame(b"APIC", &first), frame(b"APIC", &second)]));
        assert_eq!(record.cover.unwrap().data, [1, 2, 3]);
    }

    #[test]
    fn malformed_cover_leaves_other_fields_intact() {
        let buf = tag(&[
            frame(b"APIC", b"\x00image/png"),
            frame(b"TIT2", b"Still here"),
        ]);

        let record = extract(&buf);
        assert_eq!(record.cover, None);
        assert_eq!(record.title.as_deref(), Some("Still here"));
    }

    #[test]
    fn declared_size_past_buffer_end_keeps_complete_frames() {
        let mut body = frame(b"TIT2", b"Song");
        body.extend(frame(b"TPE1", b"Artist"));
        // Third frame claims 1000 bytes but the buffer stops after 3.
        body.extend_from_slice(b"TALB\x00\x00\x03\xE8\x00\x00abc");

        let buf = tag_with_size(&body, body.len() + 5000);

        let record = extract(&buf);
        assert_eq!(record.title.as_deref(), Some("Song"));
        assert_eq!(record.artist.as_deref(), Some("Artist"));
        assert_eq!(record.album, None);
    }

    #[test]
    fn frames_past_declared_end_are_ignored() {
        let title = frame(b"TIT2", b"Inside");
        let mut body = title.clone();
        body.extend(frame(b"TPE1", b"Outside"));

        let buf = tag_with_size(&body, title.len());

        let record = extract(&buf);
        assert_eq!(record.title.as_deref(), Some("Inside"));
        assert_eq!(record.artist, None);
    }

    #[test]
    fn frame_straddling_declared_end_is_dropped() {
        let title = frame(b"TIT2", b"Inside");
        let mut body = title.clone();
        body.extend(frame(b"TPE1", b"Straddles"));

        // Declared end cuts the artist frame in half even though the buffer has it all.
        let buf = tag_with_size(&body, title.len() + 12);

        let record = extract(&buf);
        assert_eq!(record.title.as_deref(), Some("Inside"));
        assert_eq!(record.artist, None);
    }

    #[test]
    fn padding_ends_the_scan() {
        let mut body = frame(b"TIT2", b"Song");
        body.extend_from_slice(&[0u8; 64]);

        let record = extract(&tag_with_size(&body, body.len()));
        assert_eq!(record.title.as_deref(), Some("Song"));
    }

    #[test]
    fn trailing_bytes_shorter_than_a_frame_header_are_ignored() {
        let mut body = frame(b"TIT2", b"Song");
        body.extend_from_slice(b"TPE");

        let record = extract(&tag_with_size(&body, body.len()));
        assert_eq!(record.title.as_deref(), Some("Song"));
        assert_eq!(record.artist, None);
    }

    #[test]
    fn zero_size_frames_do_not_stall() {
        let mut frames: Vec<Vec<u8>> = (0..50).map(|_| frame(b"TXXX", b"")).collect();
        frames.push(frame(b"TIT2", b"Song"));

        let record = extract(&tag(&frames));
        assert_eq!(record.title.as_deref(), Some("Song"));
    }

    #[test]
    fn later_text_frame_overwrites_earlier() {
        let record = extract(&tag(&[frame(b"TIT2", b"One"), frame(b"TIT2", b"Two")]));
        assert_eq!(record.title.as_deref(), Some("Two"));
    }

    #[test]
    fn empty_text_frame_stays_absent() {
        let record = extract(&tag(&[frame(b"TIT2", b"\x00\x00")]));
        assert_eq!(record.title, None);
    }

    #[test]
    fn extract_is_idempotent() {
        let cover = [&[0u8][..], b"image/png\0\0", &[9, 9, 9]].concat();
        let buf = tag(&[frame(b"TIT2", b"Song"), frame(b"APIC", &cover)]);

        assert_eq!(extract(&buf), extract(&buf));
    }

    #[test]
    fn decodes_tags_written_by_id3_crate() {
        use id3::frame::{Picture, PictureType};
        use id3::{Tag, TagLike, Version};

        let image = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

        let mut tag = Tag::new();
        tag.set_title("Señorita");
        tag.set_artist("Ünïcode Artist");
        tag.set_album("Album");
        tag.add_frame(Picture {
            mime_type: "image/jpeg".to_string(),
            picture_type: PictureType::CoverFront,
            description: "front".to_string(),
            data: image.clone(),
        });

        let mut buf = Vec::new();
        tag.write_to(&mut buf, Version::Id3v23).unwrap();

        let record = extract(&buf);
        assert_eq!(record.title.as_deref(), Some("Señorita"));
        assert_eq!(record.artist.as_deref(), Some("Ünïcode Artist"));
        assert_eq!(record.album.as_deref(), Some("Album"));

        let cover = record.cover.expect("cover decoded");
        assert_eq!(cover.mime_type, "image/jpeg");
        assert_eq!(cover.picture_type, Some(3));
        assert_eq!(cover.description, "front");
        assert_eq!(cover.data, image);
    }

    #[test]
    fn reads_only_the_tag_region_from_disk() {
        let tag_bytes = tag(&[frame(b"TIT2", b"On disk")]);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&tag_bytes).unwrap();
        // Audio data after the tag must not be pulled in.
        file.write_all(&[0xFF, 0xFB, 0x90, 0x44]).unwrap();
        file.write_all(&[0u8; 4096]).unwrap();
        file.flush().unwrap();

        let bytes = read_tag_bytes(file.path()).unwrap();
        assert_eq!(bytes, tag_bytes);

        let record = read_metadata(file.path()).unwrap();
        assert_eq!(record.title.as_deref(), Some("On disk"));
    }

    #[test]
    fn untagged_and_tiny_files_read_as_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"ID").unwrap();
        file.flush().unwrap();

        assert_eq!(read_tag_bytes(file.path()).unwrap(), b"ID");
        assert!(read_metadata(file.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_metadata(&dir.path().join("nope.mp3")).unwrap_err();
        assert!(matches!(err, TagError::Io(_)));
    }

    proptest! {
        #[test]
        fn arbitrary_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
            let _ = extract(&bytes);
        }

        #[test]
        fn arbitrary_bodies_behind_a_valid_header_never_panic(
            body in proptest::collection::vec(any::<u8>(), 0..512),
            declared in 0usize..0x0FFF_FFFF,
        ) {
            let buf = tag_with_size(&body, declared);
            let _ = extract(&buf);
        }

        #[test]
        fn title_round_trips(title in "[A-Za-z0-9 ]{1,64}") {
            let buf = tag(&[frame(b"TIT2", title.as_bytes())]);
            prop_assert_eq!(extract(&buf).title, Some(title));
        }
    }
}
