//! core/mod.rs
//!
//! The brain of the app:
//! - Discover candidate audio file paths (filesystem walk)
//! - Read tags (hand-rolled ID3v2 reader)
//! - Keep the playback session and talk to the engine
//! - Return plain data structs for the GUI to render
//!
//! The load pipeline is explicit:
//!   (A) discover paths -> Vec<PathBuf>
//!   (B) read tags -> Vec<Track>

pub mod config;
pub mod library;
pub mod playback;
pub mod session;
pub mod tags;
pub mod types;

use std::collections::HashSet;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use library::LibraryError;
use types::Track;

/// Discover candidate audio files under multiple roots.
///
/// - De-dupes across overlapping roots by full path
/// - Sorts paths once (core owns ordering, GUI shouldn't)
pub fn scan_paths(roots: &[PathBuf], extensions: &[String]) -> Result<Vec<PathBuf>, LibraryError> {
    let mut seen: HashSet<PathBuf> = HashSet::with_capacity(1024);
    let mut out: Vec<PathBuf> = Vec::new();

    for root in roots {
        for path in library::scan_audio_files(root, extensions)? {
            if seen.insert(path.clone()) {
                out.push(path);
            }
        }
    }

    out.sort();
    Ok(out)
}

/// Read tags for a set of already-discovered audio paths.
///
/// - Never fails hard per-file: an unreadable file becomes an untagged Track
/// - Returns (tracks, read_failures)
pub fn read_tracks(paths: Vec<PathBuf>) -> (Vec<Track>, usize) {
    let mut tracks: Vec<Track> = Vec::with_capacity(paths.len());
    let mut failures: usize = 0;

    for path in paths {
        match tags::read_metadata(&path) {
            Ok(meta) => {
                if meta.is_empty() {
                    debug!(path = %path.display(), "no usable tag");
                }
                tracks.push(Track::from_metadata(path, meta));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "tag read failed");
                failures += 1;
                tracks.push(Track::untagged(path));
            }
        }
    }

    (tracks, failures)
}

/// scan_paths(roots) + read_tracks(paths).
pub fn scan_and_read_roots(
    roots: &[PathBuf],
    extensions: &[String],
) -> Result<(Vec<Track>, usize), LibraryError> {
    let paths = scan_paths(roots, extensions)?;
    let (tracks, failures) = read_tracks(paths);
    info!(tracks = tracks.len(), failures, "library loaded");
    Ok((tracks, failures))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn exts() -> Vec<String> {
        vec!["mp3".to_string()]
    }

    #[test]
    fn overlapping_roots_are_deduplicated_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(dir.path().join("b.mp3"), b"").unwrap();
        fs::write(sub.join("a.mp3"), b"").unwrap();

        let roots = vec![dir.path().to_path_buf(), sub.clone()];
        let paths = scan_paths(&roots, &exts()).unwrap();

        let mut expected = vec![dir.path().join("b.mp3"), sub.join("a.mp3")];
        expected.sort();
        assert_eq!(paths, expected);
    }

    #[test]
    fn tagged_and_untagged_files_both_become_tracks() {
        let dir = tempfile::tempdir().unwrap();

        // ID3 header + one TIT2 frame "Tagged".
        let mut tagged = b"ID3\x03\x00\x00\x00\x00\x00\x10".to_vec();
        tagged.extend_from_slice(b"TIT2\x00\x00\x00\x06\x00\x00Tagged");
        fs::write(dir.path().join("1.mp3"), &tagged).unwrap();
        fs::write(dir.path().join("plain name.mp3"), [0xFF, 0xFB, 0x90, 0x44]).unwrap();

        let (tracks, failures) = scan_and_read_roots(&[dir.path().to_path_buf()], &exts()).unwrap();

        assert_eq!(failures, 0);
        let titles: Vec<&str> = tracks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Tagged", "plain name"]);
        assert!(tracks.iter().all(|t| t.artist == types::UNKNOWN_ARTIST));
    }

    #[test]
    fn unreadable_path_counts_as_failure() {
        let dir = tempfile::tempdir().unwrap();
        let (tracks, failures) = read_tracks(vec![dir.path().join("gone.mp3")]);

        assert_eq!(failures, 1);
        assert_eq!(tracks[0].title, "gone");
    }
}
