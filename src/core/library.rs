//! core/library.rs
//! Walk a folder tree and collect playable audio files.

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("not a folder: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("{}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Every file under `root` whose extension is in `extensions` (case-insensitive).
///
/// Symlinks are not followed, so a link back to an ancestor can't loop the walk.
pub fn scan_audio_files(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, LibraryError> {
    if !root.is_dir() {
        return Err(LibraryError::NotADirectory(root.to_path_buf()));
    }

    let mut out = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|source| LibraryError::Walk {
            path: source.path().unwrap_or(root).to_path_buf(),
            source,
        })?;

        if entry.file_type().is_file() && is_audio(entry.path(), extensions) {
            out.push(entry.into_path());
        }
    }

    Ok(out)
}

pub fn is_audio(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}
