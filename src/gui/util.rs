//! Small pure helper functions used by the GUI.
//! - no UI widgets or state mutation

use std::path::PathBuf;
use std::time::Duration;

use crate::core::session::format_time;
use crate::core::types::Track;

/// Folder input -> path. Blank input -> None.
pub(crate) fn folder_path(input: &str) -> Option<PathBuf> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}

/// Custom sleep minutes. Only positive whole numbers are accepted.
pub(crate) fn parse_minutes(s: &str) -> Option<u32> {
    s.trim().parse::<u32>().ok().filter(|&m| m > 0)
}

pub(crate) fn load_status(tracks: usize, failures: usize) -> String {
    match (tracks, failures) {
        (0, _) => "No audio files found in that folder.".to_string(),
        (n, 0) => format!("Loaded {n} tracks"),
        (n, f) => format!("Loaded {n} tracks ({f} unreadable)"),
    }
}

/// (title line, artist line) for the now-playing panel.
pub(crate) fn now_playing_text(track: Option<&Track>) -> (String, String) {
    match track {
        Some(t) => (t.title.clone(), t.artist.clone()),
        None => (
            "No track selected".to_string(),
            "Select a track to play".to_string(),
        ),
    }
}

/// "1:02 / 3:45", or "1:02 / -:--" while the duration is unknown.
pub(crate) fn time_label(position_ms: u64, duration_ms: Option<u64>) -> String {
    match duration_ms {
        Some(d) => format!("{} / {}", format_time(position_ms.min(d)), format_time(d)),
        None => format!("{} / -:--", format_time(position_ms)),
    }
}

pub(crate) fn sleep_label(remaining: Option<Duration>) -> String {
    match remaining {
        Some(r) => format!("Sleep in {}", format_time(r.as_millis() as u64)),
        None => "Sleep timer off".to_string(),
    }
}
