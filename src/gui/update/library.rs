//! gui/update/library.rs
//! Folder load lifecycle + playlist panel toggles.
//!
//! The load runs the explicit core pipeline off-thread:
//!   (A) core::scan_paths(roots) -> Vec<PathBuf>
//!   (B) core::read_tracks(paths) -> (Vec<Track>, failures)
//! and hands the result to the session, which starts track 0.

use iced::Task;

use crate::core;
use crate::core::session::Command;
use crate::core::types::Track;

use super::super::state::{Message, Vinyl};
use super::super::util::{folder_path, load_status};
use super::playback::dispatch;
use super::util::spawn_blocking;

pub(crate) fn folder_input_changed(state: &mut Vinyl, s: String) -> Task<Message> {
    state.folder_input = s;
    Task::none()
}

pub(crate) fn load_folder(state: &mut Vinyl) -> Task<Message> {
    if state.loading {
        return Task::none();
    }

    let Some(root) = folder_path(&state.folder_input) else {
        state.status = "Enter a folder path first.".to_string();
        return Task::none();
    };

    state.loading = true;
    state.status = format!("Loading {}...", root.display());

    let extensions = state.config.extensions.clone();

    Task::perform(
        spawn_blocking(move || {
            core::scan_and_read_roots(&[root], &extensions).map_err(|e| e.to_string())
        }),
        |result| {
            Message::LoadFinished(
                result.unwrap_or_else(|| Err("load worker stopped unexpectedly".to_string())),
            )
        },
    )
}

pub(crate) fn load_finished(
    state: &mut Vinyl,
    result: Result<(Vec<Track>, usize), String>,
) -> Task<Message> {
    state.loading = false;

    match result {
        Ok((tracks, failures)) => {
            state.status = load_status(tracks.len(), failures);
            state.search.clear();
            state.seek_preview_ratio = None;
            dispatch(state, Command::Load(tracks))
        }
        Err(e) => {
            // Keep the previous playlist; just report.
            state.status = format!("Load error: {e}");
            Task::none()
        }
    }
}

pub(crate) fn search_changed(state: &mut Vinyl, s: String) -> Task<Message> {
    state.search = s;
    Task::none()
}

pub(crate) fn toggle_playlist(state: &mut Vinyl) -> Task<Message> {
    state.playlist_expanded = !state.playlist_expanded;
    Task::none()
}
