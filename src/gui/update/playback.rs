//! gui/update/playback.rs
//! GUI-playback engine bridge
//!
//! - Every transport action becomes a `session::Command`.
//! - The session answers with engine commands; we forward them.
//! - Engine events are drained on TickPlayback and folded back into the session.
//!
//! GUI never touches rodio/symphonia directly.

use std::path::PathBuf;

use iced::Task;
use iced::widget::image;
use tracing::{debug, warn};

use crate::core::playback::{PlayerCommand, PlayerEvent, start_playback};
use crate::core::session::Command;
use crate::core::tags::read_embedded_art;

use super::super::state::{Message, Vinyl};
use super::util::spawn_blocking;

fn ensure_engine(state: &mut Vinyl) {
    if state.playback.is_some() && state.playback_events.is_some() {
        return;
    }

    let (controller, events) = start_playback(state.config.tick(), state.session.volume());
    state.playback = Some(controller);
    state.playback_events = Some(events);
}

fn forward(state: &mut Vinyl, cmds: Vec<PlayerCommand>) {
    if cmds.is_empty() {
        return;
    }

    ensure_engine(state);
    if let Some(controller) = &state.playback {
        for cmd in cmds {
            controller.send(cmd);
        }
    }
}

/// Apply a session command, forward the result, and keep the cover in sync.
pub(crate) fn dispatch(state: &mut Vinyl, cmd: Command) -> Task<Message> {
    match state.session.apply(cmd) {
        Ok(cmds) => forward(state, cmds),
        Err(e) => {
            warn!(error = %e, "session command rejected");
            state.status = e.to_string();
        }
    }

    sync_cover(state)
}

pub(crate) fn drain_events(state: &mut Vinyl) -> Task<Message> {
    let Some(rx) = state.playback_events.as_ref() else {
        return Task::none();
    };

    // Receiver::try_recv only needs &self.
    let drained: Vec<PlayerEvent> = rx.try_iter().collect();

    for ev in drained {
        handle_event(state, ev);
    }

    sync_cover(state)
}

fn handle_event(state: &mut Vinyl, event: PlayerEvent) {
    match &event {
        PlayerEvent::Started { path, .. } => {
            state.seek_preview_ratio = None;
            state.status = format!("Now playing: {}", path.display());
        }
        PlayerEvent::Error(err) => {
            state.status = format!("Playback error: {err}");
        }
        _ => {}
    }

    // If the user is dragging the seek slider, don't fight them.
    if matches!(event, PlayerEvent::Position { .. }) && state.seek_preview_ratio.is_some() {
        return;
    }

    let follow_up = state.session.on_event(event);
    forward(state, follow_up);
}

pub(crate) fn play_track(state: &mut Vinyl, index: usize) -> Task<Message> {
    dispatch(state, Command::PlayIndex(index))
}

pub(crate) fn toggle_play_pause(state: &mut Vinyl) -> Task<Message> {
    dispatch(state, Command::TogglePlayPause)
}

pub(crate) fn next(state: &mut Vinyl) -> Task<Message> {
    dispatch(state, Command::Next)
}

pub(crate) fn prev(state: &mut Vinyl) -> Task<Message> {
    dispatch(state, Command::Prev)
}

pub(crate) fn toggle_shuffle(state: &mut Vinyl) -> Task<Message> {
    dispatch(state, Command::ToggleShuffle)
}

pub(crate) fn toggle_repeat(state: &mut Vinyl) -> Task<Message> {
    dispatch(state, Command::ToggleRepeat)
}

/// Seek slider moved: preview only (UI updates, no engine command).
pub(crate) fn seek_preview(state: &mut Vinyl, ratio: f32) -> Task<Message> {
    if state.session.duration_ms().is_none() {
        return Task::none();
    }

    state.seek_preview_ratio = Some(ratio.clamp(0.0, 1.0));
    Task::none()
}

/// Seek slider released: commit the last preview to the engine.
pub(crate) fn seek_commit(state: &mut Vinyl) -> Task<Message> {
    let Some(ratio) = state.seek_preview_ratio.take() else {
        return Task::none();
    };

    debug!(ratio, "seek commit");
    dispatch(state, Command::Seek(ratio))
}

pub(crate) fn set_volume(state: &mut Vinyl, volume: f32) -> Task<Message> {
    dispatch(state, Command::SetVolume(volume))
}

/// Start a cover load when the current track changed.
fn sync_cover(state: &mut Vinyl) -> Task<Message> {
    let current = state.session.current_track().cloned();
    let current_path = current.as_ref().map(|t| t.path.clone());

    if current_path == state.cover_path {
        return Task::none();
    }

    state.cover = None;
    state.cover_path = current_path;

    let Some(track) = current else {
        return Task::none();
    };
    if !track.has_cover {
        return Task::none();
    }

    let path = track.path;
    let key = path.clone();

    Task::perform(
        spawn_blocking(move || match read_embedded_art(&path) {
            Ok(Some(cover)) => {
                debug!(
                    mime = %cover.mime_type,
                    picture_type = ?cover.picture_type,
                    description = %cover.description,
                    bytes = cover.data.len(),
                    "cover loaded"
                );
                Some(image::Handle::from_bytes(cover.data))
            }
            Ok(None) => None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cover load failed");
                None
            }
        }),
        move |handle| Message::CoverLoaded(key.clone(), handle.flatten()),
    )
}

pub(crate) fn cover_loaded(
    state: &mut Vinyl,
    path: PathBuf,
    handle: Option<image::Handle>,
) -> Task<Message> {
    // A slow load for a track we already skipped past.
    if state.cover_path.as_ref() != Some(&path) {
        return Task::none();
    }

    state.cover = handle;
    Task::none()
}
