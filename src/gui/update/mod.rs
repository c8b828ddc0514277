//! gui/update/mod.rs
//! Update logic (router).
//! Mutates state in response to `Message` events.

use iced::Task;

use super::state::{Message, Vinyl};

mod library;
mod playback;
mod timer;
mod util;

pub(crate) fn update(state: &mut Vinyl, message: Message) -> Task<Message> {
    match message {
        Message::TickPlayback => {
            let events = playback::drain_events(state);
            let sleep = timer::tick(state);
            Task::batch([events, sleep])
        }

        // Library
        Message::FolderInputChanged(s) => library::folder_input_changed(state, s),
        Message::LoadFolder => library::load_folder(state),
        Message::LoadFinished(result) => library::load_finished(state, result),

        // Playlist panel
        Message::SearchChanged(s) => library::search_changed(state, s),
        Message::TogglePlaylist => library::toggle_playlist(state),

        // Transport
        Message::PlayTrack(i) => playback::play_track(state, i),
        Message::TogglePlayPause => playback::toggle_play_pause(state),
        Message::Next => playback::next(state),
        Message::Prev => playback::prev(state),
        Message::ToggleShuffle => playback::toggle_shuffle(state),
        Message::ToggleRepeat => playback::toggle_repeat(state),

        // Seek: preview vs commit
        Message::SeekPreview(ratio) => playback::seek_preview(state, ratio),
        Message::SeekCommit => playback::seek_commit(state),

        Message::SetVolume(vol) => playback::set_volume(state, vol),

        // Sleep timer
        Message::SleepPreset(minutes) => timer::start(state, minutes),
        Message::SleepInputChanged(s) => timer::input_changed(state, s),
        Message::StartCustomSleep => timer::start_custom(state),
        Message::CancelSleep => timer::cancel(state),

        // Cover
        Message::CoverLoaded(path, handle) => playback::cover_loaded(state, path, handle),
    }
}
