//! GUI state + messages.
//! Pure data definitions used by update/ + view/.

use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use iced::Task;
use iced::widget::image;
use tracing::warn;

use crate::core::config::PlayerConfig;
use crate::core::playback::{PlaybackController, PlayerEvent};
use crate::core::session::Session;
use crate::core::types::Track;

/// App state
pub(crate) struct Vinyl {
    pub config: PlayerConfig,
    pub session: Session,

    pub status: String,
    pub loading: bool,

    // Inputs
    pub folder_input: String,
    pub search: String,
    pub sleep_input: String,

    // UI toggles
    pub playlist_expanded: bool,

    /// While the seek slider is dragged: the ratio under the thumb.
    pub seek_preview_ratio: Option<f32>,

    // Cover of the current track (loaded off-thread)
    pub cover: Option<image::Handle>,
    pub cover_path: Option<PathBuf>,

    // Engine (started lazily on first playback command)
    pub playback: Option<PlaybackController>,
    pub playback_events: Option<Receiver<PlayerEvent>>,
}

impl Vinyl {
    pub(crate) fn new(config: PlayerConfig) -> Self {
        let folder_input = config
            .music_dir
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        Self {
            session: Session::new(config.initial_volume),
            config,

            status: "Enter a music folder, then Load.".to_string(),
            loading: false,

            folder_input,
            search: String::new(),
            sleep_input: String::new(),

            playlist_expanded: true,
            seek_preview_ratio: None,

            cover: None,
            cover_path: None,

            playback: None,
            playback_events: None,
        }
    }
}

/// Initial state + startup task.
///
/// A bad config file is reported in the status line; the app still starts on defaults.
pub(crate) fn boot() -> (Vinyl, Task<Message>) {
    let (config, config_error) = match PlayerConfig::load() {
        Ok(config) => (config, None),
        Err(e) => {
            warn!(error = %e, "config not loaded, using defaults");
            (PlayerConfig::default(), Some(e.to_string()))
        }
    };

    let autoload = config.music_dir.is_some();
    let mut state = Vinyl::new(config);

    if let Some(e) = config_error {
        state.status = format!("Config error: {e}");
    }

    let task = if autoload {
        Task::done(Message::LoadFolder)
    } else {
        Task::none()
    };

    (state, task)
}

/// Message = “something happened”.
#[derive(Debug, Clone)]
pub(crate) enum Message {
    // Library
    FolderInputChanged(String),
    LoadFolder,
    LoadFinished(Result<(Vec<Track>, usize), String>),

    // Playlist panel
    SearchChanged(String),
    TogglePlaylist,

    // Transport
    PlayTrack(usize),
    TogglePlayPause,
    Next,
    Prev,
    ToggleShuffle,
    ToggleRepeat,

    // Seek: preview vs commit
    SeekPreview(f32),
    SeekCommit,

    SetVolume(f32),

    // Sleep timer
    SleepPreset(u32),
    SleepInputChanged(String),
    StartCustomSleep,
    CancelSleep,

    // Cover
    CoverLoaded(PathBuf, Option<image::Handle>),

    // Engine events + sleep timer
    TickPlayback,
}
