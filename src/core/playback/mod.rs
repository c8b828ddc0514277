//! core/playback/mod.rs
//! Playback engine thread + the channel pair the GUI talks through.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use thiserror::Error;
use tracing::error;

mod engine;
mod probe;

pub use engine::PlaybackEngine;

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("audio output unavailable: {0}")]
    Output(String),

    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("decode failed: {0}")]
    Decode(String),
}

#[derive(Clone)]
pub struct PlaybackController {
    command_tx: Sender<PlayerCommand>,
}

impl PlaybackController {
    /// Best-effort send. If the engine died, the command is dropped.
    pub fn send(&self, cmd: PlayerCommand) {
        let _ = self.command_tx.send(cmd);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    PlayFile(PathBuf),
    Pause,
    Resume,
    Stop,
    Seek(u64),      // ms
    SetVolume(f32), // 0.0..=1.0
    Shutdown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    Started {
        path: PathBuf,
        duration_ms: Option<u64>,
    },
    Paused,
    Resumed,
    Stopped,
    Position {
        position_ms: u64,
    },
    /// Carries the finished file so a late event can't end a newer track.
    TrackEnded {
        path: PathBuf,
    },
    Error(String),
}

/// Spawns the playback thread and returns:
/// - PlaybackController (store in GUI state)
/// - Receiver<PlayerEvent> (drained on every GUI tick)
pub fn start_playback(tick: Duration, volume: f32) -> (PlaybackController, Receiver<PlayerEvent>) {
    let (command_tx, command_rx) = mpsc::channel::<PlayerCommand>();
    let (event_tx, event_rx) = mpsc::channel::<PlayerEvent>();

    thread::spawn(move || {
        let mut engine = match PlaybackEngine::new(event_tx.clone(), volume) {
            Ok(e) => e,
            Err(e) => {
                error!(error = %e, "playback engine failed to start");
                let _ = event_tx.send(PlayerEvent::Error(e.to_string()));
                return;
            }
        };

        engine.run(command_rx, tick);
    });

    (PlaybackController { command_tx }, event_rx)
}
