//! core/playback/engine.rs
//! Playback engine (rodio owner).
//!
//! Owns:
//! - OutputStream (must stay alive)
//! - Sink (per current track)
//! - command loop + periodic position ticks
//!
//! Emits PlayerEvent back via a channel.
//! No Iced imports.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::{debug, info, warn};

use super::probe::probe_duration_ms;
use super::{PlaybackError, PlayerCommand, PlayerEvent};

pub struct PlaybackEngine {
    // Keep this alive for the lifetime of the engine!
    stream: OutputStream,

    // Current playback
    sink: Option<Sink>,
    current_path: Option<PathBuf>,

    // Applied to every new sink, not just the current one.
    volume: f32,

    // Event channel
    event_tx: Sender<PlayerEvent>,
}

impl PlaybackEngine {
    pub fn new(event_tx: Sender<PlayerEvent>, volume: f32) -> Result<Self, PlaybackError> {
        let stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| PlaybackError::Output(e.to_string()))?;

        Ok(Self {
            stream,
            sink: None,
            current_path: None,
            volume: volume.clamp(0.0, 1.0),
            event_tx,
        })
    }

    pub fn run(&mut self, command_rx: Receiver<PlayerCommand>, tick: Duration) {
        loop {
            match command_rx.recv_timeout(tick) {
                Ok(cmd) => {
                    if self.handle_command(cmd) {
                        break;
                    }
                    // Drain anything queued behind it before the next tick.
                    while let Ok(cmd) = command_rx.try_recv() {
                        if self.handle_command(cmd) {
                            self.stop_internal();
                            return;
                        }
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            self.tick();
        }

        self.stop_internal();
        info!("playback engine stopped");
    }

    /// Returns true on Shutdown.
    fn handle_command(&mut self, cmd: PlayerCommand) -> bool {
        debug!(?cmd, "engine command");

        match cmd {
            PlayerCommand::PlayFile(path) => {
                if let Err(e) = self.play_file(path) {
                    warn!(error = %e, "play failed");
                    self.emit(PlayerEvent::Error(e.to_string()));
                }
            }
            PlayerCommand::Pause => {
                if let Some(sink) = &self.sink {
                    sink.pause();
                    self.emit(PlayerEvent::Paused);
                }
            }
            PlayerCommand::Resume => {
                if let Some(sink) = &self.sink {
                    sink.play();
                    self.emit(PlayerEvent::Resumed);
                }
            }
            PlayerCommand::Stop => {
                self.stop_internal();
                self.emit(PlayerEvent::Stopped);
            }
            PlayerCommand::Seek(ms) => {
                if let Some(sink) = &self.sink {
                    // The sink keeps playing on failure; report where it really is.
                    if let Err(e) = sink.try_seek(Duration::from_millis(ms)) {
                        warn!(ms, error = %e, "seek failed (decoder may not support it)");
                        let position_ms = sink.get_pos().as_millis() as u64;
                        self.emit(PlayerEvent::Position { position_ms });
                    }
                }
            }
            PlayerCommand::SetVolume(v) => {
                self.volume = v.clamp(0.0, 1.0);
                if let Some(sink) = &self.sink {
                    sink.set_volume(self.volume);
                }
            }
            PlayerCommand::Shutdown => return true,
        }

        false
    }

    fn tick(&mut self) {
        let Some(sink) = &self.sink else {
            return;
        };

        let position_ms = sink.get_pos().as_millis() as u64;
        let ended = sink.empty();

        self.emit(PlayerEvent::Position { position_ms });

        if ended {
            if let Some(path) = self.current_path.clone() {
                self.stop_internal();
                self.emit(PlayerEvent::TrackEnded { path });
            }
        }
    }

    fn play_file(&mut self, path: PathBuf) -> Result<(), PlaybackError> {
        self.stop_internal();

        let file = File::open(&path).map_err(|source| PlaybackError::Open {
            path: path.clone(),
            source,
        })?;

        let decoder =
            Decoder::new(BufReader::new(file)).map_err(|e| PlaybackError::Decode(e.to_string()))?;

        // rodio often can't tell for VBR mp3; symphonia reads the container.
        let duration_ms = decoder
            .total_duration()
            .map(|d| d.as_millis() as u64)
            .or_else(|| probe_duration_ms(&path));

        // rodio 0.21.x: Sink is created from the stream's mixer
        let sink = Sink::connect_new(self.stream.mixer());
        sink.set_volume(self.volume);
        sink.append(decoder);
        sink.play();

        info!(path = %path.display(), ?duration_ms, "playing");

        self.current_path = Some(path.clone());
        self.sink = Some(sink);
        self.emit(PlayerEvent::Started { path, duration_ms });

        Ok(())
    }

    fn stop_internal(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.current_path = None;
    }

    fn emit(&self, event: PlayerEvent) {
        let _ = self.event_tx.send(event);
    }
}
