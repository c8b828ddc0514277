//! core/session.rs
//!
//! The playback session: playlist, current track, modes, sleep timer.
//!
//! All state changes go through one of two doors:
//! - `Session::apply(Command)` for user intent (buttons, keys)
//! - `Session::on_event(PlayerEvent)` for what the engine reports
//!
//! Both return the `PlayerCommand`s the caller must forward to the engine.
//! The session itself never touches audio, so it's fully testable.

use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use thiserror::Error;
use tracing::{debug, info};

use super::playback::{PlayerCommand, PlayerEvent};
use super::types::Track;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("track {index} is out of range (playlist has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("sleep timer needs a positive number of minutes")]
    InvalidSleepMinutes,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Load(Vec<Track>),
    PlayIndex(usize),
    TogglePlayPause,
    Next,
    Prev,
    /// 0.0..=1.0 of the current track's duration.
    Seek(f32),
    SetVolume(f32),
    ToggleShuffle,
    ToggleRepeat,
    SetSleepTimer(u32),
    CancelSleepTimer,
    Tick,
}

#[derive(Debug, Clone)]
pub struct Session {
    playlist: Vec<Track>,
    current: Option<usize>,
    is_playing: bool,

    /// The engine holds a sink for `current`. False after an error, stop or
    /// end of track, when `Resume` would have nothing to resume.
    loaded: bool,

    shuffled: bool,
    repeat: bool,
    volume: f32,

    position_ms: u64,
    duration_ms: Option<u64>,

    sleep_deadline: Option<Instant>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Session {
    pub fn new(volume: f32) -> Self {
        Self {
            playlist: Vec::new(),
            current: None,
            is_playing: false,
            loaded: false,
            shuffled: false,
            repeat: false,
            volume: volume.clamp(0.0, 1.0),
            position_ms: 0,
            duration_ms: None,
            sleep_deadline: None,
        }
    }

    pub fn apply(&mut self, cmd: Command) -> Result<Vec<PlayerCommand>, SessionError> {
        self.apply_at(cmd, Instant::now())
    }

    /// Like `apply`, with an explicit clock for the sleep timer.
    pub fn apply_at(
        &mut self,
        cmd: Command,
        now: Instant,
    ) -> Result<Vec<PlayerCommand>, SessionError> {
        match cmd {
            Command::Load(tracks) => Ok(self.load(tracks)),

            Command::PlayIndex(index) => {
                if index >= self.playlist.len() {
                    return Err(SessionError::IndexOutOfRange {
                        index,
                        len: self.playlist.len(),
                    });
                }
                Ok(self.play(index))
            }

            Command::TogglePlayPause => Ok(match self.current {
                None if self.playlist.is_empty() => Vec::new(),
                None => self.play(0),
                Some(_) if self.is_playing => {
                    self.is_playing = false;
                    vec![PlayerCommand::Pause]
                }
                Some(i) if !self.loaded => self.play(i),
                Some(_) => {
                    self.is_playing = true;
                    vec![PlayerCommand::Resume]
                }
            }),

            Command::Next => Ok(self.step(1)),
            Command::Prev => Ok(self.step(-1)),

            Command::Seek(ratio) => Ok(self.seek(ratio)),

            Command::SetVolume(v) => {
                if !v.is_finite() {
                    return Ok(Vec::new());
                }
                self.volume = v.clamp(0.0, 1.0);
                Ok(vec![PlayerCommand::SetVolume(self.volume)])
            }

            Command::ToggleShuffle => {
                self.shuffled = !self.shuffled;
                if self.shuffled {
                    self.shuffle();
                } else {
                    self.sort_by_title();
                }
                Ok(Vec::new())
            }

            Command::ToggleRepeat => {
                self.repeat = !self.repeat;
                Ok(Vec::new())
            }

            Command::SetSleepTimer(minutes) => {
                if minutes == 0 {
                    return Err(SessionError::InvalidSleepMinutes);
                }
                self.sleep_deadline = Some(now + Duration::from_secs(u64::from(minutes) * 60));
                info!(minutes, "sleep timer set");
                Ok(Vec::new())
            }

            Command::CancelSleepTimer => {
                self.sleep_deadline = None;
                Ok(Vec::new())
            }

            Command::Tick => Ok(self.tick(now)),
        }
    }

    /// Fold an engine event into the session.
    pub fn on_event(&mut self, event: PlayerEvent) -> Vec<PlayerCommand> {
        match event {
            PlayerEvent::Started { duration_ms, .. } => {
                self.is_playing = true;
                self.loaded = true;
                self.position_ms = 0;
                self.duration_ms = duration_ms;
            }
            PlayerEvent::Paused => self.is_playing = false,
            PlayerEvent::Resumed => self.is_playing = true,
            PlayerEvent::Stopped | PlayerEvent::Error(_) => {
                self.is_playing = false;
                self.loaded = false;
                self.position_ms = 0;
            }
            PlayerEvent::Position { position_ms } => self.position_ms = position_ms,
            PlayerEvent::TrackEnded { path } => {
                // Ended before the user moved on; the newer track is still playing.
                let finished = self
                    .current
                    .filter(|&i| self.playlist.get(i).is_some_and(|t| t.path == path));
                let Some(i) = finished else {
                    debug!(path = %path.display(), "ignoring end of a track no longer current");
                    return Vec::new();
                };

                self.loaded = false;
                return if self.repeat { self.play(i) } else { self.step(1) };
            }
        }
        Vec::new()
    }

    // ---------------------------------------------------------------------
    // Reads
    // ---------------------------------------------------------------------

    pub fn playlist(&self) -> &[Track] {
        &self.playlist
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.playlist.get(i))
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    pub fn is_repeat(&self) -> bool {
        self.repeat
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn position_ms(&self) -> u64 {
        self.position_ms
    }

    pub fn duration_ms(&self) -> Option<u64> {
        self.duration_ms
    }

    /// Position as 0.0..=1.0, or 0.0 while the duration is unknown.
    pub fn progress(&self) -> f32 {
        match self.duration_ms {
            Some(d) if d > 0 => (self.position_ms as f64 / d as f64).clamp(0.0, 1.0) as f32,
            _ => 0.0,
        }
    }

    pub fn sleep_remaining(&self, now: Instant) -> Option<Duration> {
        self.sleep_deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Indices of tracks whose title contains `term`, ignoring case.
    /// An empty term matches everything.
    pub fn matching(&self, term: &str) -> Vec<usize> {
        let needle = term.trim().to_lowercase();
        self.playlist
            .iter()
            .enumerate()
            .filter(|(_, t)| needle.is_empty() || t.title.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect()
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn load(&mut self, tracks: Vec<Track>) -> Vec<PlayerCommand> {
        self.playlist = tracks;
        self.current = None;
        self.position_ms = 0;
        self.duration_ms = None;

        if self.shuffled {
            self.playlist.shuffle(&mut rand::rng());
        }

        if self.playlist.is_empty() {
            self.is_playing = false;
            self.loaded = false;
            return vec![PlayerCommand::Stop];
        }
        self.play(0)
    }

    fn play(&mut self, index: usize) -> Vec<PlayerCommand> {
        let Some(track) = self.playlist.get(index) else {
            return Vec::new();
        };
        debug!(index, title = %track.title, "play");

        let cmd = PlayerCommand::PlayFile(track.path.clone());
        self.current = Some(index);
        self.is_playing = true;
        self.loaded = true;
        self.position_ms = 0;
        self.duration_ms = None;
        vec![cmd]
    }

    /// Wraps around both ends. With nothing current, starts at the top.
    fn step(&mut self, delta: isize) -> Vec<PlayerCommand> {
        let len = self.playlist.len();
        if len == 0 {
            return Vec::new();
        }

        let next = match self.current {
            Some(i) => (i as isize + delta).rem_euclid(len as isize) as usize,
            None => 0,
        };
        self.play(next)
    }

    fn seek(&mut self, ratio: f32) -> Vec<PlayerCommand> {
        let Some(duration) = self.duration_ms else {
            return Vec::new();
        };
        if self.current.is_none() || !ratio.is_finite() {
            return Vec::new();
        }

        let target = (duration as f64 * f64::from(ratio.clamp(0.0, 1.0))).round() as u64;
        // Seeking to the very end makes some decoders fail; stop just short.
        let target = target.min(duration.saturating_sub(1));
        self.position_ms = target;
        vec![PlayerCommand::Seek(target)]
    }

    fn shuffle(&mut self) {
        let playing = self.current_track().map(|t| t.path.clone());
        self.playlist.shuffle(&mut rand::rng());
        self.current = playing.and_then(|p| self.playlist.iter().position(|t| t.path == p));
    }

    fn sort_by_title(&mut self) {
        let playing = self.current_track().map(|t| t.path.clone());
        self.playlist.sort_by_cached_key(|t| t.title.to_lowercase());
        self.current = playing.and_then(|p| self.playlist.iter().position(|t| t.path == p));
    }

    fn tick(&mut self, now: Instant) -> Vec<PlayerCommand> {
        match self.sleep_deadline {
            Some(deadline) if now >= deadline => {
                self.sleep_deadline = None;
                info!("sleep timer expired");
                if self.is_playing {
                    self.is_playing = false;
                    vec![PlayerCommand::Pause]
                } else {
                    Vec::new()
                }
            }
            _ => Vec::new(),
        }
    }
}

/// "m:ss", minutes unbounded.
pub fn format_time(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Button text for a sleep preset: whole hours read as "1 h", the rest as "25 min".
pub fn preset_label(minutes: u32) -> String {
    if minutes >= 60 && minutes % 60 == 0 {
        format!("{} h", minutes / 60)
    } else {
        format!("{minutes} min")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::PathBuf;

    fn track(title: &str) -> Track {
        Track {
            path: PathBuf::from(format!("/music/{title}.mp3")),
            title: title.to_string(),
            artist: "A".to_string(),
            album: None,
            has_cover: false,
        }
    }

    fn loaded(titles: &[&str]) -> Session {
        let mut s = Session::default();
        s.apply(Command::Load(titles.iter().map(|t| track(t)).collect()))
            .unwrap();
        s
    }

    fn play_file(title: &str) -> PlayerCommand {
        PlayerCommand::PlayFile(PathBuf::from(format!("/music/{title}.mp3")))
    }

    fn ended(title: &str) -> PlayerEvent {
        PlayerEvent::TrackEnded {
            path: PathBuf::from(format!("/music/{title}.mp3")),
        }
    }

    #[test]
    fn load_starts_first_track() {
        let mut s = Session::default();
        let cmds = s
            .apply(Command::Load(vec![track("a"), track("b")]))
            .unwrap();

        assert_eq!(cmds, [play_file("a")]);
        assert_eq!(s.current_index(), Some(0));
        assert!(s.is_playing());
    }

    #[test]
    fn load_empty_stops() {
        let mut s = loaded(&["a"]);
        let cmds = s.apply(Command::Load(Vec::new())).unwrap();

        assert_eq!(cmds, [PlayerCommand::Stop]);
        assert_eq!(s.current_index(), None);
        assert!(!s.is_playing());
    }

    #[test]
    fn play_index_out_of_range() {
        let mut s = loaded(&["a", "b"]);
        assert_eq!(
            s.apply(Command::PlayIndex(2)),
            Err(SessionError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(s.current_index(), Some(0));
    }

    #[test]
    fn next_and_prev_wrap() {
        let mut s = loaded(&["a", "b", "c"]);

        assert_eq!(s.apply(Command::Prev).unwrap(), [play_file("c")]);
        assert_eq!(s.apply(Command::Next).unwrap(), [play_file("a")]);
        assert_eq!(s.apply(Command::Next).unwrap(), [play_file("b")]);
    }

    #[test]
    fn next_on_empty_playlist_is_noop() {
        let mut s = Session::default();
        assert!(s.apply(Command::Next).unwrap().is_empty());
        assert!(s.apply(Command::Prev).unwrap().is_empty());
        assert_eq!(s.current_index(), None);
    }

    #[test]
    fn toggle_play_pause_cycles() {
        let mut s = loaded(&["a"]);

        assert_eq!(
            s.apply(Command::TogglePlayPause).unwrap(),
            [PlayerCommand::Pause]
        );
        assert!(!s.is_playing());
        assert_eq!(
            s.apply(Command::TogglePlayPause).unwrap(),
            [PlayerCommand::Resume]
        );
        assert!(s.is_playing());
    }

    #[test]
    fn toggle_play_pause_with_nothing_current_starts_top() {
        let mut s = loaded(&["x", "y"]);
        s.current = None;

        assert_eq!(s.apply(Command::TogglePlayPause).unwrap(), [play_file("x")]);
    }

    #[test]
    fn seek_scales_by_duration() {
        let mut s = loaded(&["a"]);
        s.on_event(PlayerEvent::Started {
            path: PathBuf::from("/music/a.mp3"),
            duration_ms: Some(200_000),
        });

        assert_eq!(
            s.apply(Command::Seek(0.25)).unwrap(),
            [PlayerCommand::Seek(50_000)]
        );
        assert_eq!(s.position_ms(), 50_000);

        // Clamped, and kept just inside the track.
        assert_eq!(
            s.apply(Command::Seek(7.0)).unwrap(),
            [PlayerCommand::Seek(199_999)]
        );
        assert_eq!(s.apply(Command::Seek(-1.0)).unwrap(), [PlayerCommand::Seek(0)]);
    }

    #[test]
    fn seek_without_duration_is_ignored() {
        let mut s = loaded(&["a"]);
        assert!(s.apply(Command::Seek(0.5)).unwrap().is_empty());
    }

    #[rstest]
    #[case(0.3, 0.3)]
    #[case(1.5, 1.0)]
    #[case(-0.2, 0.0)]
    fn volume_is_clamped(#[case] input: f32, #[case] expected: f32) {
        let mut s = Session::default();
        let cmds = s.apply(Command::SetVolume(input)).unwrap();
        assert_eq!(cmds, [PlayerCommand::SetVolume(expected)]);
        assert_eq!(s.volume(), expected);
    }

    #[test]
    fn shuffle_keeps_current_track_and_unshuffle_sorts() {
        let titles = ["delta", "Alpha", "charlie", "bravo", "echo", "foxtrot"];
        let mut s = loaded(&titles);
        s.apply(Command::PlayIndex(2)).unwrap();

        s.apply(Command::ToggleShuffle).unwrap();
        assert!(s.is_shuffled());
        assert_eq!(s.playlist().len(), titles.len());
        assert_eq!(s.current_track().map(|t| t.title.as_str()), Some("charlie"));

        let mut seen: Vec<&str> = s.playlist().iter().map(|t| t.title.as_str()).collect();
        seen.sort();
        let mut expected = titles.to_vec();
        expected.sort();
        assert_eq!(seen, expected);

        s.apply(Command::ToggleShuffle).unwrap();
        let order: Vec<&str> = s.playlist().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(
            order,
            ["Alpha", "bravo", "charlie", "delta", "echo", "foxtrot"]
        );
        assert_eq!(s.current_index(), Some(2));
    }

    #[test]
    fn track_end_advances_or_repeats() {
        let mut s = loaded(&["a", "b"]);

        assert_eq!(s.on_event(ended("a")), [play_file("b")]);
        assert_eq!(s.on_event(ended("b")), [play_file("a")]);

        s.apply(Command::ToggleRepeat).unwrap();
        assert_eq!(s.on_event(ended("a")), [play_file("a")]);
        assert_eq!(s.current_index(), Some(0));
    }

    #[test]
    fn late_end_of_a_skipped_track_is_ignored() {
        let mut s = loaded(&["a", "b", "c"]);
        s.apply(Command::Next).unwrap();

        // "a" finished in the engine before it saw PlayFile("b").
        assert!(s.on_event(ended("a")).is_empty());
        assert_eq!(s.current_index(), Some(1));
        assert!(s.is_playing());
    }

    #[test]
    fn play_after_failed_start_replays_instead_of_resuming() {
        let mut s = loaded(&["a", "b"]);
        s.on_event(PlayerEvent::Error("unsupported format".into()));
        assert!(!s.is_playing());

        assert_eq!(s.apply(Command::TogglePlayPause).unwrap(), [play_file("a")]);
        assert!(s.is_playing());
    }

    #[test]
    fn play_after_stop_replays_current_track() {
        let mut s = loaded(&["a", "b"]);
        s.apply(Command::Next).unwrap();
        s.on_event(PlayerEvent::Stopped);

        assert_eq!(s.apply(Command::TogglePlayPause).unwrap(), [play_file("b")]);
    }

    #[test]
    fn engine_events_update_state() {
        let mut s = loaded(&["a"]);
        s.on_event(PlayerEvent::Started {
            path: PathBuf::from("/music/a.mp3"),
            duration_ms: Some(10_000),
        });
        s.on_event(PlayerEvent::Position { position_ms: 2_500 });

        assert_eq!(s.position_ms(), 2_500);
        assert_eq!(s.progress(), 0.25);

        s.on_event(PlayerEvent::Error("device lost".into()));
        assert!(!s.is_playing());
    }

    #[test]
    fn sleep_timer_pauses_when_due() {
        let mut s = loaded(&["a"]);
        let t0 = Instant::now();

        s.apply_at(Command::SetSleepTimer(15), t0).unwrap();
        assert_eq!(
            s.sleep_remaining(t0 + Duration::from_secs(60)),
            Some(Duration::from_secs(14 * 60))
        );

        let early = s
            .apply_at(Command::Tick, t0 + Duration::from_secs(14 * 60))
            .unwrap();
        assert!(early.is_empty());
        assert!(s.is_playing());

        let due = s
            .apply_at(Command::Tick, t0 + Duration::from_secs(15 * 60))
            .unwrap();
        assert_eq!(due, [PlayerCommand::Pause]);
        assert!(!s.is_playing());
        assert_eq!(s.sleep_remaining(t0), None);
    }

    #[test]
    fn new_sleep_timer_replaces_old_and_cancel_clears() {
        let mut s = loaded(&["a"]);
        let t0 = Instant::now();

        s.apply_at(Command::SetSleepTimer(60), t0).unwrap();
        s.apply_at(Command::SetSleepTimer(1), t0).unwrap();
        assert_eq!(s.sleep_remaining(t0), Some(Duration::from_secs(60)));

        s.apply(Command::CancelSleepTimer).unwrap();
        let cmds = s
            .apply_at(Command::Tick, t0 + Duration::from_secs(3600))
            .unwrap();
        assert!(cmds.is_empty());
        assert!(s.is_playing());
    }

    #[test]
    fn zero_minute_sleep_timer_is_rejected() {
        let mut s = Session::default();
        assert_eq!(
            s.apply(Command::SetSleepTimer(0)),
            Err(SessionError::InvalidSleepMinutes)
        );
    }

    #[test]
    fn matching_ignores_case() {
        let s = loaded(&["Blue Monday", "Ceremony", "blue train"]);
        assert_eq!(s.matching("BLUE"), [0, 2]);
        assert_eq!(s.matching(""), [0, 1, 2]);
        assert!(s.matching("zzz").is_empty());
    }

    #[rstest]
    #[case(0, "0:00")]
    #[case(59_999, "0:59")]
    #[case(61_000, "1:01")]
    #[case(3_725_000, "62:05")]
    fn formats_time(#[case] ms: u64, #[case] expected: &str) {
        assert_eq!(format_time(ms), expected);
    }

    #[rstest]
    #[case(15, "15 min")]
    #[case(25, "25 min")]
    #[case(60, "1 h")]
    #[case(90, "90 min")]
    #[case(240, "4 h")]
    fn labels_presets(#[case] minutes: u32, #[case] expected: &str) {
        assert_eq!(preset_label(minutes), expected);
    }
}
