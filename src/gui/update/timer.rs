//! gui/update/timer.rs
//! Sleep timer: presets, custom minutes, expiry on tick.

use std::time::Instant;

use iced::Task;

use crate::core::session::{Command, preset_label};

use super::super::state::{Message, Vinyl};
use super::super::util::parse_minutes;
use super::playback::dispatch;

pub(crate) fn start(state: &mut Vinyl, minutes: u32) -> Task<Message> {
    let task = dispatch(state, Command::SetSleepTimer(minutes));
    if state.session.sleep_remaining(Instant::now()).is_some() {
        state.status = format!("Sleep timer set for {}", preset_label(minutes));
    }
    task
}

pub(crate) fn input_changed(state: &mut Vinyl, s: String) -> Task<Message> {
    state.sleep_input = s;
    Task::none()
}

pub(crate) fn start_custom(state: &mut Vinyl) -> Task<Message> {
    let Some(minutes) = parse_minutes(&state.sleep_input) else {
        state.status = "Please enter a valid number of minutes.".to_string();
        return Task::none();
    };

    state.sleep_input.clear();
    start(state, minutes)
}

pub(crate) fn cancel(state: &mut Vinyl) -> Task<Message> {
    state.status = "Sleep timer cancelled".to_string();
    dispatch(state, Command::CancelSleepTimer)
}

pub(crate) fn tick(state: &mut Vinyl) -> Task<Message> {
    let armed = state.session.sleep_remaining(Instant::now()).is_some();
    let task = dispatch(state, Command::Tick);

    if armed && state.session.sleep_remaining(Instant::now()).is_none() {
        state.status = "Sleep timer ended".to_string();
    }
    task
}
