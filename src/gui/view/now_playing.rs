//! Now-playing panel (cover, title/artist, sleep timer).

use std::time::Instant;

use iced::widget::{Column, button, column, row, text, text_input};
use iced::{Alignment, Length};

use crate::core::session::preset_label;

use super::super::state::{Message, Vinyl};
use super::super::util::{now_playing_text, sleep_label};
use super::constants::{COVER_BIG, MINUTES_W};
use super::widgets::cover_art;

pub(crate) fn build_now_playing(state: &Vinyl) -> Column<'_, Message> {
    let (title, artist) = now_playing_text(state.session.current_track());

    column![
        cover_art(state.cover.as_ref(), COVER_BIG),
        text(title).size(18),
        text(artist).size(14),
        build_sleep_timer(state),
    ]
    .spacing(10)
    .align_x(Alignment::Center)
}

fn build_sleep_timer(state: &Vinyl) -> Column<'_, Message> {
    let remaining = state.session.sleep_remaining(Instant::now());

    let mut presets = row![].spacing(6);
    for &minutes in &state.config.sleep_presets {
        presets = presets.push(
            button(text(preset_label(minutes)).size(12)).on_press(Message::SleepPreset(minutes)),
        );
    }

    let custom = row![
        text_input("min", &state.sleep_input)
            .on_input(Message::SleepInputChanged)
            .on_submit(Message::StartCustomSleep)
            .width(Length::Fixed(MINUTES_W)),
        button("Start").on_press(Message::StartCustomSleep),
        button("Cancel").on_press_maybe(remaining.map(|_| Message::CancelSleep)),
    ]
    .spacing(6)
    .align_y(Alignment::Center);

    column![
        text(sleep_label(remaining)).size(14),
        presets.wrap(),
        custom,
    ]
    .spacing(8)
    .align_x(Alignment::Center)
}
