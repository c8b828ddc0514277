//! Reusable small widgets/helpers used across view modules.

use iced::widget::{button, column, container, image, row, slider, text};
use iced::{Alignment, Element, Length};

use super::super::state::{Message, Vinyl};
use super::super::util::time_label;
use super::constants::VOLUME_W;

pub(crate) fn cover_placeholder(size: f32) -> iced::widget::Container<'static, Message> {
    container(
        column![text("♪").size(48), text("no cover").size(12)]
            .spacing(4)
            .align_x(Alignment::Center),
    )
    .width(Length::Fixed(size))
    .height(Length::Fixed(size))
    .center_x(Length::Fixed(size))
    .center_y(Length::Fixed(size))
}

/// If `handle` exists, show it; otherwise show the placeholder.
pub(crate) fn cover_art(handle: Option<&image::Handle>, size: f32) -> Element<'static, Message> {
    match handle {
        Some(h) => container(
            image(h.clone())
                .width(Length::Fixed(size))
                .height(Length::Fixed(size)),
        )
        .into(),
        None => cover_placeholder(size).into(),
    }
}

/// A toggle button whose label shows its state.
fn mode_button(label: &str, on: bool, msg: Message) -> iced::widget::Button<'static, Message> {
    let label = if on {
        format!("✓ {label}")
    } else {
        label.to_string()
    };
    button(text(label)).on_press(msg)
}

/// Bottom transport bar.
///
/// Emits only Messages (no rodio, no decoding).
pub(crate) fn transport_bar(state: &Vinyl) -> iced::widget::Container<'_, Message> {
    let session = &state.session;

    let play_label = if session.is_playing() { "Pause" } else { "Play" };

    let transport = row![
        button("⏮").on_press(Message::Prev),
        button(play_label).on_press(Message::TogglePlayPause),
        button("⏭").on_press(Message::Next),
        mode_button("Shuffle", session.is_shuffled(), Message::ToggleShuffle),
        mode_button("Repeat", session.is_repeat(), Message::ToggleRepeat),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    // --- seek slider ---
    // Works in ratios so the range stays sane before the duration is known.
    let ratio = state
        .seek_preview_ratio
        .unwrap_or_else(|| session.progress());

    let seek = slider(0.0..=1.0, ratio, Message::SeekPreview)
        .step(0.001)
        .on_release(Message::SeekCommit)
        .width(Length::Fill);

    let position_ms = match (state.seek_preview_ratio, session.duration_ms()) {
        (Some(r), Some(d)) => (f64::from(r) * d as f64).round() as u64,
        _ => session.position_ms(),
    };
    let time_text = time_label(position_ms, session.duration_ms());

    // --- volume slider ---
    let vol_slider = slider(0.0..=1.0, session.volume(), Message::SetVolume)
        .step(0.01)
        .width(Length::Fixed(VOLUME_W));

    let bar = row![
        // left: transport
        transport,
        // middle: seek
        row![seek, text(time_text).size(12)]
            .spacing(10)
            .align_y(Alignment::Center)
            .width(Length::Fill),
        // right: volume
        row![text("Vol").size(12), vol_slider]
            .spacing(8)
            .align_y(Alignment::Center),
    ]
    .spacing(16)
    .align_y(Alignment::Center);

    container(bar).padding(12)
}
