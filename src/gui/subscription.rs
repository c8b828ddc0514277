//! gui/subscription.rs
//! - periodic TickPlayback: drains engine events, drives the sleep timer
//! - keyboard: Space = play/pause, ←/→ = prev/next

use std::time::Instant;

use iced::event::{self, Event};
use iced::keyboard::{self, Key, key};
use iced::{Subscription, time, window};

use super::state::{Message, Vinyl};

pub(crate) fn subscription(state: &Vinyl) -> Subscription<Message> {
    let keys = event::listen_with(shortcut);

    let ticking = state.playback_events.is_some()
        || state.session.sleep_remaining(Instant::now()).is_some();

    if !ticking {
        return keys;
    }

    let tick = time::every(state.config.tick()).map(|_| Message::TickPlayback);
    Subscription::batch([tick, keys])
}

/// Keys already handled by a widget (typing in the search box) are ignored.
fn shortcut(event: Event, status: event::Status, _window: window::Id) -> Option<Message> {
    if status == event::Status::Captured {
        return None;
    }

    let Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) = event else {
        return None;
    };

    match key {
        Key::Named(key::Named::Space) => Some(Message::TogglePlayPause),
        Key::Named(key::Named::ArrowLeft) => Some(Message::Prev),
        Key::Named(key::Named::ArrowRight) => Some(Message::Next),
        _ => None,
    }
}
