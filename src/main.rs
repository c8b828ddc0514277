//! Vinyl
//!
//! # What this program is
//! A small desktop music player (built with `iced`): load a folder, get a
//! playlist with titles/artists/covers read from ID3v2 tags, play it.
//!
//! # How Iced works (super simple mental model)
//! - `Vinyl` = the *entire memory* of the app (all the state)
//! - `Message` = “something happened” (button clicked, key pressed, load finished)
//! - `update(state, message)` = handles that thing and updates state
//! - `view(state)` = draws UI based on the current state
//!
//! **Message happens -> update changes state -> view redraws**
//!
//! # Architecture constraints (on purpose)
//! - `core` knows nothing about iced: tag reading, folder scan, session, engine.
//! - `gui` turns messages into `session::Command`s and forwards what the
//!   session returns to the playback engine.
//!
//! # Concurrency model
//! - Folder loads and cover reads run on a background thread.
//! - Audio runs on its own engine thread, reached through channels.
//! - The GUI polls engine events on a timer tick.

mod core;
mod gui;

fn main() -> iced::Result {
    // RUST_LOG=vinyl=debug for engine/session chatter.
    tracing_subscriber::fmt::init();

    // `iced::application` glues together:
    // - boot (initial state + optional folder autoload)
    // - update function (logic)
    // - view function (UI layout)
    iced::application(gui::boot, gui::update, gui::view)
        .title("Vinyl")
        .subscription(gui::subscription)
        .run()
}
