//! GUI renderer (reads state, produces widgets; no mutation).

mod constants;
mod now_playing;
mod playlist;
mod widgets;

use iced::widget::{button, column, row, text, text_input};
use iced::{Alignment, Element, Length};

use super::state::{Message, Vinyl};
use constants::{NOW_PLAYING_W, TRANSPORT_H};

pub(crate) fn view(state: &Vinyl) -> Element<'_, Message> {
    let header = header_bar(state);

    let now_playing = now_playing::build_now_playing(state).width(Length::Fixed(NOW_PLAYING_W));
    let playlist = playlist::build_playlist(state).width(Length::Fill);
    let body = row![now_playing, playlist].spacing(12).height(Length::Fill);

    let transport = widgets::transport_bar(state).height(Length::Fixed(TRANSPORT_H));

    column![header, body, transport]
        .spacing(12)
        .padding(12)
        .into()
}

fn header_bar(state: &Vinyl) -> iced::widget::Row<'_, Message> {
    let folder = text_input("Music folder path", &state.folder_input)
        .on_input(Message::FolderInputChanged)
        .on_submit(Message::LoadFolder)
        .width(Length::Fill);

    let load_btn = if state.loading {
        button("Loading...")
    } else {
        button("Load").on_press(Message::LoadFolder)
    };

    row![
        text("Vinyl").size(20),
        folder,
        load_btn,
        text(&state.status).size(12),
    ]
    .spacing(12)
    .align_y(Alignment::Center)
}
