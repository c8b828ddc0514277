//! Playlist panel: search, collapse toggle, track rows.

use iced::widget::{Column, button, column, container, mouse_area, row, scrollable, text, text_input};
use iced::{Alignment, Length};

use super::super::state::{Message, Vinyl};
use super::constants::{
    HEADER_TEXT, ROW_TEXT, TRACK_LIST_SPACING, TRACK_ROW_H, TRACK_ROW_HPAD, TRACK_ROW_VPAD,
};

pub(crate) fn build_playlist(state: &Vinyl) -> Column<'_, Message> {
    let toggle = button(if state.playlist_expanded { "▾" } else { "▸" })
        .on_press(Message::TogglePlaylist);

    let search = text_input("Search titles", &state.search)
        .on_input(Message::SearchChanged)
        .width(Length::Fill);

    let head = row![
        toggle,
        text(format!("Playlist ({})", state.session.playlist().len())).size(18),
        search,
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let mut col = column![head].spacing(12);
    if state.playlist_expanded {
        col = col.push(build_rows(state).height(Length::Fill));
    }
    col
}

fn build_rows(state: &Vinyl) -> iced::widget::Scrollable<'_, Message> {
    let session = &state.session;

    let header = row![
        text("").size(HEADER_TEXT).width(Length::Fixed(24.0)),
        text("Title").size(HEADER_TEXT).width(Length::FillPortion(3)),
        text("Artist").size(HEADER_TEXT).width(Length::FillPortion(2)),
        text("Album").size(HEADER_TEXT).width(Length::FillPortion(2)),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let mut col = column![header].spacing(TRACK_LIST_SPACING);

    for i in session.matching(&state.search) {
        let Some(t) = session.playlist().get(i) else {
            continue;
        };

        // Active row gets ▶.
        let marker = if session.current_index() == Some(i) {
            "▶"
        } else {
            ""
        };

        let row_cells = row![
            text(marker).size(ROW_TEXT).width(Length::Fixed(24.0)),
            text(t.title.as_str())
                .size(ROW_TEXT)
                .width(Length::FillPortion(3)),
            text(t.artist.as_str())
                .size(ROW_TEXT)
                .width(Length::FillPortion(2)),
            text(t.album.as_deref().unwrap_or(""))
                .size(ROW_TEXT)
                .width(Length::FillPortion(2)),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let row_widget = mouse_area(
            container(row_cells)
                .padding([TRACK_ROW_VPAD, TRACK_ROW_HPAD])
                .height(Length::Fixed(TRACK_ROW_H))
                .width(Length::Fill),
        )
        .on_press(Message::PlayTrack(i));

        col = col.push(row_widget);
    }

    scrollable(col).height(Length::Fill)
}
