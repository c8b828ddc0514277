//! View constants (layout/sizing).

pub(crate) const TRANSPORT_H: f32 = 96.0;

pub(crate) const NOW_PLAYING_W: f32 = 300.0;
pub(crate) const COVER_BIG: f32 = 240.0;

// list sizing
pub(crate) const HEADER_TEXT: f32 = 14.0;
pub(crate) const ROW_TEXT: f32 = 14.0;

pub(crate) const TRACK_ROW_H: f32 = 26.0;
pub(crate) const TRACK_ROW_VPAD: f32 = 2.0;
pub(crate) const TRACK_ROW_HPAD: f32 = 8.0;
pub(crate) const TRACK_LIST_SPACING: f32 = 1.0;

pub(crate) const VOLUME_W: f32 = 140.0;
pub(crate) const MINUTES_W: f32 = 70.0;
