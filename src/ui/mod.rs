use iced::Length;

pub const CHECKBOX_SIZE: u16 = 16;
pub const LABEL_TEXT_SIZE: u16 = 18;
pub const RADIO_SIZE: u16 = 16;
pub const RADIO_SPACING: u16 = 5;
pub const SECTION_TITLE_SIZE: u16 = 22;
pub const SLIDER_HEIGHT: Length = Length::Units(180);
pub const VALUE_TEXT_SIZE: u16 = 14;

pub mod widget;

pub mod style;

pub mod section;

pub mod app;
pub use app::App;

pub mod synth;
