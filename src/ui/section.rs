use iced::{
    widget::{column, container, text, Column, Row},
    Alignment, Element, Length,
};
use iced_lazy::{self, Component};

use crate::{
    midi::CCValue,
    synth::{self, Control, ControlId, Group, Kind},
    ui::{self, style, widget},
};

/// A value change from the user.
#[derive(Clone, Copy, Debug)]
pub struct Change {
    pub id: ControlId,
    pub value: CCValue,
}

/// The controls of a `Group`.
///
/// Sliders are laid out side by side, other controls below them.
pub struct Panel<'a> {
    synth: &'a synth::Synth,
    group: Group,
}

impl<'a> Panel<'a> {
    pub fn new(synth: &'a synth::Synth, group: Group) -> Self {
        Self { synth, group }
    }
}

fn control_view<'a>(id: ControlId, control: &Control) -> Element<'a, Change> {
    match control.kind() {
        Kind::Slider(_) => widget::slider(control, move |value| Change { id, value }).into(),
        Kind::Toggle => widget::toggle(control, move |is_on| Change {
            id,
            value: CCValue::new(is_on.into()),
        })
        .into(),
        Kind::Selector(_) => widget::selector(control, move |value| Change { id, value }).into(),
        Kind::PushButton => widget::push_button(
            control,
            Change {
                id,
                value: Control::PRESS,
            },
        )
        .into(),
    }
}

impl<'a, Message> Component<Message, iced::Renderer> for Panel<'a>
where
    Message: From<Change>,
{
    type State = ();
    type Event = Change;

    fn update(&mut self, _state: &mut Self::State, change: Change) -> Option<Message> {
        Some(change.into())
    }

    fn view(&self, _state: &Self::State) -> Element<Change> {
        let (sliders, others): (Vec<_>, Vec<_>) = self
            .synth
            .group(self.group)
            .partition(|(_, control)| matches!(control.kind(), Kind::Slider(_)));

        let sliders = sliders
            .into_iter()
            .fold(Row::new().spacing(10), |row, (id, control)| {
                row.push(control_view(id, control))
            });

        let others = others
            .into_iter()
            .fold(Column::new().spacing(15), |col, (id, control)| {
                col.push(control_view(id, control))
            });

        let content: Element<_> = container(
            column![
                text(self.group.title()).size(ui::SECTION_TITLE_SIZE),
                sliders,
                others,
            ]
            .spacing(15)
            .align_items(Alignment::Start),
        )
        .padding(10)
        .height(Length::Fill)
        .style(style::Section)
        .into();

        // Set to true to debug layout
        if false {
            content.explain(iced::Color::WHITE)
        } else {
            content
        }
    }
}

impl<'a, Message> From<Panel<'a>> for Element<'a, Message, iced::Renderer>
where
    Message: 'a + From<Change>,
{
    fn from(panel: Panel<'a>) -> Self {
        iced_lazy::component(panel)
    }
}
