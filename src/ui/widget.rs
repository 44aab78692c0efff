use std::borrow::Cow;

use iced::{
    widget::{checkbox, column, radio, text, vertical_space, Button, Checkbox, Column, Text},
    Alignment, Length,
};
use iced_audio::{Normal, NormalParam, VSlider};

use crate::{midi::CCValue, synth::Control, ui};

pub fn label<'a>(text: impl Into<Cow<'a, str>>) -> Text<'a, iced::Renderer> {
    Text::new(text).size(ui::LABEL_TEXT_SIZE)
}

pub fn value_label(text: impl ToString) -> Text<'static, iced::Renderer> {
    Text::new(text.to_string()).size(ui::VALUE_TEXT_SIZE)
}

pub fn slider<'a, Message>(
    control: &Control,
    on_change: impl 'static + Fn(CCValue) -> Message,
) -> Column<'a, Message>
where
    Message: 'a,
{
    let slider = VSlider::new(to_ui_param(control.value()), move |normal| {
        on_change(to_cc_value(normal))
    })
    .height(ui::SLIDER_HEIGHT);

    column![
        label(control.name()),
        slider,
        value_label(control.display_value().unwrap_or_default()),
    ]
    .spacing(5)
    .align_items(Alignment::Center)
}

pub fn toggle<'a, Message>(
    control: &Control,
    on_change: impl 'a + Fn(bool) -> Message,
) -> Checkbox<'a, Message, iced::Renderer>
where
    Message: 'a,
{
    checkbox(control.name(), control.is_on(), on_change)
        .size(ui::CHECKBOX_SIZE)
        .text_size(ui::LABEL_TEXT_SIZE)
        .spacing(6)
}

pub fn selector<'a, Message>(
    control: &Control,
    on_select: impl Fn(CCValue) -> Message,
) -> Column<'a, Message>
where
    Message: 'a + Clone,
{
    let Some(choices) = control.choices() else {
        return Column::new();
    };

    let selected = control.selected().map(|choice| choice.value);

    choices.iter().fold(
        column![label(control.name()), vertical_space(Length::Units(5))]
            .spacing(ui::RADIO_SPACING),
        |col, choice| {
            col.push(
                radio(choice.label, choice.value, selected, &on_select)
                    .size(ui::RADIO_SIZE)
                    .text_size(ui::VALUE_TEXT_SIZE)
                    .spacing(5),
            )
        },
    )
}

pub fn push_button<'a, Message>(control: &Control, on_press: Message) -> Button<'a, Message>
where
    Message: 'a + Clone,
{
    Button::new(text(control.name()).size(ui::VALUE_TEXT_SIZE))
        .on_press(on_press)
        .padding(8)
}

fn to_ui_param(value: CCValue) -> NormalParam {
    NormalParam {
        value: Normal::from_clipped(value.as_ratio()),
        default: Normal::MIN,
    }
}

fn to_cc_value(normal: Normal) -> CCValue {
    CCValue::clamped((normal.as_f32() * CCValue::MAX.as_u8() as f32).round() as u8)
}
