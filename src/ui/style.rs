use iced::{widget::container, Color};

pub struct Background;

impl container::StyleSheet for Background {
    type Style = iced::Theme;

    fn appearance(&self, style: &Self::Style) -> container::Appearance {
        let appearance = <iced::Theme as container::StyleSheet>::appearance(
            style,
            &iced::theme::Container::default(),
        );
        match style {
            iced::Theme::Light => container::Appearance {
                background: Some(iced::Background::Color(Color::from_rgb(0.98, 0.99, 0.99))),
                ..appearance
            },
            _ => appearance,
        }
    }
}

impl From<Background> for iced::theme::Container {
    fn from(style: Background) -> Self {
        iced::theme::Container::Custom(Box::new(style))
    }
}

pub struct Section;

impl container::StyleSheet for Section {
    type Style = iced::Theme;

    fn appearance(&self, style: &Self::Style) -> container::Appearance {
        let appearance = <iced::Theme as container::StyleSheet>::appearance(
            style,
            &iced::theme::Container::default(),
        );
        container::Appearance {
            background: match style {
                iced::Theme::Dark => {
                    Some(iced::Background::Color(Color::from_rgb(0.28, 0.28, 0.3)))
                }
                iced::Theme::Light => {
                    Some(iced::Background::Color(Color::from_rgb(0.925, 0.92, 0.92)))
                }
                _ => appearance.background,
            },
            border_radius: 4.0,
            border_color: match style {
                iced::Theme::Dark => Color::from_rgb(0.28, 0.28, 0.3),
                iced::Theme::Light => Color::from_rgb(0.925, 0.92, 0.92),
                _ => appearance.border_color,
            },
            ..appearance
        }
    }
}

impl From<Section> for iced::theme::Container {
    fn from(style: Section) -> Self {
        iced::theme::Container::Custom(Box::new(style))
    }
}
