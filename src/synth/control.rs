use std::fmt;

use crate::midi::CCValue;

/// A named option of a selector and the value it stands for on the device.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Choice {
    pub label: &'static str,
    pub value: CCValue,
}

impl Choice {
    pub const fn new(label: &'static str, value: u8) -> Self {
        Choice {
            label,
            value: CCValue::new(value),
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

pub const WAVEFORMS: &[Choice] = &[
    Choice::new("Sine", 0),
    Choice::new("Sawtooth", 16),
    Choice::new("Square", 32),
];

// The device selects preset `value / 20`.
pub const PRESETS: &[Choice] = &[
    Choice::new("P0", 0),
    Choice::new("P1", 20),
    Choice::new("P2", 40),
    Choice::new("P3", 60),
    Choice::new("P4", 80),
    Choice::new("P5", 100),
    Choice::new("P6", 120),
];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Unit {
    Hertz,
    Seconds,
    Percent,
}

/// Maps a `CCValue` to the physical quantity the device derives from it.
///
/// Only used for display purposes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Scale {
    min: f32,
    max: f32,
    unit: Unit,
}

impl Scale {
    pub const PERCENT: Scale = Scale::new(0.0, 100.0, Unit::Percent);

    pub const fn new(min: f32, max: f32, unit: Unit) -> Self {
        Scale { min, max, unit }
    }

    pub fn map(self, value: CCValue) -> f32 {
        self.min + value.as_ratio() * (self.max - self.min)
    }

    pub fn display(self, value: CCValue) -> String {
        let mapped = self.map(value);

        use Unit::*;
        match self.unit {
            Hertz if mapped < 100.0 => format!("{mapped:.1} Hz"),
            Hertz => format!("{mapped:.0} Hz"),
            Seconds => format!("{mapped:.2} s"),
            Percent => format!("{mapped:.0} %"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Kind {
    /// Any value in `0..=127`.
    Slider(Scale),
    /// Off (0) or on (1).
    Toggle,
    /// One of the choices.
    Selector(&'static [Choice]),
    /// Stateless trigger.
    PushButton,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Group {
    Osc1,
    Osc2,
    Lfo,
    Envelope,
    Noise,
    Presets,
}

impl Group {
    pub const ALL: [Group; 6] = [
        Group::Osc1,
        Group::Osc2,
        Group::Lfo,
        Group::Envelope,
        Group::Noise,
        Group::Presets,
    ];

    pub fn title(self) -> &'static str {
        use Group::*;
        match self {
            Osc1 => "OSC1",
            Osc2 => "OSC2",
            Lfo => "LFO",
            Envelope => "Envelope",
            Noise => "Noise",
            Presets => "Presets",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Control {
    name: &'static str,
    group: Group,
    kind: Kind,
    value: CCValue,
}

impl Control {
    pub const PRESS: CCValue = CCValue::new(1);

    pub fn new(name: &'static str, group: Group, kind: Kind) -> Self {
        let value = match kind {
            Kind::Selector(choices) => choices.first().map_or(CCValue::MIN, |choice| choice.value),
            _ => CCValue::MIN,
        };

        Control {
            name,
            group,
            kind,
            value,
        }
    }

    pub fn slider(name: &'static str, group: Group, scale: Scale) -> Self {
        Self::new(name, group, Kind::Slider(scale))
    }

    pub fn toggle(name: &'static str, group: Group) -> Self {
        Self::new(name, group, Kind::Toggle)
    }

    pub fn selector(name: &'static str, group: Group, choices: &'static [Choice]) -> Self {
        Self::new(name, group, Kind::Selector(choices))
    }

    pub fn push_button(name: &'static str, group: Group) -> Self {
        Self::new(name, group, Kind::PushButton)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> Group {
        self.group
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn value(&self) -> CCValue {
        self.value
    }

    pub fn is_on(&self) -> bool {
        self.value != CCValue::MIN
    }

    pub fn choices(&self) -> Option<&'static [Choice]> {
        match self.kind {
            Kind::Selector(choices) => Some(choices),
            _ => None,
        }
    }

    /// Returns the selected `Choice` if this is a selector.
    pub fn selected(&self) -> Option<&'static Choice> {
        match self.kind {
            Kind::Selector(choices) => choices.iter().find(|choice| choice.value == self.value),
            _ => None,
        }
    }

    /// Returns the value in physical units if this is a slider.
    pub fn display_value(&self) -> Option<String> {
        match self.kind {
            Kind::Slider(scale) => Some(scale.display(self.value)),
            _ => None,
        }
    }

    /// Applies a value chosen by the user.
    ///
    /// Returns the value to send to the device.
    pub(super) fn set_from_user(&mut self, value: CCValue) -> CCValue {
        let value = match self.kind {
            Kind::Toggle => Self::to_toggle(value),
            Kind::PushButton => return value,
            _ => value,
        };

        self.value = value;

        value
    }

    /// Applies a value received from the device.
    ///
    /// Returns `true` if the displayed value changed.
    pub(super) fn set_from_device(&mut self, value: CCValue) -> bool {
        let value = match self.kind {
            Kind::Slider(_) => value,
            Kind::Toggle => Self::to_toggle(value),
            Kind::Selector(choices) => {
                if !choices.iter().any(|choice| choice.value == value) {
                    log::debug!("{}: no choice for value {value}", self.name);
                    return false;
                }

                value
            }
            Kind::PushButton => return false,
        };

        let has_changed = self.value != value;
        self.value = value;

        has_changed
    }

    fn to_toggle(value: CCValue) -> CCValue {
        if value == CCValue::MIN {
            CCValue::MIN
        } else {
            Self::PRESS
        }
    }
}
