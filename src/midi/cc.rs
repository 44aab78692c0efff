use std::fmt;

use crate::midi;

/// A Control Change message.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CC {
    pub nb: CCNumber,
    pub value: CCValue,
}

impl CC {
    pub const TAG: midi::Tag = midi::Tag(0xb0);
    pub const FRAME_LEN: usize = 3;

    pub const fn new(nb: CCNumber, value: CCValue) -> Self {
        CC { nb, value }
    }

    /// Encodes this `CC` as a raw frame on the given channel.
    pub fn to_frame_on(self, chan: midi::Channel) -> [u8; Self::FRAME_LEN] {
        let status = midi::TagChannel {
            tag: Self::TAG,
            chan,
        };

        [status.into(), self.nb.as_u8(), self.value.as_u8()]
    }

    /// Encodes this `CC` as a raw frame on the default channel.
    pub fn to_frame(self) -> [u8; Self::FRAME_LEN] {
        self.to_frame_on(midi::Channel::DEFAULT)
    }
}

impl fmt::Display for CC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CC {} = {}", self.nb, self.value)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CCError {
    #[error("CC number out of range 0x{:02x}", .0)]
    NumberOutOfRange(u8),
    #[error("CC value out of range 0x{:02x}", .0)]
    ValueOutOfRange(u8),
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct CCNumber(u8);

impl CCNumber {
    pub const MAX: CCNumber = CCNumber(0x7f);

    /// Builds a `CCNumber`.
    ///
    /// Only use with known in range constants.
    pub const fn new(nb: u8) -> Self {
        assert!(nb <= Self::MAX.0);
        CCNumber(nb)
    }

    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for CCNumber {
    type Error = CCError;

    fn try_from(nb: u8) -> Result<Self, Self::Error> {
        if nb > Self::MAX.0 {
            return Err(CCError::NumberOutOfRange(nb));
        }

        Ok(Self(nb))
    }
}

impl From<CCNumber> for u8 {
    fn from(nb: CCNumber) -> Self {
        nb.0
    }
}

impl fmt::Display for CCNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02x}", self.0)
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct CCValue(u8);

impl CCValue {
    pub const MIN: CCValue = CCValue(0);
    pub const MAX: CCValue = CCValue(0x7f);

    /// Builds a `CCValue`.
    ///
    /// Only use with known in range constants.
    pub const fn new(value: u8) -> Self {
        assert!(value <= Self::MAX.0);
        CCValue(value)
    }

    /// Builds a `CCValue`, saturating at `CCValue::MAX`.
    pub fn clamped(value: u8) -> Self {
        CCValue(value.min(Self::MAX.0))
    }

    pub const fn as_u8(self) -> u8 {
        self.0
    }

    pub fn as_ratio(self) -> f32 {
        self.0 as f32 / Self::MAX.0 as f32
    }
}

impl TryFrom<u8> for CCValue {
    type Error = CCError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > Self::MAX.0 {
            return Err(CCError::ValueOutOfRange(value));
        }

        Ok(Self(value))
    }
}

impl From<CCValue> for u8 {
    fn from(value: CCValue) -> Self {
        value.0
    }
}

impl fmt::Display for CCValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
