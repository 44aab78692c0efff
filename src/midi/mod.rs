mod error;
pub use error::Error;

pub mod cc;
pub use cc::{CCNumber, CCValue, CC};

pub mod port;
pub use port::{Listener, Port};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Channel(u8);

impl Channel {
    pub const DEFAULT: Self = Channel(0);

    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

impl From<u8> for Channel {
    fn from(chan: u8) -> Self {
        Channel(chan & 0x0f)
    }
}

/// The high nibble of a channel voice status byte.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Tag(pub u8);

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        tag.0
    }
}

/// A channel voice status byte: `Tag` | `Channel`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TagChannel {
    pub tag: Tag,
    pub chan: Channel,
}

impl From<u8> for TagChannel {
    fn from(status: u8) -> Self {
        TagChannel {
            tag: Tag(status & 0xf0),
            chan: Channel(status & 0x0f),
        }
    }
}

impl From<TagChannel> for u8 {
    fn from(tag_chan: TagChannel) -> Self {
        tag_chan.tag.0 | tag_chan.chan.0
    }
}
