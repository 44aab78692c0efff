use std::sync::Arc;

use crate::midi;

#[derive(Clone, Debug, thiserror::Error)]
pub enum Error {
    #[error("CC number {} already bound to {}", .nb, .name)]
    CCNumberAlreadyBound { nb: midi::CCNumber, name: Arc<str> },

    #[error("Unknown control id {}", .0)]
    UnknownControl(usize),

    #[error("Malformed dump line {:?}", .0)]
    DumpLine(Arc<str>),

    #[error("{}", .0)]
    Midi(#[from] midi::Error),
}

impl Error {
    pub fn is_broken_connection(&self) -> bool {
        matches!(
            self,
            Error::Midi(midi::Error::BrokenConnection | midi::Error::Receive(_))
        )
    }
}
