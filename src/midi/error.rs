use std::{io, sync::Arc};

#[derive(Clone, Debug, thiserror::Error)]
pub enum Error {
    #[error("Error opening serial port {}: {}", .port, .source)]
    Open {
        port: Arc<str>,
        source: serialport::Error,
    },

    #[error("Couldn't spawn serial port reader: {}", .0)]
    Reader(Arc<io::Error>),

    #[error("Serial port not connected")]
    NotConnected,

    #[error("Couldn't send MIDI message: {}", .0)]
    Send(Arc<io::Error>),

    #[error("Couldn't read from serial port: {}", .0)]
    Receive(Arc<io::Error>),

    #[error("Broken serial connection")]
    BrokenConnection,
}
