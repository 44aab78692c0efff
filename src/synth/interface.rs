use std::sync::Arc;

use crate::{midi, synth::Error};

/// The serial connection to the Synthesmaller.
#[derive(Default)]
pub struct Interface {
    port: Option<midi::Port>,
}

impl Interface {
    pub fn connect(&mut self, port_name: Arc<str>) -> Result<midi::Listener, Error> {
        self.port = None;

        let (port, listener) = midi::Port::open(port_name)?;
        self.port = Some(port);

        Ok(listener)
    }

    pub fn is_connected(&self) -> bool {
        self.port.is_some()
    }

    pub fn port_name(&self) -> Option<Arc<str>> {
        self.port.as_ref().map(|port| port.name().clone())
    }

    pub fn disconnect(&mut self) {
        if let Some(port) = self.port.take() {
            log::debug!("Disconnected from {}", port.name());
        }
    }

    pub fn send_cc(&mut self, cc: midi::CC) -> Result<(), Error> {
        let port = self.port.as_mut().ok_or(midi::Error::NotConnected)?;

        log::debug!("Sending {cc}");
        port.send(&cc.to_frame())?;

        Ok(())
    }

    pub fn send_all(&mut self, frames: impl IntoIterator<Item = midi::CC>) -> Result<(), Error> {
        for cc in frames {
            self.send_cc(cc)?;
        }

        Ok(())
    }
}
