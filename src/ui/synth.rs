use std::{cell::Cell, sync::Arc};

use crate::{
    midi::{self, CCValue},
    synth::{self, ControlId, Error, Event, Kind},
};

/// An UI oriented decorator for [`crate::synth::Synth`].
///
/// It sends the frames resulting from user changes on the serial
/// port and adds `iced` subscriptions handling for incoming data.
pub struct Synth {
    inner: synth::Synth,
    iface: synth::Interface,
    next_subscription_id: usize,
    subscription: Option<Subscription>,
}

impl Synth {
    pub fn new(inner: synth::Synth) -> Self {
        Synth {
            inner,
            iface: synth::Interface::default(),
            next_subscription_id: 0,
            subscription: None,
        }
    }

    pub fn inner(&self) -> &synth::Synth {
        &self.inner
    }

    pub fn port_name(&self) -> Option<Arc<str>> {
        self.iface.port_name()
    }

    pub fn connect(&mut self, port_name: Arc<str>) -> Result<(), Error> {
        self.subscription = None;

        let listener = self.iface.connect(port_name)?;
        self.set_listener(listener);

        Ok(())
    }

    pub fn disconnect(&mut self) {
        self.iface.disconnect();
        self.subscription = None;
    }

    pub fn request_dump(&mut self) -> Result<(), Error> {
        log::debug!("Requesting parameters dump");
        self.iface.send_cc(synth::Synth::dump_request())
    }

    /// Handles a value change from the user.
    ///
    /// Widgets can report the current value again, e.g. when clicking
    /// on the selected radio button: nothing is sent in this case.
    pub fn control_changed(&mut self, id: ControlId, value: CCValue) -> Result<(), Error> {
        let Some(control) = self.inner.control(id) else {
            return Err(Error::UnknownControl(id.as_usize()));
        };

        if control.kind() != Kind::PushButton && control.value() == value {
            return Ok(());
        }

        let frames = self.inner.control_changed(id, value)?;
        self.iface.send_all(frames)
    }

    pub fn frame_received(&mut self, bytes: &[u8]) -> Vec<Event> {
        self.inner.frame_received(bytes)
    }

    fn set_listener(&mut self, listener: midi::Listener) {
        self.subscription = Some(Subscription {
            id: self.next_subscription_id,
            listener: Cell::new(Some(listener)),
        });

        self.next_subscription_id += 1;
    }
}

struct Subscription {
    id: usize,
    // Need interior mutability because of `subscription(&self)`
    listener: Cell<Option<midi::Listener>>,
}

/// iced Subscription helper.
impl Synth {
    pub fn subscription(&self) -> iced::Subscription<Result<Vec<u8>, Error>> {
        async fn listen(
            mut listener: Option<midi::Listener>,
        ) -> (Option<Result<Vec<u8>, Error>>, Option<midi::Listener>) {
            let Some(listener_mut) = listener.as_mut() else {
                // Connection lost, wait for the subscription to be dropped.
                return futures::future::pending().await;
            };

            match listener_mut.listen().await {
                Ok(bytes) => (Some(Ok(bytes)), listener),
                Err(err) => {
                    log::trace!("Stopping listener subscription: {err}");
                    (Some(Err(err.into())), None)
                }
            }
        }

        if self.iface.is_connected() {
            if let Some(subscription) = self.subscription.as_ref() {
                let listener = subscription.listener.take();
                if listener.is_some() {
                    log::trace!("Spawning new listener with id {}", subscription.id);
                }

                return iced_native::subscription::unfold(
                    crate::app::Subscription::Device(subscription.id),
                    listener,
                    listen,
                );
            }
        }

        iced::Subscription::none()
    }
}
