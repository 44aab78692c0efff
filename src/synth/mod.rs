mod binding;
pub use binding::{Bindings, ControlId};

pub mod cc;

pub mod control;
pub use control::{Control, Group, Kind, Scale, Unit};

pub mod dump;

mod error;
pub use error::Error;

mod interface;
pub use interface::Interface;

use smallvec::{smallvec, SmallVec};

use std::sync::Arc;

use crate::midi::{self, CCNumber, CCValue};

/// Frames to send following a user action.
pub type Frames = SmallVec<[midi::CC; 2]>;

/// What happened while handling data from the device.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Event {
    /// The control's value was updated from the device.
    Updated(ControlId),
    DumpStarted,
    DumpCompleted { count: usize },
    /// A line of device log output.
    Log(Arc<str>),
}

/// The Synthesmaller controls and the protocol logic binding them to the device.
///
/// No I/O happens here: user changes produce the frames to send
/// and device data is fed as raw bytes.
#[derive(Debug, Default)]
pub struct Synth {
    bindings: Bindings,
    controls: Vec<Control>,
    preset_selector: Option<ControlId>,
    decoder: dump::Decoder,
}

impl Synth {
    /// Builds a `Synth` with the default Synthesmaller controls.
    pub fn try_new() -> Result<Self, Error> {
        let mut synth = Synth::default();

        use Group::*;
        let osc_freq = Scale::new(100.0, 2000.0, Unit::Hertz);
        let lfo_freq = Scale::new(0.1, 20.0, Unit::Hertz);
        let env_time = Scale::new(0.01, 1.0, Unit::Seconds);

        synth.register(cc::OSC1_AMP, Control::slider("Amp", Osc1, Scale::PERCENT))?;
        synth.register(
            cc::WF_OSC1,
            Control::selector("Waveform", Osc1, control::WAVEFORMS),
        )?;

        synth.register(cc::OSC2_FREQ, Control::slider("Freq", Osc2, osc_freq))?;
        synth.register(cc::OSC2_AMP, Control::slider("Amp", Osc2, Scale::PERCENT))?;
        synth.register(cc::OSC2_SYNC_ON_OFF, Control::toggle("Sync", Osc2))?;
        synth.register(
            cc::WF_OSC2,
            Control::selector("Waveform", Osc2, control::WAVEFORMS),
        )?;

        synth.register(cc::LFO_FREQ, Control::slider("Freq", Lfo, lfo_freq))?;
        synth.register(cc::LFO_ON_OFF, Control::toggle("On", Lfo))?;
        synth.register(
            cc::WF_LFO,
            Control::selector("Waveform", Lfo, control::WAVEFORMS),
        )?;

        synth.register(cc::ENV_ATTACK, Control::slider("Attack", Envelope, env_time))?;
        synth.register(cc::ENV_DECAY, Control::slider("Decay", Envelope, env_time))?;
        synth.register(
            cc::ENV_SUSTAIN,
            Control::slider("Sustain", Envelope, Scale::PERCENT),
        )?;
        synth.register(cc::ENV_RELEASE, Control::slider("Release", Envelope, env_time))?;

        synth.register(cc::NOISE_AMP, Control::slider("Amp", Noise, Scale::PERCENT))?;

        synth.register(
            cc::SELECT_PRESET,
            Control::selector("Preset", Presets, control::PRESETS),
        )?;
        synth.register(cc::SAVE_PRESET, Control::push_button("Save", Presets))?;

        Ok(synth)
    }

    /// Registers `control` for the CC number `nb`.
    ///
    /// The control bound to `cc::SELECT_PRESET` triggers a dump request when changed.
    pub fn register(&mut self, nb: CCNumber, control: Control) -> Result<ControlId, Error> {
        let id = self.bindings.bind(nb).map_err(|already_bound| {
            let name = self.controls[already_bound.0.as_usize()].name();

            Error::CCNumberAlreadyBound {
                nb,
                name: name.into(),
            }
        })?;

        debug_assert_eq!(id.as_usize(), self.controls.len());
        self.controls.push(control);

        if nb == cc::SELECT_PRESET {
            self.preset_selector = Some(id);
        }

        Ok(id)
    }

    pub fn control(&self, id: ControlId) -> Option<&Control> {
        self.controls.get(id.as_usize())
    }

    pub fn cc_number(&self, id: ControlId) -> Option<CCNumber> {
        self.bindings.cc(id)
    }

    pub fn controls(&self) -> impl Iterator<Item = (ControlId, &Control)> + '_ {
        self.bindings
            .iter()
            .map(|(id, _)| (id, &self.controls[id.as_usize()]))
    }

    pub fn group(&self, group: Group) -> impl Iterator<Item = (ControlId, &Control)> + '_ {
        self.controls()
            .filter(move |(_, control)| control.group() == group)
    }

    pub fn dump_state(&self) -> dump::State {
        self.decoder.state()
    }

    /// Returns the frame asking the device for a dump of all its parameters.
    pub fn dump_request() -> midi::CC {
        midi::CC::new(cc::DUMP_PARAMS, CCValue::new(1))
    }

    /// Handles a value change from the user.
    ///
    /// Returns the frames to send to the device.
    pub fn control_changed(&mut self, id: ControlId, value: CCValue) -> Result<Frames, Error> {
        let nb = self
            .bindings
            .cc(id)
            .ok_or(Error::UnknownControl(id.as_usize()))?;

        let value = self.controls[id.as_usize()].set_from_user(value);
        let mut frames: Frames = smallvec![midi::CC::new(nb, value)];

        if Some(id) == self.preset_selector {
            // Presets reprogram most parameters on the device
            frames.push(Self::dump_request());
        }

        Ok(frames)
    }

    /// Handles a value received from the device.
    ///
    /// Unknown CC numbers are ignored. No frames result from this.
    ///
    /// Returns the `ControlId` if its displayed value changed.
    pub fn device_frame(&mut self, nb: u8, value: u8) -> Option<ControlId> {
        let Some(id) = CCNumber::try_from(nb)
            .ok()
            .and_then(|nb| self.bindings.control(nb))
        else {
            log::trace!("Ignoring value for unknown CC 0x{nb:02x}");
            return None;
        };

        self.controls[id.as_usize()]
            .set_from_device(CCValue::clamped(value))
            .then_some(id)
    }

    /// Handles raw bytes received from the device.
    pub fn frame_received(&mut self, bytes: &[u8]) -> Vec<Event> {
        let mut events = Vec::new();

        for line in self.decoder.push(bytes) {
            use dump::Line::*;
            match line {
                Ok(Value { nb, value }) => {
                    if let Some(id) = self.device_frame(nb, value) {
                        events.push(Event::Updated(id));
                    }
                }
                Ok(Start) => {
                    log::debug!("Receiving parameters dump");
                    events.push(Event::DumpStarted);
                }
                Ok(End { count }) => {
                    log::info!("Received {count} parameter values");
                    events.push(Event::DumpCompleted { count });
                }
                Ok(Log(line)) => {
                    log::info!(target: "device", "{line}");
                    events.push(Event::Log(line));
                }
                Err(err) => log::warn!("{err}"),
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::{cc, control, dump, Control, ControlId, Error, Event, Group, Scale, Synth};
    use crate::midi::{CCNumber, CCValue, CC};

    #[test]
    fn default_layout() {
        let synth = Synth::try_new().unwrap();
        assert_eq!(synth.controls().count(), 16);

        for (id, _) in synth.controls() {
            let nb = synth.cc_number(id).unwrap();
            assert_ne!(nb, cc::DUMP_PARAMS);
        }

        let envelope: Vec<&str> = synth
            .group(Group::Envelope)
            .map(|(_, control)| control.name())
            .collect();
        assert_eq!(envelope, ["Attack", "Decay", "Sustain", "Release"]);
    }

    #[test]
    fn duplicate_cc() {
        let mut synth = Synth::default();
        synth
            .register(cc::OSC1_AMP, Control::slider("Amp", Group::Osc1, Scale::PERCENT))
            .unwrap();

        let err = synth
            .register(cc::OSC1_AMP, Control::toggle("Other", Group::Osc1))
            .unwrap_err();
        match err {
            Error::CCNumberAlreadyBound { nb, name } => {
                assert_eq!(nb, cc::OSC1_AMP);
                assert_eq!(name.as_ref(), "Amp");
            }
            other => panic!("{other}"),
        }

        assert_eq!(synth.controls().count(), 1);
    }

    #[test]
    fn control_changed() {
        let mut synth = Synth::default();
        let amp = synth
            .register(cc::OSC1_AMP, Control::slider("Amp", Group::Osc1, Scale::PERCENT))
            .unwrap();

        let frames = synth.control_changed(amp, CCValue::new(0x40)).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].to_frame(), [0xb0, 0x44, 0x40]);
        assert_eq!(synth.control(amp).unwrap().value(), CCValue::new(0x40));

        let lfo_on = synth
            .register(cc::LFO_ON_OFF, Control::toggle("On", Group::Lfo))
            .unwrap();
        let frames = synth.control_changed(lfo_on, CCValue::new(1)).unwrap();
        assert_eq!(frames[0].to_frame(), [0xb0, 0x4d, 0x01]);

        let save = synth
            .register(cc::SAVE_PRESET, Control::push_button("Save", Group::Presets))
            .unwrap();
        let frames = synth.control_changed(save, Control::PRESS).unwrap();
        assert_eq!(frames.as_slice(), [CC::new(cc::SAVE_PRESET, Control::PRESS)]);
    }

    #[test]
    fn unknown_control() {
        let mut synth = Synth::default();
        let other = Synth::try_new().unwrap();
        let (id, _) = other.controls().last().unwrap();

        match synth.control_changed(id, CCValue::MIN).unwrap_err() {
            Error::UnknownControl(idx) => assert_eq!(idx, id.as_usize()),
            other => panic!("{other}"),
        }
    }

    #[test]
    fn preset_selector_requests_dump() {
        let mut synth = Synth::try_new().unwrap();
        let (preset, _) = synth
            .controls()
            .find(|(id, _)| synth.cc_number(*id) == Some(cc::SELECT_PRESET))
            .unwrap();

        let frames = synth.control_changed(preset, CCValue::new(40)).unwrap();
        assert_eq!(
            frames.as_slice(),
            [
                CC::new(cc::SELECT_PRESET, CCValue::new(40)),
                Synth::dump_request(),
            ]
        );
        assert_eq!(Synth::dump_request().to_frame(), [0xb0, 0x42, 0x01]);
        assert_eq!(synth.control(preset).unwrap().selected().unwrap().label, "P2");

        // Other selectors don't request a dump
        let (wf_lfo, _) = synth
            .controls()
            .find(|(id, _)| synth.cc_number(*id) == Some(cc::WF_LFO))
            .unwrap();
        let frames = synth.control_changed(wf_lfo, CCValue::new(32)).unwrap();
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn device_frame() {
        let mut synth = Synth::default();
        let amp = synth
            .register(cc::OSC1_AMP, Control::slider("Amp", Group::Osc1, Scale::PERCENT))
            .unwrap();

        assert_eq!(synth.device_frame(0x44, 0x20), Some(amp));
        assert_eq!(synth.control(amp).unwrap().value(), CCValue::new(0x20));

        // Unchanged
        assert_eq!(synth.device_frame(0x44, 0x20), None);

        // Clamped
        assert_eq!(synth.device_frame(0x44, 0xff), Some(amp));
        assert_eq!(synth.control(amp).unwrap().value(), CCValue::MAX);

        // Unknown CC numbers are ignored
        assert_eq!(synth.device_frame(0x30, 0x10), None);
        assert_eq!(synth.device_frame(0xc4, 0x10), None);
        assert_eq!(synth.control(amp).unwrap().value(), CCValue::MAX);
    }

    #[test]
    fn dump_scenario() {
        let mut synth = Synth::default();
        let slider = synth
            .register(
                CCNumber::new(0x44),
                Control::slider("Amp", Group::Osc1, Scale::PERCENT),
            )
            .unwrap();
        let selector = synth
            .register(
                CCNumber::new(0x4e),
                Control::selector("Waveform", Group::Osc1, control::WAVEFORMS),
            )
            .unwrap();

        let events =
            synth.frame_received(b"MIDI_VALUES_START\n44:7F\n4e:10\nMIDI_VALUES_END\n");

        assert_eq!(
            events,
            [
                Event::DumpStarted,
                Event::Updated(slider),
                Event::Updated(selector),
                Event::DumpCompleted { count: 2 },
            ]
        );

        assert_eq!(synth.control(slider).unwrap().value(), CCValue::MAX);
        assert_eq!(synth.control(slider).unwrap().display_value().unwrap(), "100 %");
        assert_eq!(
            synth.control(selector).unwrap().selected().unwrap().label,
            "Sawtooth"
        );
        assert_eq!(synth.dump_state(), dump::State::Idle);
    }

    #[test]
    fn dump_byte_by_byte() {
        let mut synth = Synth::default();
        let slider = synth
            .register(
                CCNumber::new(0x44),
                Control::slider("Amp", Group::Osc1, Scale::PERCENT),
            )
            .unwrap();
        let selector = synth
            .register(
                CCNumber::new(0x4e),
                Control::selector("Waveform", Group::Osc1, control::WAVEFORMS),
            )
            .unwrap();

        let stream = "héllo\r\nMIDI_VALUES_START\n44:7F\n4e:10\nMIDI_VALUES_END\n";
        let events: Vec<Event> = stream
            .as_bytes()
            .iter()
            .flat_map(|byte| synth.frame_received(std::slice::from_ref(byte)))
            .collect();

        assert_eq!(
            events,
            [
                Event::Log("héllo".into()),
                Event::DumpStarted,
                Event::Updated(slider),
                Event::Updated(selector),
                Event::DumpCompleted { count: 2 },
            ]
        );
        assert_eq!(synth.control(slider).unwrap().value(), CCValue::MAX);
        assert_eq!(
            synth.control(selector).unwrap().selected().unwrap().label,
            "Sawtooth"
        );
    }

    #[test]
    fn dump_gating() {
        let mut synth = Synth::default();
        let slider = synth
            .register(cc::OSC1_AMP, Control::slider("Amp", Group::Osc1, Scale::PERCENT))
            .unwrap();

        let events = synth.frame_received(b"44:7F\nMIDI_VALUES_START\nMIDI_VALUES_END\n44:10\n");
        assert_eq!(
            events,
            [
                Event::Log("44:7F".into()),
                Event::DumpStarted,
                Event::DumpCompleted { count: 0 },
                Event::Log("44:10".into()),
            ]
        );
        assert_eq!(synth.control(slider).unwrap().value(), CCValue::MIN);
    }

    #[test]
    fn round_trip_all_controls() {
        let mut synth = Synth::try_new().unwrap();
        let ids: Vec<ControlId> = synth.controls().map(|(id, _)| id).collect();

        for id in ids {
            let nb = synth.cc_number(id).unwrap();
            let control = synth.control(id).unwrap().clone();

            for value in 0..=CCValue::MAX.as_u8() {
                let mut stream = b"MIDI_VALUES_START\n".to_vec();
                stream.extend(format!("{:02X}:{value:02x}\n", nb.as_u8()).bytes());
                stream.extend(b"MIDI_VALUES_END\n");
                synth.frame_received(&stream);

                let expected = match control.kind() {
                    super::Kind::Slider(_) => value,
                    super::Kind::Toggle => u8::from(value != 0),
                    super::Kind::Selector(choices) => {
                        if !choices.iter().any(|choice| choice.value.as_u8() == value) {
                            continue;
                        }
                        value
                    }
                    super::Kind::PushButton => 0,
                };

                assert_eq!(
                    synth.control(id).unwrap().value().as_u8(),
                    expected,
                    "{} {nb} {value}",
                    control.name(),
                );
            }
        }
    }
}
