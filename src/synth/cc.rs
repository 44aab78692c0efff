//! CC numbers understood by the Synthesmaller.

use crate::midi::CCNumber;

pub const LFO_FREQ: CCNumber = CCNumber::new(0x4a);
pub const LFO_ON_OFF: CCNumber = CCNumber::new(0x4d);
pub const OSC2_FREQ: CCNumber = CCNumber::new(0x4c);
pub const OSC2_AMP: CCNumber = CCNumber::new(0x49);
pub const OSC2_SYNC_ON_OFF: CCNumber = CCNumber::new(0x47);
pub const WF_OSC1: CCNumber = CCNumber::new(0x4e);
pub const WF_OSC2: CCNumber = CCNumber::new(0x4f);
pub const WF_LFO: CCNumber = CCNumber::new(0x5b);
pub const ENV_ATTACK: CCNumber = CCNumber::new(0x5d);
pub const ENV_DECAY: CCNumber = CCNumber::new(0x5e);
pub const ENV_SUSTAIN: CCNumber = CCNumber::new(0x0a);
pub const ENV_RELEASE: CCNumber = CCNumber::new(0x5c);
pub const SELECT_PRESET: CCNumber = CCNumber::new(0x07);
pub const SAVE_PRESET: CCNumber = CCNumber::new(0x46);
/// Asks the device for a dump of all its parameters.
///
/// The value is ignored by the device.
pub const DUMP_PARAMS: CCNumber = CCNumber::new(0x42);
pub const NOISE_AMP: CCNumber = CCNumber::new(0x43);
pub const OSC1_AMP: CCNumber = CCNumber::new(0x44);
