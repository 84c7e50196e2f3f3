//! Inter-task communication channels
//!
//! Static embassy-sync primitives connecting the input task to its
//! consumers.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use tactus_protocol::{ButtonMasks, KeyCode};

/// Channel capacity for decoded keys, matching the decoder's own queue
const KEY_CHANNEL_SIZE: usize = 8;

/// Keys decoded from the remote controller
pub static KEY_CHANNEL: Channel<CriticalSectionRawMutex, KeyCode, KEY_CHANNEL_SIZE> =
    Channel::new();

/// Directional group masks, signalled whenever they change
pub static CHORD_STATE: Signal<CriticalSectionRawMutex, ButtonMasks> = Signal::new();
