//! Key console task
//!
//! Consumes decoded keys and chord changes and reports them over RTT.
//! Stands in for a real consumer such as a menu UI.

use defmt::*;
use embassy_futures::select::{select, Either};

use crate::channels::{CHORD_STATE, KEY_CHANNEL};

#[embassy_executor::task]
pub async fn console_task() {
    info!("Console task started");

    loop {
        match select(KEY_CHANNEL.receive(), CHORD_STATE.wait()).await {
            Either::First(key) => {
                if key.is_rotation() {
                    debug!("Wheel {} ({})", key, key.rotation_delta());
                } else if key.is_repeat() {
                    debug!("Repeat {} (0x{:02x})", key, key.to_byte());
                } else {
                    info!("Key {} (0x{:02x})", key, key.to_byte());
                }
            }
            Either::Second(masks) => {
                debug!(
                    "Direction group: pressed={:04x} long={:04x}",
                    masks.pressed, masks.long_pressed
                );
            }
        }
    }
}
