//! Remote controller input task
//!
//! Sole owner of the input controller. Ticks several times per poll
//! interval and lets the poll gate decide when a read is due, so a slow
//! read never costs a whole interval. Decoded keys go to [`KEY_CHANNEL`]
//! and directional group changes are signalled on [`CHORD_STATE`].

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C1;
use embassy_time::{Delay, Duration, Ticker};

use tactus_core::{InputController, PollOutcome};
use tactus_drivers::RemoteController;

use crate::channels::{CHORD_STATE, KEY_CHANNEL};
use crate::clock::EmbassyClock;

/// The controller as wired on the board
pub type RemoteInput = InputController<
    RemoteController<I2c<'static, I2C1, Async>, Output<'static>, Delay>,
    EmbassyClock,
>;

/// Input task - polls the remote controller and publishes keys
#[embassy_executor::task]
pub async fn input_task(mut input: RemoteInput) {
    info!("Input task started");

    input.init();

    let gate = input.decoder().gate();
    info!(
        "Remote controller reset, sampling every {} us (tick {} us)",
        gate.min_interval_us(),
        gate.tick_interval_us()
    );

    let mut ticker = Ticker::every(Duration::from_micros(gate.tick_interval_us()));
    let mut last_state = input.direction_state();
    let mut dropped = 0;

    loop {
        ticker.next().await;

        match input.poll_async().await {
            PollOutcome::Sampled => trace!("Sampled"),
            PollOutcome::Throttled => continue,
            PollOutcome::Failed(e) => {
                // Retried on the next tick
                warn!("Controller read failed: {}", e);
                continue;
            }
            PollOutcome::Inactive => {
                warn!("Input controller inactive, re-initializing");
                input.init();
                continue;
            }
        }

        while let Some(key) = input.take_event() {
            debug!("Key {}", key);
            if KEY_CHANNEL.try_send(key).is_err() {
                warn!("Key channel full, dropping {}", key);
            }
        }

        let total_dropped = input.decoder().queue().dropped();
        if total_dropped > dropped {
            warn!(
                "Decoder queue overflowed, {} keys lost",
                total_dropped - dropped
            );
        }
        dropped = total_dropped;

        let state = input.direction_state();
        if state != last_state {
            CHORD_STATE.signal(state);
            last_state = state;
        }
    }
}
