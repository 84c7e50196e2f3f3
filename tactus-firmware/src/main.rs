//! Tactus - Remote Input Controller Firmware
//!
//! Firmware binary for RP2350B boards with a remote input controller on
//! I2C1. Decodes button, long-press and wheel activity into keys and hands
//! them to consumer tasks.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{Config as I2cConfig, I2c, InterruptHandler as I2cInterruptHandler};
use embassy_rp::peripherals::I2C1;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use tactus_core::InputController;
use tactus_drivers::RemoteController;

use crate::clock::EmbassyClock;
use crate::config::load_config;

mod channels;
mod clock;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    I2C1_IRQ => I2cInterruptHandler<I2C1>;
});

/// Boot ROM image definition for the RP2350
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: embassy_rp::block::ImageDef = embassy_rp::block::ImageDef::secure_exe();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Tactus firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();
    info!(
        "Input config: poll={}us repeat={} step={} channel={} timeout={}ms",
        config.decoder.poll_interval_us,
        config.decoder.repeat_threshold,
        config.decoder.pot_step,
        config.decoder.pot_channel,
        config.bus.read_timeout_ms
    );

    // Pin assignments are board-specific (SCL=GPIO39, SDA=GPIO38, RESET=GPIO40)
    let mut i2c_config = I2cConfig::default();
    i2c_config.frequency = config.bus.frequency;
    let i2c = I2c::new_async(p.I2C1, p.PIN_39, p.PIN_38, Irqs, i2c_config);

    // Controller reset is active-low; start released
    let reset = Output::new(p.PIN_40, Level::High);

    info!(
        "I2C1 initialized at {} Hz, controller at 0x{:02x}",
        config.bus.frequency, config.bus.address
    );

    let remote = RemoteController::new(i2c, reset, Delay, &config.bus);
    let input = InputController::new(remote, EmbassyClock, &config.decoder);

    // Spawn tasks
    spawner.spawn(unwrap!(tasks::input_task(input)));
    spawner.spawn(unwrap!(tasks::console_task()));

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
