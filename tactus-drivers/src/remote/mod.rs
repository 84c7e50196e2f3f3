//! Remote input controller driver
//!
//! The controller is an I2C slave that always answers a plain read with
//! its latest 48-byte snapshot; there is no register addressing. Its reset
//! input is wired to a host GPIO.
//!
//! # Bus timeout
//!
//! Over an async bus ([`AsyncBusLink`]) every read races the configured
//! `read_timeout_ms`; a controller stretching the clock forever yields
//! [`BusError::Timeout`] and the transfer is abandoned. The blocking
//! [`BusLink`] path is only as bounded as the I2C implementation handed in.

mod reset;

pub use reset::ResetLine;

use embassy_futures::select::{select, Either};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use tactus_core::config::BusConfig;
use tactus_core::traits::{AsyncBusLink, BusError, BusLink, DeviceLifecycle};
use tactus_protocol::{RawSample, SAMPLE_LEN};

/// Remote controller on an I2C bus with a reset line
pub struct RemoteController<I2C, P, D> {
    i2c: I2C,
    reset: ResetLine<P>,
    delay: D,
    address: u8,
    read_timeout_ms: u32,
}

impl<I2C, P, D> RemoteController<I2C, P, D>
where
    P: OutputPin,
{
    /// Create a driver; the controller is not reset until `bring_up`
    pub fn new(i2c: I2C, reset_pin: P, delay: D, config: &BusConfig) -> Self {
        Self {
            i2c,
            reset: ResetLine::new(reset_pin, config.reset_low_ms, config.reset_settle_ms),
            delay,
            address: config.address,
            read_timeout_ms: config.read_timeout_ms,
        }
    }

    /// I2C address the snapshots are read from
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give back the bus, reset pin and delay
    pub fn release(self) -> (I2C, P, D) {
        (self.i2c, self.reset.release(), self.delay)
    }
}

/// embedded-hal has no timeout kind; every bus failure is a transport error
fn transport<E: embedded_hal::i2c::Error>(_e: E) -> BusError {
    #[cfg(feature = "defmt")]
    defmt::trace!(
        "Controller read failed: {}",
        embedded_hal::i2c::Error::kind(&_e)
    );
    BusError::Transport
}

impl<I2C, P, D> BusLink for RemoteController<I2C, P, D>
where
    I2C: embedded_hal::i2c::I2c,
    P: OutputPin,
{
    fn read_sample(&mut self) -> Result<RawSample, BusError> {
        let mut buf = [0u8; SAMPLE_LEN];
        embedded_hal::i2c::I2c::read(&mut self.i2c, self.address, &mut buf)
            .map_err(transport)?;
        RawSample::from_bytes(&buf).map_err(|_| BusError::Transport)
    }
}

impl<I2C, P, D> AsyncBusLink for RemoteController<I2C, P, D>
where
    I2C: embedded_hal_async::i2c::I2c,
    P: OutputPin,
    D: embedded_hal_async::delay::DelayNs,
{
    async fn read_sample(&mut self) -> Result<RawSample, BusError> {
        let mut buf = [0u8; SAMPLE_LEN];

        let read = embedded_hal_async::i2c::I2c::read(&mut self.i2c, self.address, &mut buf);
        let timeout =
            embedded_hal_async::delay::DelayNs::delay_ms(&mut self.delay, self.read_timeout_ms);

        match select(read, timeout).await {
            Either::First(result) => result.map_err(transport)?,
            Either::Second(()) => {
                #[cfg(feature = "defmt")]
                defmt::trace!("Controller read timed out after {} ms", self.read_timeout_ms);
                return Err(BusError::Timeout);
            }
        }

        RawSample::from_bytes(&buf).map_err(|_| BusError::Transport)
    }
}

impl<I2C, P, D> DeviceLifecycle for RemoteController<I2C, P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    fn bring_up(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::debug!("Resetting remote controller at 0x{:02x}", self.address);
        self.reset.pulse(&mut self.delay);
    }

    fn tear_down(&mut self) {
        // Leave the controller freshly reset so it starts clean next time
        self.reset.pulse(&mut self.delay);
    }
}

#[cfg(test)]
mod tests {
    use super::reset::tests::RecordingDelay;
    use super::*;
    use embassy_futures::block_on;
    use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
    use tactus_core::config::DecoderConfig;
    use tactus_core::{InputController, PollOutcome};
    use tactus_protocol::{mcl, ButtonMasks, KeyCode, CONTROLLER_ADDR};

    fn reset_pulses(count: usize) -> Vec<PinTransaction> {
        let mut transactions = Vec::new();
        for _ in 0..count {
            transactions.push(PinTransaction::set(PinState::Low));
            transactions.push(PinTransaction::set(PinState::High));
        }
        transactions
    }

    fn left_pressed() -> Vec<u8> {
        let sample = RawSample {
            mcl: ButtonMasks::new(1 << mcl::LEFT, 0),
            pot_positions: [512, 0, 0, 0],
            ..Default::default()
        };
        sample.to_bytes().to_vec()
    }

    /// Bus whose transfers never finish, like a slave holding SCL low
    struct StuckI2c;

    impl ErrorType for StuckI2c {
        type Error = ErrorKind;
    }

    impl embedded_hal_async::i2c::I2c for StuckI2c {
        async fn transaction(
            &mut self,
            _address: u8,
            _operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            core::future::pending().await
        }
    }

    #[test]
    fn test_read_sample() {
        let mut i2c = I2cMock::new(&[I2cTransaction::read(CONTROLLER_ADDR, left_pressed())]);
        let mut pin = PinMock::new(&[]);

        let mut remote = RemoteController::new(
            i2c.clone(),
            pin.clone(),
            RecordingDelay::default(),
            &BusConfig::default(),
        );

        let sample = BusLink::read_sample(&mut remote).unwrap();
        assert!(sample.mcl.is_pressed(mcl::LEFT));
        assert_eq!(sample.pot_positions[0], 512);

        i2c.done();
        pin.done();
    }

    #[test]
    fn test_nack_is_transport_error() {
        let mut i2c = I2cMock::new(&[I2cTransaction::read(CONTROLLER_ADDR, vec![0; SAMPLE_LEN])
            .with_error(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))]);
        let mut pin = PinMock::new(&[]);

        let mut remote = RemoteController::new(
            i2c.clone(),
            pin.clone(),
            RecordingDelay::default(),
            &BusConfig::default(),
        );

        assert_eq!(BusLink::read_sample(&mut remote), Err(BusError::Transport));

        i2c.done();
        pin.done();
    }

    #[test]
    fn test_configured_address() {
        let config = BusConfig {
            address: 0x21,
            ..Default::default()
        };
        let mut i2c = I2cMock::new(&[I2cTransaction::read(0x21, left_pressed())]);
        let mut pin = PinMock::new(&[]);

        let mut remote =
            RemoteController::new(i2c.clone(), pin.clone(), RecordingDelay::default(), &config);
        assert_eq!(remote.address(), 0x21);
        assert!(BusLink::read_sample(&mut remote).is_ok());

        i2c.done();
        pin.done();
    }

    #[test]
    fn test_async_read_sample() {
        let mut i2c = I2cMock::new(&[I2cTransaction::read(CONTROLLER_ADDR, left_pressed())]);
        let mut pin = PinMock::new(&[]);

        let mut remote = RemoteController::new(
            i2c.clone(),
            pin.clone(),
            RecordingDelay::default(),
            &BusConfig::default(),
        );

        let sample = block_on(AsyncBusLink::read_sample(&mut remote)).unwrap();
        assert!(sample.mcl.is_pressed(mcl::LEFT));

        // Read won the race; the timeout never started
        let (_, _, delay) = remote.release();
        assert!(delay.ms.is_empty());

        i2c.done();
        pin.done();
    }

    #[test]
    fn test_async_bus_error_is_transport() {
        let mut i2c = I2cMock::new(&[I2cTransaction::read(CONTROLLER_ADDR, vec![0; SAMPLE_LEN])
            .with_error(ErrorKind::ArbitrationLoss)]);
        let mut pin = PinMock::new(&[]);

        let mut remote = RemoteController::new(
            i2c.clone(),
            pin.clone(),
            RecordingDelay::default(),
            &BusConfig::default(),
        );

        assert_eq!(
            block_on(AsyncBusLink::read_sample(&mut remote)),
            Err(BusError::Transport)
        );

        i2c.done();
        pin.done();
    }

    #[test]
    fn test_stuck_bus_times_out() {
        let config = BusConfig {
            read_timeout_ms: 250,
            ..Default::default()
        };
        let mut pin = PinMock::new(&[]);

        let mut remote =
            RemoteController::new(StuckI2c, pin.clone(), RecordingDelay::default(), &config);

        assert_eq!(
            block_on(AsyncBusLink::read_sample(&mut remote)),
            Err(BusError::Timeout)
        );

        let (_, _, delay) = remote.release();
        assert_eq!(delay.ms, [250]);
        pin.done();
    }

    #[test]
    fn test_lifecycle_pulses_reset() {
        let mut i2c = I2cMock::new(&[]);
        let mut pin = PinMock::new(&reset_pulses(2));

        let mut remote = RemoteController::new(
            i2c.clone(),
            pin.clone(),
            RecordingDelay::default(),
            &BusConfig::default(),
        );
        remote.bring_up();
        remote.tear_down();

        let (_, _, delay) = remote.release();
        assert_eq!(delay.ms, [10, 50, 10, 50]);

        i2c.done();
        pin.done();
    }

    struct StepClock(core::cell::Cell<u64>);

    impl tactus_core::traits::Clock for StepClock {
        fn now_us(&self) -> u64 {
            // Every reading is one full poll interval later
            let now = self.0.get();
            self.0.set(now + 2_500);
            now
        }
    }

    #[test]
    fn test_controller_over_i2c() {
        let mut i2c = I2cMock::new(&[
            I2cTransaction::read(CONTROLLER_ADDR, RawSample::default().to_bytes().to_vec()),
            I2cTransaction::read(CONTROLLER_ADDR, vec![0; SAMPLE_LEN])
                .with_error(ErrorKind::ArbitrationLoss),
            I2cTransaction::read(CONTROLLER_ADDR, left_pressed()),
        ]);
        let mut pin = PinMock::new(&reset_pulses(2));

        let remote = RemoteController::new(
            i2c.clone(),
            pin.clone(),
            RecordingDelay::default(),
            &BusConfig::default(),
        );
        let mut input =
            InputController::new(remote, StepClock(Default::default()), &DecoderConfig::default());
        input.init();

        assert!(block_on(input.poll_async()).is_sampled());
        assert_eq!(
            block_on(input.poll_async()),
            PollOutcome::Failed(BusError::Transport)
        );
        assert!(block_on(input.poll_async()).is_sampled());
        assert_eq!(input.take_event(), Some(KeyCode::Left));
        input.deinit();

        i2c.done();
        pin.done();
    }
}
