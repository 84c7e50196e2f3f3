//! Consumer-facing input controller
//!
//! Couples a [`Decoder`] with its collaborators: the remote device (bus
//! link plus reset sequencing) and a clock. Reads are demand-driven: every
//! call that wants fresh data first asks the poll gate whether a bus read
//! is due.
//!
//! ```text
//! read_next_event() ──► poll() ──► gate due? ──► BusLink::read_sample()
//!        │                                              │
//!        ▼                                              ▼
//!   queue.pop() ◄──────────── channels + pot ◄──── RawSample
//! ```

use tactus_protocol::{ButtonMasks, KeyCode};

use crate::config::DecoderConfig;
use crate::decoder::Decoder;
use crate::gate::PollOutcome;
use crate::traits::{AsyncBusLink, BusLink, Clock, DeviceLifecycle};

/// Remote controller input, owned by a single caller
pub struct InputController<D, C> {
    device: D,
    clock: C,
    decoder: Decoder,
    /// Set between `init` and `deinit`
    active: bool,
}

impl<D, C> InputController<D, C> {
    /// Create an inactive controller; call [`init`](Self::init) before polling
    pub fn new(device: D, clock: C, config: &DecoderConfig) -> Self {
        Self {
            device,
            clock,
            decoder: Decoder::new(config),
            active: false,
        }
    }

    /// Check if the device has been brought up
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Decoder state, for inspection
    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    /// Give back the device and clock
    pub fn release(self) -> (D, C) {
        (self.device, self.clock)
    }

    /// Take the oldest pending key without touching the bus
    pub fn take_event(&mut self) -> Option<KeyCode> {
        self.decoder.pop()
    }

    /// Directional group masks from the last successful poll, without polling
    pub fn direction_state(&self) -> ButtonMasks {
        self.decoder.direction_state()
    }
}

impl<D: AsyncBusLink, C: Clock> InputController<D, C> {
    /// Read and decode a sample over the async link if the interval has elapsed
    pub async fn poll_async(&mut self) -> PollOutcome {
        if !self.active {
            return PollOutcome::Inactive;
        }
        self.decoder.poll_async(&mut self.device, &self.clock).await
    }
}

impl<D: DeviceLifecycle, C> InputController<D, C> {
    /// Reset the remote device and start from a clean decoder
    ///
    /// Calling this again while active repeats the reset.
    pub fn init(&mut self) {
        self.device.bring_up();
        self.decoder.reset();
        self.active = true;
    }

    /// Tear the device down; polling becomes a no-op until the next `init`
    pub fn deinit(&mut self) {
        if !self.active {
            return;
        }
        self.device.tear_down();
        self.active = false;
    }
}

impl<D: BusLink, C: Clock> InputController<D, C> {
    /// Read and decode a sample if the poll interval has elapsed
    pub fn poll(&mut self) -> PollOutcome {
        if !self.active {
            return PollOutcome::Inactive;
        }
        self.decoder.poll(&mut self.device, &self.clock)
    }

    /// Poll, then take the oldest pending key
    ///
    /// A failed poll is retried by the next call. Callers that already
    /// polled should drain with [`take_event`](Self::take_event).
    pub fn read_next_event(&mut self) -> Option<KeyCode> {
        self.poll();
        self.decoder.pop()
    }

    /// Poll, then take the oldest pending key as its host character byte
    pub fn read_key_byte(&mut self) -> Option<u8> {
        self.read_next_event().map(KeyCode::to_byte)
    }

    /// Poll, then report the directional group's latest masks
    ///
    /// Leaves the key queue alone; for hosts that want chord state rather
    /// than discrete keys.
    pub fn group_state(&mut self) -> ButtonMasks {
        self.poll();
        self.decoder.direction_state()
    }
}
