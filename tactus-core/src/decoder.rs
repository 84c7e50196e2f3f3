//! Input decoder
//!
//! Owns every piece of decoding state: the key queue, one channel per
//! button group, the potentiometer decoder and the poll gate. All of it
//! is mutated through `&mut self`; callers that share a decoder between
//! tasks must serialize access themselves.

use tactus_protocol::{ButtonMasks, KeyCode, RawSample};

use crate::config::DecoderConfig;
use crate::debounce::{ButtonChannel, DIRECTION_GROUP, FUNCTION_GROUP, PAGER_GROUP};
use crate::gate::{PollGate, PollOutcome};
use crate::pot::PotDecoder;
use crate::queue::EventQueue;
use crate::traits::{AsyncBusLink, BusError, BusLink, Clock};

/// Snapshot-to-key decoder
#[derive(Debug, Clone)]
pub struct Decoder {
    queue: EventQueue,
    direction: ButtonChannel,
    pager: ButtonChannel,
    function: ButtonChannel,
    pot: PotDecoder,
    gate: PollGate,
    /// Directional group masks from the latest decoded sample
    latest_mcl: ButtonMasks,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(&DecoderConfig::default())
    }
}

impl Decoder {
    /// Create a decoder with empty queue and zeroed history
    pub fn new(config: &DecoderConfig) -> Self {
        Self {
            queue: EventQueue::new(),
            direction: ButtonChannel::new(&DIRECTION_GROUP, config.repeat_threshold),
            pager: ButtonChannel::new(&PAGER_GROUP, config.repeat_threshold),
            function: ButtonChannel::new(&FUNCTION_GROUP, config.repeat_threshold),
            pot: PotDecoder::new(config.pot_channel as usize, config.pot_step),
            gate: PollGate::new(config.poll_interval_us),
            latest_mcl: ButtonMasks::default(),
        }
    }

    /// Return to the freshly constructed state
    pub fn reset(&mut self) {
        self.queue.clear();
        self.direction.reset();
        self.pager.reset();
        self.function.reset();
        self.pot.reset();
        self.gate.reset();
        self.latest_mcl = ButtonMasks::default();
    }

    /// Poll the bus if due and decode what it returns
    ///
    /// On success the completion time becomes the gate's new reference.
    /// On failure nothing changes.
    pub fn poll<L, C>(&mut self, link: &mut L, clock: &C) -> PollOutcome
    where
        L: BusLink + ?Sized,
        C: Clock + ?Sized,
    {
        if !self.gate.is_due(clock.now_us()) {
            return PollOutcome::Throttled;
        }
        let result = BusLink::read_sample(link);
        self.complete(result, clock)
    }

    /// [`poll`](Self::poll) over an async link
    pub async fn poll_async<L, C>(&mut self, link: &mut L, clock: &C) -> PollOutcome
    where
        L: AsyncBusLink + ?Sized,
        C: Clock + ?Sized,
    {
        if !self.gate.is_due(clock.now_us()) {
            return PollOutcome::Throttled;
        }
        let result = AsyncBusLink::read_sample(link).await;
        self.complete(result, clock)
    }

    fn complete<C>(&mut self, result: Result<RawSample, BusError>, clock: &C) -> PollOutcome
    where
        C: Clock + ?Sized,
    {
        match result {
            Ok(sample) => {
                self.gate.record_success(clock.now_us());
                self.decode(&sample);
                PollOutcome::Sampled
            }
            Err(e) => PollOutcome::Failed(e),
        }
    }

    /// Run one sample through every group and the potentiometer
    ///
    /// Bypasses the poll gate.
    pub fn decode(&mut self, sample: &RawSample) {
        self.latest_mcl = sample.mcl;

        for channel in [&mut self.direction, &mut self.function, &mut self.pager] {
            let masks = channel.group().source.select(sample);
            channel.update(masks, &mut self.queue);
        }
        self.pot.update(sample, &mut self.queue);
    }

    /// Take the oldest pending key
    pub fn pop(&mut self) -> Option<KeyCode> {
        self.queue.pop()
    }

    /// Pending keys
    pub fn queue(&self) -> &EventQueue {
        &self.queue
    }

    /// Directional group masks from the latest decoded sample
    pub fn direction_state(&self) -> ButtonMasks {
        self.latest_mcl
    }

    pub fn pot(&self) -> &PotDecoder {
        &self.pot
    }

    pub fn gate(&self) -> &PollGate {
        &self.gate
    }

    pub fn direction(&self) -> &ButtonChannel {
        &self.direction
    }

    pub fn pager(&self) -> &ButtonChannel {
        &self.pager
    }

    pub fn function(&self) -> &ButtonChannel {
        &self.function
    }
}
