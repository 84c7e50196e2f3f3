//! Bus link trait for reading controller snapshots

use core::future::Future;

use tactus_protocol::RawSample;

/// Errors that can occur while reading a snapshot
///
/// Both kinds are non-fatal. The decoder treats them identically: no new
/// data this round, retry on the next poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// The read did not complete within the link's timeout
    Timeout,
    /// Bus-level failure (NACK, arbitration loss, short read)
    Transport,
}

/// Blocking source of controller snapshots
///
/// Implementations perform one blocking read per call. Whether that read
/// is bounded depends on the bus underneath.
pub trait BusLink {
    /// Read the controller's latest snapshot
    fn read_sample(&mut self) -> Result<RawSample, BusError>;
}

impl<T: BusLink + ?Sized> BusLink for &mut T {
    fn read_sample(&mut self) -> Result<RawSample, BusError> {
        BusLink::read_sample(&mut **self)
    }
}

/// Async source of controller snapshots
///
/// Implementations bound each read with a timeout and report expiry as
/// [`BusError::Timeout`].
pub trait AsyncBusLink {
    /// Read the controller's latest snapshot
    fn read_sample(&mut self) -> impl Future<Output = Result<RawSample, BusError>>;
}

impl<T: AsyncBusLink + ?Sized> AsyncBusLink for &mut T {
    fn read_sample(&mut self) -> impl Future<Output = Result<RawSample, BusError>> {
        AsyncBusLink::read_sample(&mut **self)
    }
}
