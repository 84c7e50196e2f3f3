//! Collaborator traits
//!
//! These traits define the interface between the decoder and the
//! hardware-specific pieces around it: the bus that delivers snapshots,
//! the reset/bring-up sequencing of the remote controller, and a
//! monotonic clock for rate limiting.

pub mod clock;
pub mod device;
pub mod link;

pub use clock::Clock;
pub use device::DeviceLifecycle;
pub use link::{AsyncBusLink, BusError, BusLink};
