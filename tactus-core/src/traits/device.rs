//! Remote controller lifecycle

/// Bring-up and teardown of the remote controller and its bus
///
/// Neither operation reports failure; implementations log and carry on.
/// Callers must not invoke these while a read is in flight.
pub trait DeviceLifecycle {
    /// Reset the controller and make the bus ready for reads
    fn bring_up(&mut self);

    /// Quiesce the bus and leave the controller in reset-cycled state
    fn tear_down(&mut self);
}

impl<T: DeviceLifecycle + ?Sized> DeviceLifecycle for &mut T {
    fn bring_up(&mut self) {
        (**self).bring_up()
    }

    fn tear_down(&mut self) {
        (**self).tear_down()
    }
}
