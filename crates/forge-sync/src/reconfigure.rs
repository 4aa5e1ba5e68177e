use crate::error::ForgeError;

/// Outbound request asking the host process to reload its project list.
///
/// Modeled as an explicit command rather than direct process control so the
/// pipeline stays testable without a running host. Delivery is
/// fire-and-forget: implementations do not wait for the host to finish
/// reloading.
pub trait Reconfigure: Send + Sync {
    fn request_reconfiguration(&self) -> Result<(), ForgeError>;
}

/// Trigger for hosts that have no reconfiguration channel. Does nothing.
pub struct NoopReconfigure;

impl Reconfigure for NoopReconfigure {
    fn request_reconfiguration(&self) -> Result<(), ForgeError> {
        Ok(())
    }
}
