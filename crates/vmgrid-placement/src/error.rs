//! Placement error types.

use thiserror::Error;

/// Errors that can occur while managing a hypervisor pool.
#[derive(Debug, Error)]
pub enum PlacementError {
    /// Accepting the VM would exceed the hypervisor's capacity. Callers
    /// gate on `fits`, so reaching this is a bug on the calling side.
    #[error("hypervisor {hypervisor} has not enough free space for vm {vm}")]
    CapacityExceeded { hypervisor: String, vm: String },

    #[error("no hypervisors to manage")]
    NothingToManage,
}

pub type PlacementResult<T> = Result<T, PlacementError>;
