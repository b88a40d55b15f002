//! vmgrid-placement - balanced VM assignment across hypervisors.
//!
//! Decides, one VM at a time, which hypervisor receives the VM so that
//! memory utilization stays as evenly spread as possible without ever
//! exceeding a hypervisor's capacity. The decision is a two-step
//! heuristic:
//!
//! 1. **Free-hypervisor seeding**: small VMs go to the smallest free
//!    hypervisor they keep lightly loaded, reserving large free
//!    hypervisors for later large VMs.
//! 2. **Best fit by deviation**: otherwise every hypervisor with room is
//!    evaluated by the pool-wide load deviation it would cause, and the
//!    lowest wins.
//!
//! The pool is online: VMs are committed in arrival order and never moved
//! again, so a given host/VM sequence always produces the same assignment.
//!
//! # Components
//!
//! - **`hypervisor`** - capacity and load bookkeeping for a single host
//! - **`pool`** - the placement decision and pool-wide statistics
//! - **`convert`** - bridges from the `vmgrid-core` wire types

pub mod convert;
pub mod error;
pub mod hypervisor;
pub mod pool;
pub mod vm;

pub use convert::{hypervisor_from_spec, vm_from_spec, vm_to_spec};
pub use error::{PlacementError, PlacementResult};
pub use hypervisor::Hypervisor;
pub use pool::HypervisorPool;
pub use vm::Vm;
