//! Type conversions between the wire model and placement types.
//!
//! Bridges `vmgrid_core::model::{HypervisorSpec, VmSpec}` to the
//! engine's [`Hypervisor`] and [`Vm`].

use vmgrid_core::model::{HypervisorSpec, VmSpec};

use crate::hypervisor::Hypervisor;
use crate::vm::Vm;

/// Convert an input descriptor to a managed [`Hypervisor`].
pub fn hypervisor_from_spec(spec: &HypervisorSpec) -> Hypervisor {
    Hypervisor::new(spec.id.clone(), spec.maxram)
}

/// Convert an input descriptor to a [`Vm`].
pub fn vm_from_spec(spec: &VmSpec) -> Vm {
    Vm::new(spec.id.clone(), spec.ram)
}

/// Convert a placed [`Vm`] back to its wire descriptor for the report.
pub fn vm_to_spec(vm: &Vm) -> VmSpec {
    VmSpec {
        id: vm.id().to_string(),
        ram: vm.ram(),
    }
}
