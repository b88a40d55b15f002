//! Hypervisor capacity and load bookkeeping.

use crate::error::{PlacementError, PlacementResult};
use crate::vm::Vm;

/// A capacity-bounded hypervisor accumulating assigned VMs.
///
/// The load fields stay consistent with the assignment list because every
/// mutation funnels through [`Hypervisor::accept`].
#[derive(Debug, Clone)]
pub struct Hypervisor {
    id: String,
    maxram: u64,
    vms: Vec<Vm>,
    load_absolute: u64,
    load_percent: f64,
}

impl Hypervisor {
    pub fn new(id: impl Into<String>, maxram: u64) -> Self {
        Self {
            id: id.into(),
            maxram,
            vms: Vec::new(),
            load_absolute: 0,
            load_percent: 0.0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Capacity (maximum RAM).
    pub fn maxram(&self) -> u64 {
        self.maxram
    }

    /// Assigned VMs, in placement order.
    pub fn vms(&self) -> &[Vm] {
        &self.vms
    }

    pub fn load_absolute(&self) -> u64 {
        self.load_absolute
    }

    pub fn load_percent(&self) -> f64 {
        self.load_percent
    }

    /// Whether no load has been assigned yet.
    pub fn is_free(&self) -> bool {
        self.load_absolute == 0
    }

    /// Whether the VM can be accepted without exceeding capacity.
    pub fn fits(&self, vm: &Vm) -> bool {
        self.load_absolute + vm.ram() <= self.maxram
    }

    /// Load in percent this hypervisor would have after accepting `vm`.
    /// Evaluates the hypothetical without committing anything.
    pub fn load_after(&self, vm: &Vm) -> f64 {
        (self.load_absolute + vm.ram()) as f64 * 100.0 / self.maxram as f64
    }

    /// Accept a VM, updating load and the assignment list.
    ///
    /// This is the single place capacity safety is enforced; callers are
    /// expected to check [`Hypervisor::fits`] first.
    pub fn accept(&mut self, vm: Vm) -> PlacementResult<()> {
        let new_load = self.load_absolute + vm.ram();
        if new_load > self.maxram {
            return Err(PlacementError::CapacityExceeded {
                hypervisor: self.id.clone(),
                vm: vm.id().to_string(),
            });
        }

        self.load_percent = self.load_after(&vm);
        self.load_absolute = new_load;
        self.vms.push(vm);
        Ok(())
    }

    /// Drop all assigned VMs and return to the unloaded state. Only used
    /// to reuse a hypervisor between independent runs.
    pub fn reset(&mut self) {
        self.load_percent = 0.0;
        self.load_absolute = 0;
        self.vms.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_up_to_exact_capacity() {
        let mut hv = Hypervisor::new("hv1", 100);
        hv.accept(Vm::new("vm1", 60)).unwrap();

        assert!(hv.fits(&Vm::new("vm2", 40)));
        assert!(!hv.fits(&Vm::new("vm3", 41)));
    }

    #[test]
    fn accept_updates_load_and_keeps_order() {
        let mut hv = Hypervisor::new("hv1", 200);
        hv.accept(Vm::new("vm1", 50)).unwrap();
        hv.accept(Vm::new("vm2", 30)).unwrap();

        assert_eq!(hv.load_absolute(), 80);
        assert!((hv.load_percent() - 40.0).abs() < 1e-9);
        let ids: Vec<&str> = hv.vms().iter().map(Vm::id).collect();
        assert_eq!(ids, vec!["vm1", "vm2"]);
    }

    #[test]
    fn accept_rejects_over_capacity() {
        let mut hv = Hypervisor::new("hv1", 100);
        hv.accept(Vm::new("vm1", 90)).unwrap();

        let err = hv.accept(Vm::new("vm2", 20)).unwrap_err();
        assert!(matches!(err, PlacementError::CapacityExceeded { .. }));

        // The failed accept must not have touched any state.
        assert_eq!(hv.load_absolute(), 90);
        assert_eq!(hv.vms().len(), 1);
    }

    #[test]
    fn load_after_is_pure() {
        let mut hv = Hypervisor::new("hv1", 100);
        hv.accept(Vm::new("vm1", 20)).unwrap();

        let projected = hv.load_after(&Vm::new("vm2", 30));
        assert!((projected - 50.0).abs() < 1e-9);
        assert_eq!(hv.load_absolute(), 20);
        assert_eq!(hv.vms().len(), 1);
    }

    #[test]
    fn reset_clears_everything() {
        let mut hv = Hypervisor::new("hv1", 100);
        hv.accept(Vm::new("vm1", 70)).unwrap();

        hv.reset();
        assert!(hv.is_free());
        assert_eq!(hv.load_absolute(), 0);
        assert_eq!(hv.load_percent(), 0.0);
        assert!(hv.vms().is_empty());
    }
}
