//! Hypervisor pool - the placement decision and pool-wide statistics.

use tracing::{debug, warn};

use vmgrid_core::model::{HypervisorAssignment, PlacementReport};

use crate::convert::vm_to_spec;
use crate::error::{PlacementError, PlacementResult};
use crate::hypervisor::Hypervisor;
use crate::vm::Vm;

/// Free hypervisors are only seeded while the projected load stays at or
/// below this percentage.
const SEED_MAX_LOAD_PCT: f64 = 25.0;

/// Owns the managed hypervisors and decides which one receives each VM.
///
/// Placement is online: [`HypervisorPool::place`] commits VMs in call
/// order against the current pool state, so one logical run must call it
/// strictly sequentially. The read-only queries are safe at any point,
/// including mid-sequence.
#[derive(Debug)]
pub struct HypervisorPool {
    hypervisors: Vec<Hypervisor>,
    /// Cached count of hypervisors with zero load.
    free_hypervisors: usize,
}

impl HypervisorPool {
    /// Create a pool over the given hypervisors; their order becomes the
    /// candidate scan order.
    pub fn new(hypervisors: Vec<Hypervisor>) -> PlacementResult<Self> {
        if hypervisors.is_empty() {
            return Err(PlacementError::NothingToManage);
        }
        let free_hypervisors = hypervisors.iter().filter(|hv| hv.is_free()).count();
        Ok(Self {
            hypervisors,
            free_hypervisors,
        })
    }

    /// The managed hypervisors, in construction order.
    pub fn hypervisors(&self) -> &[Hypervisor] {
        &self.hypervisors
    }

    /// Number of hypervisors without any assigned load.
    pub fn free_hypervisors(&self) -> usize {
        self.free_hypervisors
    }

    /// Mean load in percent over all hypervisors, free ones included.
    pub fn average_load(&self) -> f64 {
        let total: f64 = self.hypervisors.iter().map(Hypervisor::load_percent).sum();
        total / self.hypervisors.len() as f64
    }

    /// Mean absolute deviation from [`HypervisorPool::average_load`],
    /// again over all hypervisors.
    pub fn average_deviation(&self) -> f64 {
        let average = self.average_load();
        let total: f64 = self
            .hypervisors
            .iter()
            .map(|hv| (average - hv.load_percent()).abs())
            .sum();
        total / self.hypervisors.len() as f64
    }

    /// Place a VM on the best hypervisor and commit the assignment.
    ///
    /// Returns the receiving hypervisor, or `None` (after a warning naming
    /// the VM) when no hypervisor has enough remaining capacity. An
    /// unplaced VM is dropped; later placements continue normally.
    pub fn place(&mut self, vm: Vm) -> PlacementResult<Option<&Hypervisor>> {
        let target = self
            .seed_free_hypervisor(&vm)
            .or_else(|| self.most_balanced_hypervisor(&vm));

        let Some(idx) = target else {
            warn!(vm = %vm.id(), ram = vm.ram(), "not enough free capacity to place vm");
            return Ok(None);
        };

        debug!(vm = %vm.id(), hypervisor = %self.hypervisors[idx].id(), "placing vm");

        let was_free = self.hypervisors[idx].is_free();
        self.hypervisors[idx].accept(vm)?;
        // Sole site where a hypervisor can leave the free set. A zero-ram
        // VM leaves the load at zero and the hypervisor stays free.
        if was_free && !self.hypervisors[idx].is_free() {
            self.free_hypervisors -= 1;
        }

        Ok(Some(&self.hypervisors[idx]))
    }

    /// Snapshot of the full assignment: every hypervisor mapped to its
    /// VMs in placement order.
    pub fn report(&self) -> PlacementReport {
        self.hypervisors
            .iter()
            .map(|hv| {
                let vms = hv.vms().iter().map(vm_to_spec).collect();
                (hv.id().to_string(), HypervisorAssignment { vms })
            })
            .collect()
    }

    /// Step 1: route the VM to the smallest free hypervisor it would keep
    /// at or below [`SEED_MAX_LOAD_PCT`]. Biases small VMs onto small
    /// free hypervisors so the large ones stay available for large VMs.
    fn seed_free_hypervisor(&self, vm: &Vm) -> Option<usize> {
        if self.free_hypervisors == 0 {
            return None;
        }
        self.hypervisors
            .iter()
            .enumerate()
            .filter(|(_, hv)| {
                hv.is_free() && hv.fits(vm) && hv.load_after(vm) <= SEED_MAX_LOAD_PCT
            })
            .min_by_key(|(_, hv)| hv.maxram())
            .map(|(idx, _)| idx)
    }

    /// Step 2: evaluate every hypervisor with room and pick the one whose
    /// hypothetical acceptance yields the lowest pool-wide deviation.
    /// Equal deviations resolve toward the higher post-placement load,
    /// packing fuller hypervisors before spreading out.
    fn most_balanced_hypervisor(&self, vm: &Vm) -> Option<usize> {
        // Scratch copy of the current loads; the candidate slot is swapped
        // in and out so every hypothetical sees all other loads unchanged.
        let mut loads: Vec<f64> = self
            .hypervisors
            .iter()
            .map(Hypervisor::load_percent)
            .collect();

        let mut best: Option<Candidate> = None;

        for (idx, hv) in self.hypervisors.iter().enumerate() {
            if !hv.fits(vm) {
                continue;
            }

            let load_after = hv.load_after(vm);
            loads[idx] = load_after;
            let deviation = deviation_of(&loads);
            loads[idx] = hv.load_percent();

            let better = match &best {
                None => true,
                Some(current) => {
                    deviation < current.deviation
                        || (deviation == current.deviation && load_after > current.load_after)
                }
            };
            if better {
                best = Some(Candidate {
                    idx,
                    deviation,
                    load_after,
                });
            }
        }

        best.map(|candidate| candidate.idx)
    }
}

/// A feasible target while step 2 scans the pool.
struct Candidate {
    idx: usize,
    deviation: f64,
    load_after: f64,
}

/// Average deviation the pool would have with the given loads. The mean
/// load counts occupied hypervisors only, while the deviation itself is
/// averaged over the whole slice.
fn deviation_of(loads: &[f64]) -> f64 {
    let occupied = loads.iter().filter(|load| **load > 0.0).count();
    let average = if occupied == 0 {
        0.0
    } else {
        loads.iter().sum::<f64>() / occupied as f64
    };
    loads.iter().map(|load| (average - load).abs()).sum::<f64>() / loads.len() as f64
}
