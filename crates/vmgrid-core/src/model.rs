//! Wire types shared between the input files, the placement engine, and
//! the assignment report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A hypervisor as described in the input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HypervisorSpec {
    pub id: String,
    /// Capacity (maximum RAM) of the hypervisor.
    pub maxram: u64,
}

/// Root object of the hypervisors input file.
///
/// `hypervisors` stays `None` when the key is missing entirely, so callers
/// can tell a malformed file apart from an empty pool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HypervisorCatalog {
    pub hypervisors: Option<Vec<HypervisorSpec>>,
}

/// A VM as described in the input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmSpec {
    pub id: String,
    /// Memory requirement of the VM.
    pub ram: u64,
}

/// Root object of the VMs input file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VmCatalog {
    pub vms: Option<Vec<VmSpec>>,
}

/// The VMs assigned to one hypervisor, in placement order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HypervisorAssignment {
    pub vms: Vec<VmSpec>,
}

/// The full assignment: hypervisor id to its VMs. Every managed
/// hypervisor appears, with an empty list if it received nothing.
pub type PlacementReport = BTreeMap<String, HypervisorAssignment>;
