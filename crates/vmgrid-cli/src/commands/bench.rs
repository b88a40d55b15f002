//! `vmgrid bench` - synthetic placement rounds for timing and balance.
//!
//! Each round generates a fresh random pool and workload, places every VM
//! while timing the individual decisions, and records the final average
//! deviation. The means over all rounds are printed at the end; the core
//! itself stays deterministic, all randomness lives here.

use std::fs;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use rand::Rng;
use tracing::info;

use vmgrid_placement::{Hypervisor, HypervisorPool, Vm};

/// Capacities the generated hypervisors draw from.
const HYPERVISOR_SIZES: &[u64] = &[512, 1024, 2048, 4096, 8192];
/// RAM requirements the generated VMs draw from.
const VM_SIZES: &[u64] = &[64, 128, 256, 512];

const RESULT_FILE: &str = "profiling_result.json";

pub fn run(runs: u32, num_hypervisors: u32, num_vms: u32, write_result: bool) -> Result<()> {
    info!(
        runs,
        hypervisors = num_hypervisors,
        vms = num_vms,
        "starting bench rounds"
    );

    let mut rng = rand::thread_rng();
    let mut total_time_ms = 0.0;
    let mut total_deviation = 0.0;
    let mut last_pool = None;

    for _ in 0..runs {
        let mut pool = HypervisorPool::new(generate_hypervisors(&mut rng, num_hypervisors))?;
        let mut elapsed = Duration::ZERO;

        for vm in generate_vms(&mut rng, num_vms) {
            let start = Instant::now();
            pool.place(vm)?;
            elapsed += start.elapsed();
        }

        total_time_ms += elapsed.as_secs_f64() * 1000.0 / f64::from(num_vms);
        total_deviation += pool.average_deviation();
        last_pool = Some(pool);
    }

    println!(
        "Average time per vm: {:.4}ms  Average deviation: {:.2}%",
        total_time_ms / f64::from(runs),
        total_deviation / f64::from(runs),
    );

    if write_result {
        if let Some(pool) = &last_pool {
            let json = serde_json::to_string_pretty(&pool.report())?;
            fs::write(RESULT_FILE, json).with_context(|| format!("writing {RESULT_FILE}"))?;
            println!("✓ Wrote the last round's assignment to {RESULT_FILE}");
        }
    }

    Ok(())
}

fn generate_hypervisors(rng: &mut impl Rng, num: u32) -> Vec<Hypervisor> {
    (1..=num)
        .map(|i| {
            let maxram = HYPERVISOR_SIZES[rng.gen_range(0..HYPERVISOR_SIZES.len())];
            Hypervisor::new(format!("hypervisor{i}"), maxram)
        })
        .collect()
}

fn generate_vms(rng: &mut impl Rng, num: u32) -> Vec<Vm> {
    (1..=num)
        .map(|i| {
            let ram = VM_SIZES[rng.gen_range(0..VM_SIZES.len())];
            Vm::new(format!("vm{i}"), ram)
        })
        .collect()
}
