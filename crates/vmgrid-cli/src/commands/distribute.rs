//! `vmgrid distribute` - read the input files and print the assignment.
//!
//! Reads the hypervisor and VM json files, places every VM in file order,
//! and writes the resulting assignment as pretty-printed json to stdout or
//! a file. Input problems (missing files, missing keys, nothing to place)
//! abort before any placement happens.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::info;

use vmgrid_core::VmgridConfig;
use vmgrid_core::model::{HypervisorCatalog, HypervisorSpec, VmCatalog, VmSpec};
use vmgrid_placement::{HypervisorPool, hypervisor_from_spec, vm_from_spec};

pub fn run(path: Option<&str>, config_path: &str, output: Option<&str>) -> Result<()> {
    let config = VmgridConfig::load_or_default(Path::new(config_path))?;
    let input_dir = PathBuf::from(path.unwrap_or_else(|| config.input_path()));

    let hypervisors = read_hypervisors(&input_dir.join(config.hypervisors_file()))?;
    let vms = read_vms(&input_dir.join(config.vms_file()))?;

    let mut pool = HypervisorPool::new(hypervisors.iter().map(hypervisor_from_spec).collect())?;
    for spec in &vms {
        pool.place(vm_from_spec(spec))?;
    }

    info!(
        average_load = pool.average_load(),
        average_deviation = pool.average_deviation(),
        "placed {} vms on {} hypervisors",
        vms.len(),
        pool.hypervisors().len(),
    );

    let json = serde_json::to_string_pretty(&pool.report())?;
    match output {
        Some(file) => {
            fs::write(file, &json).with_context(|| format!("writing result to {file}"))?;
            println!("✓ Wrote assignment to {file}");
        }
        None => println!("{json}"),
    }

    Ok(())
}

fn read_hypervisors(path: &Path) -> Result<Vec<HypervisorSpec>> {
    let catalog: HypervisorCatalog = read_json(path)?;
    match catalog.hypervisors {
        Some(hypervisors) => Ok(hypervisors),
        None => bail!("no hypervisors found in {}", path.display()),
    }
}

fn read_vms(path: &Path) -> Result<Vec<VmSpec>> {
    let catalog: VmCatalog = read_json(path)?;
    match catalog.vms {
        Some(vms) if !vms.is_empty() => Ok(vms),
        _ => bail!("no vms found in {}", path.display()),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vmgrid_core::model::PlacementReport;

    fn write_inputs(dir: &Path, hypervisors: &str, vms: &str) {
        fs::write(dir.join("hypervisor.json"), hypervisors).unwrap();
        fs::write(dir.join("vms.json"), vms).unwrap();
    }

    #[test]
    fn distributes_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        write_inputs(
            dir.path(),
            r#"{"hypervisors": [{"id": "hv1", "maxram": 100}, {"id": "hv2", "maxram": 1000}]}"#,
            r#"{"vms": [{"id": "vm1", "ram": 20}]}"#,
        );
        let output = dir.path().join("result.json");
        let config = dir.path().join("vmgrid.toml");

        run(
            Some(dir.path().to_str().unwrap()),
            config.to_str().unwrap(),
            Some(output.to_str().unwrap()),
        )
        .unwrap();

        let report: PlacementReport =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(report.len(), 2);
        assert_eq!(report["hv1"].vms.len(), 1);
        assert_eq!(report["hv1"].vms[0].id, "vm1");
        assert!(report["hv2"].vms.is_empty());
    }

    #[test]
    fn config_file_overrides_input_names() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("hosts.json"),
            r#"{"hypervisors": [{"id": "hv1", "maxram": 100}]}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("workload.json"),
            r#"{"vms": [{"id": "vm1", "ram": 10}]}"#,
        )
        .unwrap();
        let config = dir.path().join("vmgrid.toml");
        fs::write(
            &config,
            format!(
                "[input]\npath = \"{}\"\nhypervisors_file = \"hosts.json\"\nvms_file = \"workload.json\"\n",
                dir.path().display()
            ),
        )
        .unwrap();
        let output = dir.path().join("result.json");

        run(None, config.to_str().unwrap(), Some(output.to_str().unwrap())).unwrap();

        let report: PlacementReport =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(report["hv1"].vms[0].id, "vm1");
    }

    #[test]
    fn missing_hypervisors_key_aborts() {
        let dir = tempfile::tempdir().unwrap();
        write_inputs(dir.path(), "{}", r#"{"vms": [{"id": "vm1", "ram": 10}]}"#);
        let config = dir.path().join("vmgrid.toml");

        let err = run(Some(dir.path().to_str().unwrap()), config.to_str().unwrap(), None)
            .unwrap_err();
        assert!(err.to_string().contains("no hypervisors found"));
    }

    #[test]
    fn empty_vm_list_aborts() {
        let dir = tempfile::tempdir().unwrap();
        write_inputs(
            dir.path(),
            r#"{"hypervisors": [{"id": "hv1", "maxram": 100}]}"#,
            r#"{"vms": []}"#,
        );
        let config = dir.path().join("vmgrid.toml");

        let err = run(Some(dir.path().to_str().unwrap()), config.to_str().unwrap(), None)
            .unwrap_err();
        assert!(err.to_string().contains("no vms found"));
    }

    #[test]
    fn empty_hypervisor_list_is_nothing_to_manage() {
        let dir = tempfile::tempdir().unwrap();
        write_inputs(
            dir.path(),
            r#"{"hypervisors": []}"#,
            r#"{"vms": [{"id": "vm1", "ram": 10}]}"#,
        );
        let config = dir.path().join("vmgrid.toml");

        let err = run(Some(dir.path().to_str().unwrap()), config.to_str().unwrap(), None)
            .unwrap_err();
        assert!(err.to_string().contains("no hypervisors to manage"));
    }

    #[test]
    fn missing_input_file_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("vmgrid.toml");

        let err = run(Some(dir.path().to_str().unwrap()), config.to_str().unwrap(), None)
            .unwrap_err();
        assert!(err.to_string().contains("reading"));
    }
}
