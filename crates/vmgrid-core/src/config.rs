//! vmgrid.toml configuration parser.
//!
//! Resolves where the input files live. Every key is optional; a missing
//! file or key falls back to the defaults below.

use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_INPUT_PATH: &str = "./";
pub const DEFAULT_HYPERVISORS_FILE: &str = "hypervisor.json";
pub const DEFAULT_VMS_FILE: &str = "vms.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VmgridConfig {
    pub input: Option<InputConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    /// Directory containing the input json files.
    pub path: Option<String>,
    pub hypervisors_file: Option<String>,
    pub vms_file: Option<String>,
}

impl VmgridConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: VmgridConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Read `path` if it exists; an absent config file means defaults.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.is_file() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Directory the input files are read from.
    pub fn input_path(&self) -> &str {
        self.input
            .as_ref()
            .and_then(|input| input.path.as_deref())
            .unwrap_or(DEFAULT_INPUT_PATH)
    }

    pub fn hypervisors_file(&self) -> &str {
        self.input
            .as_ref()
            .and_then(|input| input.hypervisors_file.as_deref())
            .unwrap_or(DEFAULT_HYPERVISORS_FILE)
    }

    pub fn vms_file(&self) -> &str {
        self.input
            .as_ref()
            .and_then(|input| input.vms_file.as_deref())
            .unwrap_or(DEFAULT_VMS_FILE)
    }
}
