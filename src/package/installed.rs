use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

/// File name of the installation record inside the config directory.
pub const DEVICE_FILE: &str = "device.json";

/// One entry of the installation record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct InstalledPackage {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}

/// Snapshot of the packages recorded as installed on this device.
///
/// Only the fields needed for queries are read; everything else in the
/// record is ignored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct InstallationRecord {
    #[serde(default)]
    pub installed_packages: Vec<InstalledPackage>,
}

impl InstallationRecord {
    /// `<config_path>/device.json`
    pub fn path_in(config_path: &Path) -> PathBuf {
        config_path.join(DEVICE_FILE)
    }

    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> Result<Self> {
        let content = runtime.read_to_string(path)?;
        let record: InstallationRecord = serde_json::from_str(&content)
            .with_context(|| format!("Invalid installation record {}", path.display()))?;
        debug!(
            "Loaded {} installed packages from {}",
            record.installed_packages.len(),
            path.display()
        );
        Ok(record)
    }

    /// Exact, case-sensitive name lookup.
    pub fn is_installed(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn installed_version(&self, name: &str) -> Option<&str> {
        self.find(name).and_then(|p| p.version.as_deref())
    }

    fn find(&self, name: &str) -> Option<&InstalledPackage> {
        self.installed_packages.iter().find(|p| p.name == name)
    }
}
