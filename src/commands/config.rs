use anyhow::Result;
use log::debug;
use std::path::PathBuf;

use crate::{
    package::{ArtifactLocator, BoundCheck, DEFAULT_BINARY_HOST, DEFAULT_PLATFORM_TAG, InstallationRecord},
    platform::{Environment, resolve_arch, resolve_libc_version},
    runtime::Runtime,
};

/// Default directory holding `device.json`.
pub const DEFAULT_CONFIG_PATH: &str = "/usr/local/etc/crew";
pub const CONFIG_PATH_ENV: &str = "CREW_CONFIG_PATH";
pub const BINARY_HOST_ENV: &str = "CREW_BINARY_HOST";

/// Settings collected from the command line before any detection runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    pub arch: Option<String>,
    pub libc_version: Option<String>,
    pub config_path: Option<PathBuf>,
    pub binary_host: Option<String>,
    pub legacy_bounds: bool,
}

pub struct Config<R: Runtime> {
    pub runtime: R,
    pub locator: ArtifactLocator,
    pub config_path: PathBuf,
    pub bound_check: BoundCheck,
    arch: Option<String>,
    libc_version: Option<String>,
}

impl<R: Runtime> Config<R> {
    pub fn new(runtime: R, options: Options) -> Self {
        let config_path = options
            .config_path
            .or_else(|| runtime.env_var(CONFIG_PATH_ENV).ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        let host = options
            .binary_host
            .or_else(|| runtime.env_var(BINARY_HOST_ENV).ok())
            .unwrap_or_else(|| DEFAULT_BINARY_HOST.to_string());
        debug!("Using binary host {} and config path {:?}", host, config_path);

        let bound_check = if options.legacy_bounds {
            BoundCheck::Legacy
        } else {
            BoundCheck::Consistent
        };

        Self {
            locator: ArtifactLocator::new(host, DEFAULT_PLATFORM_TAG),
            runtime,
            config_path,
            bound_check,
            arch: options.arch,
            libc_version: options.libc_version,
        }
    }

    /// Resolve the environment; explicit options win over detection.
    #[tracing::instrument(skip(self))]
    pub fn environment(&self) -> Result<Environment> {
        let arch = match &self.arch {
            Some(arch) => arch.clone(),
            None => resolve_arch(&self.runtime),
        };
        let libc_version = match &self.libc_version {
            Some(v) => v.parse()?,
            None => resolve_libc_version(&self.runtime)?,
        };
        Ok(Environment { arch, libc_version })
    }

    pub fn record_path(&self) -> PathBuf {
        InstallationRecord::path_in(&self.config_path)
    }

    /// Load the installation record, failing if it cannot be read.
    pub fn load_record(&self) -> Result<InstallationRecord> {
        InstallationRecord::load(&self.runtime, &self.record_path())
    }
}
