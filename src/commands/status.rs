use anyhow::Result;
use log::{debug, info};
use std::path::Path;

use crate::{
    package::{
        Artifact, InstallationRecord, PackageDescriptor, compatible, incompatible_reasons_with,
        versions_match,
    },
    platform::Environment,
    runtime::Runtime,
};

use super::config::Config;
use super::fetch::kind_label;

/// How the recorded installation relates to the descriptor's version.
#[derive(Debug, Clone, PartialEq)]
pub enum InstallState {
    NotInstalled,
    /// Installed, but the record carries no version.
    Unknown,
    UpToDate(String),
    Outdated(String),
}

/// Summarize a package: compatibility, fetch target and install state.
#[tracing::instrument(skip(config))]
pub fn status<R: Runtime>(config: &Config<R>, descriptor: &Path, build_from_source: bool) -> Result<()> {
    let pkg = PackageDescriptor::load(&config.runtime, descriptor)?;
    let env = config.environment()?;

    let record_path = config.record_path();
    let record = if config.runtime.exists(&record_path) {
        config.load_record()?
    } else {
        info!("No installation record at {:?}", record_path);
        InstallationRecord::default()
    };

    let artifact = config.locator.locate(&pkg, &env, build_from_source);
    let state = install_state(&pkg, &record, &env);
    debug!("{} install state: {:?}", pkg.name, state);

    for line in render(config, &pkg, &env, &artifact, &state) {
        println!("{}", line);
    }
    Ok(())
}

pub fn install_state(
    pkg: &PackageDescriptor,
    record: &InstallationRecord,
    env: &Environment,
) -> InstallState {
    if !record.is_installed(&pkg.name) {
        return InstallState::NotInstalled;
    }
    match record.installed_version(&pkg.name) {
        None => InstallState::Unknown,
        Some(v) if versions_match(v, &pkg.version, env) => InstallState::UpToDate(v.to_string()),
        Some(v) => InstallState::Outdated(v.to_string()),
    }
}

fn render<R: Runtime>(
    config: &Config<R>,
    pkg: &PackageDescriptor,
    env: &Environment,
    artifact: &Artifact,
    state: &InstallState,
) -> Vec<String> {
    let mut lines = vec![format!("Package: {} {}", pkg.name, pkg.version)];
    if let Some(description) = &pkg.description {
        lines.push(format!("Description: {}", description));
    }
    if let Some(homepage) = &pkg.homepage {
        lines.push(format!("Homepage: {}", homepage));
    }
    if let Some(license) = &pkg.license {
        lines.push(format!("License: {}", license));
    }
    lines.push(format!("Environment: {} (glibc {})", env.arch, env.libc_version));

    if compatible(pkg, env) {
        lines.push("Compatible: yes".to_string());
    } else {
        lines.push("Compatible: no".to_string());
        for reason in incompatible_reasons_with(pkg, env, config.bound_check) {
            lines.push(format!("  {}", reason));
        }
    }

    lines.push(format!(
        "Artifact: {} {}",
        kind_label(artifact.kind),
        artifact.url.as_deref().unwrap_or("(none)")
    ));
    lines.push(format!(
        "Sha256: {}",
        artifact.sha256.as_deref().unwrap_or("(none)")
    ));

    lines.push(match state {
        InstallState::NotInstalled => "Installed: no".to_string(),
        InstallState::Unknown => "Installed: yes (version unknown)".to_string(),
        InstallState::UpToDate(v) => format!("Installed: {} (up to date)", v),
        InstallState::Outdated(v) => format!("Installed: {} (upgrade to {} available)", v, pkg.version),
    });
    lines
}
