use anyhow::Result;
use log::debug;

use crate::runtime::Runtime;

use super::config::Config;

/// Report whether `name` is recorded as installed.
#[tracing::instrument(skip(config))]
pub fn installed<R: Runtime>(config: &Config<R>, name: &str) -> Result<()> {
    debug!("Reading installation record {:?}", config.record_path());
    let record = config.load_record()?;

    if !record.is_installed(name) {
        anyhow::bail!("{} is not installed.", name);
    }
    match record.installed_version(name) {
        Some(version) => println!("{} {} is installed", name, version),
        None => println!("{} is installed", name),
    }
    Ok(())
}
