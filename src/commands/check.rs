use anyhow::Result;
use log::{debug, warn};
use std::path::Path;

use crate::{
    package::{PackageDescriptor, compatible, incompatible_reasons_with},
    runtime::Runtime,
};

use super::config::Config;

/// Report whether a package can be installed from a binary here.
///
/// Fails with the rejection reasons when it cannot.
#[tracing::instrument(skip(config))]
pub fn check<R: Runtime>(config: &Config<R>, descriptor: &Path) -> Result<()> {
    let pkg = PackageDescriptor::load(&config.runtime, descriptor)?;
    let env = config.environment()?;
    debug!("Checking {} against {:?}", pkg.name, env);

    let reasons = incompatible_reasons_with(&pkg, &env, config.bound_check);
    if compatible(&pkg, &env) {
        for reason in &reasons {
            warn!("{}", reason);
        }
        println!(
            "{} {} is compatible with {} (glibc {})",
            pkg.name, pkg.version, env.arch, env.libc_version
        );
        return Ok(());
    }

    for reason in &reasons {
        println!("{}", reason);
    }
    anyhow::bail!("{} cannot be installed on this system.", pkg.display_name())
}
