use anyhow::Result;

use crate::{package::canonicalize, runtime::Runtime};

use super::config::Config;

/// Print the canonical form of a version string.
#[tracing::instrument(skip(config))]
pub fn version<R: Runtime>(config: &Config<R>, raw: &str) -> Result<()> {
    let env = config.environment()?;
    println!("{}", canonicalize(raw, &env));
    Ok(())
}
