use anyhow::Result;
use log::warn;
use std::path::Path;

use crate::{
    package::{Artifact, ArtifactKind, PackageDescriptor},
    runtime::Runtime,
};

use super::config::Config;

/// Print the URL and digest to fetch for a package.
#[tracing::instrument(skip(config))]
pub fn url<R: Runtime>(config: &Config<R>, descriptor: &Path, build_from_source: bool) -> Result<()> {
    let pkg = PackageDescriptor::load(&config.runtime, descriptor)?;
    let env = config.environment()?;
    let artifact = config.locator.locate(&pkg, &env, build_from_source);

    let Some(url) = &artifact.url else {
        anyhow::bail!(
            "{} has no {} artifact for {}.",
            pkg.display_name(),
            kind_label(artifact.kind),
            env.arch
        );
    };
    if artifact.sha256.is_none() {
        warn!("No sha256 recorded for {} on {}", pkg.name, env.arch);
    }

    for line in render(&artifact, url) {
        println!("{}", line);
    }
    Ok(())
}

pub(crate) fn kind_label(kind: ArtifactKind) -> &'static str {
    match kind {
        ArtifactKind::Binary => "binary",
        ArtifactKind::Source => "source",
    }
}

fn render(artifact: &Artifact, url: &str) -> Vec<String> {
    vec![
        format!("kind: {}", kind_label(artifact.kind)),
        format!("url: {}", url),
        format!("sha256: {}", artifact.sha256.as_deref().unwrap_or("-")),
    ]
}
