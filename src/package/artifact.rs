//! Selection of the artifact (URL and digest) to fetch for a package.

use log::debug;

use crate::platform::Environment;

use super::PackageDescriptor;

/// Generic package registry that hosts prebuilt binaries.
pub const DEFAULT_BINARY_HOST: &str = "https://gitlab.com/api/v4/projects/26210301/packages/generic";
/// Platform tag embedded in binary archive names.
pub const DEFAULT_PLATFORM_TAG: &str = "chromeos";

/// Which of a package's artifacts was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Binary,
    Source,
}

/// A resolved fetch target. Either side may be missing when the
/// descriptor has nothing for the current architecture.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub url: Option<String>,
    pub sha256: Option<String>,
}

/// Resolves artifact URLs and digests against a binary host.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactLocator {
    host: String,
    platform_tag: String,
}

impl Default for ArtifactLocator {
    fn default() -> Self {
        Self::new(DEFAULT_BINARY_HOST, DEFAULT_PLATFORM_TAG)
    }
}

impl ArtifactLocator {
    pub fn new(host: impl Into<String>, platform_tag: impl Into<String>) -> Self {
        Self {
            host: host.into().trim_end_matches('/').to_string(),
            platform_tag: platform_tag.into(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// The branch both [`resolve_url`](Self::resolve_url) and
    /// [`resolve_digest`](Self::resolve_digest) take.
    pub fn select(
        &self,
        pkg: &PackageDescriptor,
        env: &Environment,
        build_from_source: bool,
    ) -> ArtifactKind {
        if !build_from_source && pkg.has_binary(&env.arch) {
            ArtifactKind::Binary
        } else {
            ArtifactKind::Source
        }
    }

    pub fn resolve_url(
        &self,
        pkg: &PackageDescriptor,
        env: &Environment,
        build_from_source: bool,
    ) -> Option<String> {
        match self.select(pkg, env, build_from_source) {
            ArtifactKind::Binary => Some(self.binary_url(pkg, &env.arch)),
            ArtifactKind::Source => pkg.source_url.resolve(&env.arch).map(str::to_string),
        }
    }

    pub fn resolve_digest(
        &self,
        pkg: &PackageDescriptor,
        env: &Environment,
        build_from_source: bool,
    ) -> Option<String> {
        match self.select(pkg, env, build_from_source) {
            ArtifactKind::Binary => pkg
                .binary_sha256
                .as_ref()
                .and_then(|digests| digests.get(&env.arch))
                .cloned(),
            ArtifactKind::Source => pkg
                .source_sha256
                .as_ref()
                .and_then(|digest| digest.resolve(&env.arch))
                .map(str::to_string),
        }
    }

    /// URL and digest resolved through the same branch.
    pub fn locate(
        &self,
        pkg: &PackageDescriptor,
        env: &Environment,
        build_from_source: bool,
    ) -> Artifact {
        let artifact = Artifact {
            kind: self.select(pkg, env, build_from_source),
            url: self.resolve_url(pkg, env, build_from_source),
            sha256: self.resolve_digest(pkg, env, build_from_source),
        };
        debug!("Located {:?} artifact for {}: {:?}", artifact.kind, pkg.name, artifact.url);
        artifact
    }

    /// `<host>/<name>/<version>_<arch>/<name>-<version>-<tag>-<arch>.<compression>`
    pub fn binary_url(&self, pkg: &PackageDescriptor, arch: &str) -> String {
        format!(
            "{host}/{name}/{version}_{arch}/{name}-{version}-{tag}-{arch}.{ext}",
            host = self.host,
            name = pkg.name,
            version = pkg.version,
            arch = arch,
            tag = self.platform_tag,
            ext = pkg.binary_compression,
        )
    }
}
