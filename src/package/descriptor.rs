use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::platform::LibcVersion;
use crate::runtime::Runtime;

pub const DEFAULT_BINARY_COMPRESSION: &str = "tar.zst";

/// A descriptor value that is either the same for every architecture or
/// keyed by architecture token.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ArchField {
    Uniform(String),
    PerArchitecture(BTreeMap<String, String>),
}

impl ArchField {
    /// The value that applies to `arch`, if any.
    pub fn resolve(&self, arch: &str) -> Option<&str> {
        match self {
            ArchField::Uniform(value) => Some(value.as_str()),
            ArchField::PerArchitecture(map) => map.get(arch).map(String::as_str),
        }
    }

    pub fn is_per_architecture(&self) -> bool {
        matches!(self, ArchField::PerArchitecture(_))
    }

    /// Whether this field carries an architecture-specific entry for `arch`.
    pub fn has_arch(&self, arch: &str) -> bool {
        match self {
            ArchField::Uniform(_) => false,
            ArchField::PerArchitecture(map) => map.contains_key(arch),
        }
    }
}

/// Which architectures a package may be installed on.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Compatibility {
    /// `"all"`, or a free-form string such as `"aarch64 armv7l x86_64"`.
    Text(String),
    List(Vec<String>),
}

impl Compatibility {
    pub fn is_all(&self) -> bool {
        match self {
            Compatibility::Text(text) => text.eq_ignore_ascii_case("all"),
            Compatibility::List(list) => list.iter().any(|a| a.eq_ignore_ascii_case("all")),
        }
    }

    /// Text form matches by containment, list form by membership.
    pub fn contains(&self, arch: &str) -> bool {
        match self {
            Compatibility::Text(text) => text.contains(arch),
            Compatibility::List(list) => list.iter().any(|a| a == arch),
        }
    }

    pub fn allows(&self, arch: &str) -> bool {
        self.is_all() || self.contains(arch)
    }
}

/// Static metadata describing one installable package.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PackageDescriptor {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
    pub compatibility: Compatibility,
    #[serde(default)]
    pub min_glibc: Option<LibcVersion>,
    #[serde(default)]
    pub max_glibc: Option<LibcVersion>,
    pub source_url: ArchField,
    #[serde(default)]
    pub source_sha256: Option<ArchField>,
    #[serde(default)]
    pub binary_sha256: Option<BTreeMap<String, String>>,
    #[serde(default = "default_binary_compression")]
    pub binary_compression: String,
}

fn default_binary_compression() -> String {
    DEFAULT_BINARY_COMPRESSION.to_string()
}

impl PackageDescriptor {
    /// Load a JSON descriptor.
    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> Result<Self> {
        let content = runtime.read_to_string(path)?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid package descriptor {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Name as shown in user-facing messages: first letter upper-cased,
    /// the rest lower-cased.
    pub fn display_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first
                .to_uppercase()
                .chain(chars.flat_map(char::to_lowercase))
                .collect(),
            None => String::new(),
        }
    }

    /// Whether a prebuilt binary exists for `arch`.
    pub fn has_binary(&self, arch: &str) -> bool {
        self.binary_sha256
            .as_ref()
            .is_some_and(|digests| digests.contains_key(arch))
    }
}
