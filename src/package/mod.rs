//! Package resolution module
//!
//! This module turns a package descriptor plus an [`Environment`](crate::platform::Environment)
//! into a compatibility verdict, a fetch target, and a canonical version,
//! and answers installation-state queries.

mod artifact;
mod compatibility;
mod descriptor;
mod installed;
mod version;

pub use artifact::{
    Artifact, ArtifactKind, ArtifactLocator, DEFAULT_BINARY_HOST, DEFAULT_PLATFORM_TAG,
};
pub use compatibility::{
    BoundCheck, PLATFORM_NAME, compatible, incompatible_reasons, incompatible_reasons_with,
};
pub use descriptor::{ArchField, Compatibility, DEFAULT_BINARY_COMPRESSION, PackageDescriptor};
pub use installed::{DEVICE_FILE, InstallationRecord, InstalledPackage};
pub use version::{canonicalize, versions_match};
