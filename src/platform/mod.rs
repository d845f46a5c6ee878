//! Host environment module
//!
//! This module describes the environment a package is resolved against:
//! the architecture token and the running C library version.

mod environment;
mod libc;

pub use environment::{
    ARCH_ENV, Environment, LIBC_VERSION_ENV, detect_arch, detect_libc_version, resolve_arch,
    resolve_libc_version,
};
pub use libc::LibcVersion;
