use anyhow::{Context, Result};
use log::debug;

use crate::runtime::Runtime;

use super::LibcVersion;

/// Overrides the detected architecture token.
pub const ARCH_ENV: &str = "CREW_ARCH";
/// Overrides the detected libc version.
pub const LIBC_VERSION_ENV: &str = "LIBC_VERSION";

/// The host facts every resolution call is evaluated against.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    pub arch: String,
    pub libc_version: LibcVersion,
}

impl Environment {
    pub fn new(arch: impl Into<String>, libc_version: impl Into<LibcVersion>) -> Self {
        Self {
            arch: arch.into(),
            libc_version: libc_version.into(),
        }
    }

    /// Detect the current environment, honoring `CREW_ARCH` and
    /// `LIBC_VERSION` when they are set.
    #[tracing::instrument(skip(runtime))]
    pub fn detect<R: Runtime>(runtime: &R) -> Result<Self> {
        let arch = resolve_arch(runtime);
        let libc_version = resolve_libc_version(runtime)?;
        debug!("Detected environment: arch={}, libc={}", arch, libc_version);
        Ok(Self { arch, libc_version })
    }
}

/// `CREW_ARCH` if set, otherwise the compiled-in architecture.
pub fn resolve_arch<R: Runtime>(runtime: &R) -> String {
    match runtime.env_var(ARCH_ENV) {
        Ok(arch) if !arch.trim().is_empty() => arch.trim().to_string(),
        _ => detect_arch().to_string(),
    }
}

/// `LIBC_VERSION` if set, otherwise whatever `ldd` reports.
pub fn resolve_libc_version<R: Runtime>(runtime: &R) -> Result<LibcVersion> {
    match runtime.env_var(LIBC_VERSION_ENV) {
        Ok(v) if !v.trim().is_empty() => v.parse(),
        _ => detect_libc_version(runtime),
    }
}

/// Architecture token for the running binary.
///
/// 32-bit ARM userlands report as `armv7l` regardless of the kernel.
pub fn detect_arch() -> &'static str {
    #[cfg(target_arch = "x86_64")]
    {
        "x86_64"
    }
    #[cfg(target_arch = "aarch64")]
    {
        "aarch64"
    }
    #[cfg(target_arch = "x86")]
    {
        "i686"
    }
    #[cfg(target_arch = "arm")]
    {
        "armv7l"
    }
    #[cfg(not(any(
        target_arch = "x86_64",
        target_arch = "aarch64",
        target_arch = "x86",
        target_arch = "arm"
    )))]
    {
        std::env::consts::ARCH
    }
}

/// Ask `ldd --version` for the glibc version, e.g.
/// `ldd (Gentoo 2.37-r7 p7) 2.37` yields `2.37`.
#[tracing::instrument(skip(runtime))]
pub fn detect_libc_version<R: Runtime>(runtime: &R) -> Result<LibcVersion> {
    let output = runtime
        .command_output("ldd", &["--version".to_string()])
        .context("Could not determine the libc version; set LIBC_VERSION")?;
    parse_ldd_version(&output)
        .with_context(|| format!("Unrecognized `ldd --version` output: {:?}", output))
}

fn parse_ldd_version(output: &str) -> Option<LibcVersion> {
    let token = output.lines().next()?.split_whitespace().last()?;
    token
        .chars()
        .next()
        .filter(char::is_ascii_digit)
        .map(|_| LibcVersion::new(token))
}
