//! Binary compatibility of a package with the running environment.

use crate::platform::Environment;

use super::PackageDescriptor;

/// Display name of the host platform in rejection messages.
pub const PLATFORM_NAME: &str = "ChromeOS";

/// How libc bounds are reported by [`incompatible_reasons_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundCheck {
    /// Report exactly the conditions [`compatible`] rejects.
    #[default]
    Consistent,
    /// Report bounds by the literal rejection rule: the minimum is reported
    /// when it is greater than *or equal to* the running libc, and the
    /// maximum is reported when one is set and the minimum's text sorts at
    /// or below the running libc's text. Messages may disagree with
    /// [`compatible`] at the boundaries.
    Legacy,
}

/// Whether `pkg` can be installed from a binary in `env`.
pub fn compatible(pkg: &PackageDescriptor, env: &Environment) -> bool {
    pkg.compatibility.allows(&env.arch)
        && pkg
            .min_glibc
            .as_ref()
            .is_none_or(|min| *min <= env.libc_version)
        && pkg
            .max_glibc
            .as_ref()
            .is_none_or(|max| *max >= env.libc_version)
}

/// Human-readable reasons `pkg` is rejected in `env`, empty when it is
/// compatible.
pub fn incompatible_reasons(pkg: &PackageDescriptor, env: &Environment) -> Vec<String> {
    incompatible_reasons_with(pkg, env, BoundCheck::default())
}

/// Like [`incompatible_reasons`] with an explicit bound policy.
///
/// Checks run independently in a fixed order: architecture, minimum libc,
/// maximum libc.
pub fn incompatible_reasons_with(
    pkg: &PackageDescriptor,
    env: &Environment,
    policy: BoundCheck,
) -> Vec<String> {
    let name = pkg.display_name();
    let libc = &env.libc_version;
    let mut reasons = Vec::new();

    if !pkg.compatibility.allows(&env.arch) {
        reasons.push(format!("{} is not compatible with {}.", name, env.arch));
    }

    if let Some(min) = &pkg.min_glibc {
        let violated = match policy {
            BoundCheck::Consistent => min > libc,
            BoundCheck::Legacy => min >= libc,
        };
        if violated {
            reasons.push(format!(
                "{} is currently running glibc {}, but the minimum version for {} is {}.",
                PLATFORM_NAME, libc, name, min
            ));
        }
    }

    if let Some(max) = &pkg.max_glibc {
        let reported = match policy {
            BoundCheck::Consistent => (max < libc).then(|| max.to_string()),
            BoundCheck::Legacy => {
                let min = pkg
                    .min_glibc
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default();
                (min.as_str() <= libc.as_str()).then_some(min)
            }
        };
        if let Some(bound) = reported {
            reasons.push(format!(
                "{} is currently running glibc {}, but the maximum version for {} is {}.",
                PLATFORM_NAME, libc, name, bound
            ));
        }
    }

    reasons
}
