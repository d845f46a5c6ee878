//! Canonical package versions.
//!
//! Package versions carry suffixes that describe the build environment
//! rather than the upstream release (`-py3.12`, `-llvm18`, `-glibc2.39`,
//! git short hashes, ...). Canonicalizing removes them so versions built in
//! different environments compare equal.

use regex::Regex;
use std::sync::LazyLock;

use crate::platform::Environment;

static PYTHON_TAG: LazyLock<Regex> = LazyLock::new(|| pattern(r"-py[0-9]\.[0-9]{2}"));
static PERL_TAG: LazyLock<Regex> = LazyLock::new(|| pattern(r"-perl[0-9]\.[0-9]{2}"));
static LLVM_TAG: LazyLock<Regex> = LazyLock::new(|| pattern(r"-llvm[0-9]{2}"));
static GIT_HASH_SUFFIX: LazyLock<Regex> = LazyLock::new(|| pattern(r"-[A-Za-z0-9_]{7}$"));
static ICU_TAG: LazyLock<Regex> = LazyLock::new(|| pattern(r"-icu[0-9]{2}\.[0-9]"));

fn pattern(re: &str) -> Regex {
    Regex::new(re).unwrap_or_else(|e| panic!("invalid built-in pattern {re}: {e}"))
}

/// Strip environment- and toolchain-specific suffixes from `raw`.
///
/// The rules run in a fixed order; the libc suffix must go before the git
/// hash rule, which would otherwise see `-glibc2.39` as the tail. The pass
/// is repeated until nothing changes, so the result is stable under
/// re-canonicalization.
pub fn canonicalize(raw: &str, env: &Environment) -> String {
    let mut current = raw.to_string();
    loop {
        let next = canonicalize_once(&current, env);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn canonicalize_once(raw: &str, env: &Environment) -> String {
    let version = raw.strip_prefix("kde-").unwrap_or(raw);
    let version = PYTHON_TAG.replace_all(version, "");
    let version = PERL_TAG.replace_all(&version, "");
    let version = LLVM_TAG.replace_all(&version, "");

    let libc_suffix = format!("-glibc{}", env.libc_version);
    let version = version.strip_suffix(libc_suffix.as_str()).unwrap_or(&*version);

    let version = GIT_HASH_SUFFIX.replace(version, "");
    ICU_TAG.replace_all(&version, "").into_owned()
}

/// Whether two versions are the same once canonicalized.
pub fn versions_match(a: &str, b: &str, env: &Environment) -> bool {
    canonicalize(a, env) == canonicalize(b, env)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> Environment {
        Environment::new("x86_64", "2.39")
    }

    #[test]
    fn test_plain_version_unchanged() {
        assert_eq!(canonicalize("3.3.6", &env()), "3.3.6");
        assert_eq!(canonicalize("2.36.1-1", &env()), "2.36.1-1");
        assert_eq!(canonicalize("", &env()), "");
    }

    #[test]
    fn test_kde_prefix_and_python_tag() {
        assert_eq!(canonicalize("kde-5.15.3-py3.12", &env()), "5.15.3");
    }

    #[test]
    fn test_glibc_then_git_hash() {
        assert_eq!(canonicalize("1.2.4-qnd73k6-glibc2.39", &env()), "1.2.4");
    }

    #[test]
    fn test_glibc_suffix_only_for_running_libc() {
        assert_eq!(canonicalize("1.0-glibc2.39", &env()), "1.0");
        assert_eq!(canonicalize("1.0-glibc2.37", &Environment::new("x86_64", "2.37")), "1.0");
        // A different libc suffix is not ours to remove.
        assert_eq!(canonicalize("1.0-glibc2.23", &env()), "1.0-glibc2.23");
    }

    #[test]
    fn test_toolchain_tags() {
        assert_eq!(canonicalize("5.40.0-perl5.40", &env()), "5.40.0");
        assert_eq!(canonicalize("0.13.0-llvm18", &env()), "0.13.0");
        assert_eq!(canonicalize("74.2-icu75.1", &env()), "74.2");
        assert_eq!(canonicalize("1.0-py3.12-llvm18-icu75.1", &env()), "1.0");
    }

    #[test]
    fn test_tags_removed_globally() {
        assert_eq!(canonicalize("1.0-py3.11-py3.12", &env()), "1.0");
    }

    #[test]
    fn test_git_hash_must_be_seven_chars_at_end() {
        assert_eq!(canonicalize("1.2.4-abc1234", &env()), "1.2.4");
        assert_eq!(canonicalize("1.2.4-abc123", &env()), "1.2.4-abc123");
        assert_eq!(canonicalize("1.2.4-abc12345", &env()), "1.2.4-abc12345");
        assert_eq!(canonicalize("1.2.4-abc1234-1", &env()), "1.2.4-abc1234-1");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "kde-5.15.3-py3.12",
            "1.2.4-qnd73k6-glibc2.39",
            "kde-kde-1.0",
            "1.0-abcdefg-hijklmn",
            "2.0-llvm17-glibc2.39-1234567",
            "3.3.6",
            "-py3.12",
        ];
        for v in samples {
            let once = canonicalize(v, &env());
            assert_eq!(canonicalize(&once, &env()), once, "input {v}");
        }
    }

    #[test]
    fn test_versions_match() {
        assert!(versions_match("1.2.4-qnd73k6-glibc2.39", "1.2.4", &env()));
        assert!(versions_match("kde-5.15.3", "5.15.3-py3.12", &env()));
        assert!(!versions_match("1.2.4", "1.2.5", &env()));
    }
}
