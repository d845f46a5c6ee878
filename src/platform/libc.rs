use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A C library version such as `2.39`.
///
/// Ordering is component-wise: numeric components compare as numbers
/// (`2.9 < 2.10`) and sort before non-numeric ones, which compare as text.
/// The text as written is kept for display and for the string-based
/// checks that still need it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawVersion", into = "String")]
pub struct LibcVersion {
    raw: String,
}

impl LibcVersion {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into().trim().to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    fn components(&self) -> impl Iterator<Item = &str> {
        self.raw.split('.')
    }
}

impl Ord for LibcVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let mut left = self.components();
        let mut right = other.components();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return Ordering::Equal,
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
                (Some(a), Some(b)) => {
                    let ord = match (a.parse::<u64>(), b.parse::<u64>()) {
                        (Ok(x), Ok(y)) => x.cmp(&y),
                        (Ok(_), Err(_)) => Ordering::Less,
                        (Err(_), Ok(_)) => Ordering::Greater,
                        (Err(_), Err(_)) => a.cmp(b),
                    };
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
            }
        }
    }
}

impl PartialOrd for LibcVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for LibcVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for LibcVersion {}

impl fmt::Display for LibcVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for LibcVersion {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let version = LibcVersion::new(s);
        if version.raw.is_empty() {
            anyhow::bail!("libc version must not be empty");
        }
        Ok(version)
    }
}

impl From<&str> for LibcVersion {
    fn from(s: &str) -> Self {
        LibcVersion::new(s)
    }
}

impl From<LibcVersion> for String {
    fn from(v: LibcVersion) -> Self {
        v.raw
    }
}

/// Bounds must be written as strings. A bare JSON number goes through `f64`
/// and loses trailing zeros (`2.40` would read as `2.4`), so it is rejected.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawVersion {
    Text(String),
    Number(serde_json::Number),
}

impl TryFrom<RawVersion> for LibcVersion {
    type Error = String;

    fn try_from(raw: RawVersion) -> Result<Self, Self::Error> {
        match raw {
            RawVersion::Text(s) => Ok(LibcVersion::new(s)),
            RawVersion::Number(n) => Err(format!("glibc version {} must be quoted", n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_component_ordering() {
        assert!(LibcVersion::new("2.9") < LibcVersion::new("2.10"));
        assert!(LibcVersion::new("2.39") > LibcVersion::new("2.37"));
        assert!(LibcVersion::new("3.0") > LibcVersion::new("2.99"));
    }

    #[test]
    fn test_equality_and_prefix() {
        assert_eq!(LibcVersion::new("2.39"), LibcVersion::new(" 2.39 "));
        assert!(LibcVersion::new("2.39") < LibcVersion::new("2.39.1"));
    }

    #[test]
    fn test_non_numeric_component_falls_back_to_text() {
        assert!(LibcVersion::new("2.39a") > LibcVersion::new("2.39"));
        assert!(LibcVersion::new("2.x") > LibcVersion::new("2.9"));
        assert!(LibcVersion::new("2.b") > LibcVersion::new("2.a"));
    }

    #[test]
    fn test_mixed_components_order_transitively() {
        let one_a = LibcVersion::new("1a");
        let two = LibcVersion::new("2");
        let ten = LibcVersion::new("10");

        assert!(two < ten);
        assert!(ten < one_a);
        assert!(two < one_a);

        let mut versions = vec![one_a.clone(), ten.clone(), two.clone()];
        versions.sort();
        assert_eq!(versions, vec![two, ten, one_a]);
    }

    #[test]
    fn test_display_preserves_text() {
        assert_eq!(LibcVersion::new("2.23").to_string(), "2.23");
    }

    #[test]
    fn test_from_str_rejects_empty() {
        assert!("".parse::<LibcVersion>().is_err());
        assert!("  ".parse::<LibcVersion>().is_err());
        assert_eq!("2.27".parse::<LibcVersion>().unwrap().as_str(), "2.27");
    }

    #[test]
    fn test_deserialize_text() {
        let v: LibcVersion = serde_json::from_str(r#""2.37""#).unwrap();
        assert_eq!(v.as_str(), "2.37");
    }

    #[test]
    fn test_deserialize_keeps_trailing_zero() {
        let v: LibcVersion = serde_json::from_str(r#""2.40""#).unwrap();
        assert_eq!(v.as_str(), "2.40");
        assert!(v > LibcVersion::new("2.39"));
    }

    #[test]
    fn test_deserialize_rejects_bare_number() {
        let err = serde_json::from_str::<LibcVersion>("2.40").unwrap_err();
        assert!(err.to_string().contains("must be quoted"));
    }
}
