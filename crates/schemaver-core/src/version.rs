//! Semantic version parsing and incrementing

use crate::severity::Bump;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Semantic version representation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre_release: Option<String>,
    pub build_metadata: Option<String>,
}

/// Version parsing error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Invalid version format: {0}")]
    InvalidFormat(String),

    #[error("Cannot increment {component} version of {version}: component overflows")]
    Overflow { version: String, component: &'static str },
}

impl SchemaVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            pre_release: None,
            build_metadata: None,
        }
    }

    /// Parse `[v]MAJOR.MINOR.PATCH[-pre][+build]`
    pub fn parse(version_str: &str) -> Result<Self, VersionError> {
        let trimmed = version_str.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);

        let (version_part, build_metadata) = match trimmed.split_once('+') {
            Some((version, build)) => (version, Some(build.to_string())),
            None => (trimmed, None),
        };

        let (version_part, pre_release) = match version_part.split_once('-') {
            Some((version, pre)) => (version, Some(pre.to_string())),
            None => (version_part, None),
        };

        for (label, value) in [("pre-release", &pre_release), ("build metadata", &build_metadata)] {
            if let Some(value) = value {
                if value.is_empty() || value.split('.').any(str::is_empty) {
                    return Err(VersionError::InvalidFormat(format!(
                        "Empty {} identifier in: {}",
                        label, version_str
                    )));
                }
            }
        }

        let parts: Vec<&str> = version_part.split('.').collect();
        if parts.len() != 3 {
            return Err(VersionError::InvalidFormat(format!(
                "Expected format X.Y.Z, got: {}",
                version_str
            )));
        }

        Ok(Self {
            major: parse_component(parts[0], "major")?,
            minor: parse_component(parts[1], "minor")?,
            patch: parse_component(parts[2], "patch")?,
            pre_release,
            build_metadata,
        })
    }

    pub fn is_pre_release(&self) -> bool {
        self.pre_release.is_some()
    }

    /// Next version for the given bump.
    ///
    /// A pre-release already ahead of its release line is finalized rather
    /// than bumped again: `2.0.0-rc.1` + major is `2.0.0`, `1.3.0-beta` +
    /// minor is `1.3.0`, `1.2.4-alpha` + patch is `1.2.4`. Build metadata
    /// is dropped on any increment.
    pub fn increment(&self, bump: Bump) -> Result<Self, VersionError> {
        let pre = self.is_pre_release();
        let next = match bump {
            Bump::None => self.clone(),
            Bump::Major => {
                if pre && self.minor == 0 && self.patch == 0 {
                    Self::new(self.major, 0, 0)
                } else {
                    Self::new(self.bumped(self.major, "major")?, 0, 0)
                }
            }
            Bump::Minor => {
                if pre && self.patch == 0 {
                    Self::new(self.major, self.minor, 0)
                } else {
                    Self::new(self.major, self.bumped(self.minor, "minor")?, 0)
                }
            }
            Bump::Patch => {
                if pre {
                    Self::new(self.major, self.minor, self.patch)
                } else {
                    Self::new(self.major, self.minor, self.bumped(self.patch, "patch")?)
                }
            }
        };
        Ok(next)
    }

    fn bumped(&self, value: u64, component: &'static str) -> Result<u64, VersionError> {
        value.checked_add(1).ok_or_else(|| VersionError::Overflow {
            version: self.to_string(),
            component,
        })
    }
}

fn parse_component(part: &str, label: &str) -> Result<u64, VersionError> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) || (part.len() > 1 && part.starts_with('0')) {
        return Err(VersionError::InvalidFormat(format!(
            "Invalid {} version: {}",
            label, part
        )));
    }
    part.parse()
        .map_err(|_| VersionError::InvalidFormat(format!("Invalid {} version: {}", label, part)))
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(ref pre) = self.pre_release {
            write!(f, "-{}", pre)?;
        }
        if let Some(ref build) = self.build_metadata {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}

impl FromStr for SchemaVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialOrd for SchemaVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SchemaVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| match (&self.pre_release, &other.pre_release) {
                // Pre-release versions have lower precedence
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => compare_pre_release(a, b),
            })
    }
}

/// Identifier-wise pre-release precedence: numeric identifiers compare as
/// integers and sort before alphanumeric ones, a shorter prefix sorts first.
fn compare_pre_release(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        let ordering = match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => compare_identifier(x, y),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
}

fn compare_identifier(a: &str, b: &str) -> Ordering {
    let numeric = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    match (numeric(a), numeric(b)) {
        // digits only, so the longer one is larger once leading zeros are gone
        (true, true) => {
            let a = a.trim_start_matches('0');
            let b = b.trim_start_matches('0');
            a.len().cmp(&b.len()).then_with(|| a.cmp(b))
        }
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.cmp(b),
    }
}

/// Parse `version` and apply `bump`, returning the formatted result
pub fn increment(version: &str, bump: Bump) -> Result<String, VersionError> {
    Ok(SchemaVersion::parse(version)?.increment(bump)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parsing() {
        let v = SchemaVersion::parse("1.2.3").unwrap();
        assert_eq!((v.major, v.minor, v.patch), (1, 2, 3));
        assert_eq!(v.pre_release, None);
        assert_eq!(v.build_metadata, None);

        let v = SchemaVersion::parse("v2.0.0-alpha").unwrap();
        assert_eq!(v.major, 2);
        assert_eq!(v.pre_release, Some("alpha".to_string()));

        let v = SchemaVersion::parse("3.1.4-beta.2+exp.sha.5114f85").unwrap();
        assert_eq!(v.pre_release, Some("beta.2".to_string()));
        assert_eq!(v.build_metadata, Some("exp.sha.5114f85".to_string()));
    }

    #[test]
    fn test_invalid_versions() {
        for input in ["", "1.0", "1.0.0.0", "a.b.c", "01.0.0", "1.0.0-", "1.0.0+", "1..0", "-1.0.0"] {
            assert!(SchemaVersion::parse(input).is_err(), "{} should not parse", input);
        }
    }

    #[test]
    fn test_increment_release() {
        let v = SchemaVersion::parse("1.2.3").unwrap();
        assert_eq!(v.increment(Bump::Patch).unwrap().to_string(), "1.2.4");
        assert_eq!(v.increment(Bump::Minor).unwrap().to_string(), "1.3.0");
        assert_eq!(v.increment(Bump::Major).unwrap().to_string(), "2.0.0");
        assert_eq!(v.increment(Bump::None).unwrap(), v);
    }

    #[test]
    fn test_increment_pre_release() {
        assert_eq!(increment("2.0.0-rc.1", Bump::Major).unwrap(), "2.0.0");
        assert_eq!(increment("1.2.3-rc.1", Bump::Major).unwrap(), "2.0.0");
        assert_eq!(increment("1.3.0-beta", Bump::Minor).unwrap(), "1.3.0");
        assert_eq!(increment("1.3.1-beta", Bump::Minor).unwrap(), "1.4.0");
        assert_eq!(increment("1.2.4-alpha", Bump::Patch).unwrap(), "1.2.4");
    }

    #[test]
    fn test_increment_drops_build_metadata() {
        assert_eq!(increment("1.0.0+build.7", Bump::Patch).unwrap(), "1.0.1");
    }

    #[test]
    fn test_version_comparison() {
        let v1 = SchemaVersion::new(1, 0, 0);
        let v2 = SchemaVersion::new(2, 0, 0);
        let v3 = SchemaVersion::new(1, 1, 0);
        let v4 = SchemaVersion::new(1, 0, 1);
        let pre = SchemaVersion::parse("1.0.0-rc.1").unwrap();

        assert!(v1 < v2);
        assert!(v1 < v3);
        assert!(v4 < v3);
        assert!(pre < v1);
    }

    #[test]
    fn test_increment_overflow_is_an_error() {
        let max = u64::MAX.to_string();

        let err = increment(&format!("{}.0.0", max), Bump::Major).unwrap_err();
        assert!(matches!(err, VersionError::Overflow { component: "major", .. }));
        assert!(increment(&format!("1.{}.0", max), Bump::Minor).is_err());
        assert!(increment(&format!("1.2.{}", max), Bump::Patch).is_err());

        // finalizing a pre-release never adds
        assert_eq!(increment(&format!("{}.0.0-rc.1", max), Bump::Major).unwrap(), format!("{}.0.0", max));
        // other components may sit at the limit
        assert_eq!(increment(&format!("1.{}.{}", max, max), Bump::Major).unwrap(), "2.0.0");
    }

    #[test]
    fn test_pre_release_precedence() {
        let parse = |s: &str| SchemaVersion::parse(s).unwrap();

        assert!(parse("1.0.0-rc.2") < parse("1.0.0-rc.10"));
        assert!(parse("1.0.0-alpha") < parse("1.0.0-alpha.1"));
        assert!(parse("1.0.0-alpha.1") < parse("1.0.0-alpha.beta"));
        assert!(parse("1.0.0-alpha.beta") < parse("1.0.0-beta"));
        assert!(parse("1.0.0-beta.11") < parse("1.0.0-rc.1"));
        assert!(parse("1.0.0-rc.1") < parse("1.0.0"));
    }
}
