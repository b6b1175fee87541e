//! Change severity flags and their mapping onto version bumps
//!
//! Every rule reports a [`Severity`]. Severities are bit flags and are
//! combined by union, so a comparison that finds both a breaking and an
//! additive change carries `MAJOR | MINOR` rather than a single level.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Bit-flag set over `PATCH`, `MINOR` and `MAJOR`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Severity(u8);

impl Severity {
    pub const NONE: Severity = Severity(0);
    pub const PATCH: Severity = Severity(1);
    pub const MINOR: Severity = Severity(2);
    pub const MAJOR: Severity = Severity(4);

    const ALL: u8 = 0b111;

    /// Build a severity from raw bits, discarding unknown bits
    pub fn from_bits(bits: u8) -> Self {
        Severity(bits & Self::ALL)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Check whether every flag of `other` is set in `self`
    pub fn contains(self, other: Severity) -> bool {
        self.0 & other.0 == other.0
    }

    /// Map the accumulated flags onto the version component to increment.
    ///
    /// A lone `PATCH` is a patch bump and `MINOR` (with or without `PATCH`)
    /// is a minor bump. Any set carrying the `MAJOR` bit is a major bump,
    /// whatever lower flags accompany it.
    pub fn bump(self) -> Bump {
        if self.contains(Severity::MAJOR) {
            Bump::Major
        } else if self.contains(Severity::MINOR) {
            Bump::Minor
        } else if self.contains(Severity::PATCH) {
            Bump::Patch
        } else {
            Bump::None
        }
    }
}

impl BitOr for Severity {
    type Output = Severity;

    fn bitor(self, rhs: Severity) -> Severity {
        Severity(self.0 | rhs.0)
    }
}

impl BitOrAssign for Severity {
    fn bitor_assign(&mut self, rhs: Severity) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return write!(f, "none");
        }
        let names: Vec<&str> = [
            (Severity::MAJOR, "major"),
            (Severity::MINOR, "minor"),
            (Severity::PATCH, "patch"),
        ]
        .iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, name)| *name)
        .collect();
        write!(f, "{}", names.join("|"))
    }
}

/// Version component to increment
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bump {
    None,
    Patch,
    Minor,
    Major,
}

impl fmt::Display for Bump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bump::None => write!(f, "none"),
            Bump::Patch => write!(f, "patch"),
            Bump::Minor => write!(f, "minor"),
            Bump::Major => write!(f, "major"),
        }
    }
}
