//! Advisory findings recorded while comparing two schemas
//!
//! Findings describe what changed and which rule noticed it. They are
//! diagnostics only: the version decision is made from the severities the
//! rules return, never from the findings list.

use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rule that produced a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Enums,
    Types,
    Directives,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Enums => write!(f, "enums"),
            RuleKind::Types => write!(f, "types"),
            RuleKind::Directives => write!(f, "directives"),
        }
    }
}

/// What happened to the element at a finding's path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Added,
    Removed,
    TypeChanged,
    NonNullAdded,
    KindChanged,
    Deprecated,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::Added => write!(f, "added"),
            ChangeKind::Removed => write!(f, "removed"),
            ChangeKind::TypeChanged => write!(f, "type changed"),
            ChangeKind::NonNullAdded => write!(f, "non-null added"),
            ChangeKind::KindChanged => write!(f, "kind changed"),
            ChangeKind::Deprecated => write!(f, "deprecation changed"),
        }
    }
}

/// One detected change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub rule: RuleKind,
    pub change: ChangeKind,
    /// `Type`, `Type.field`, `Type.field(arg)`, `Enum.VALUE` or `@directive`
    pub path: String,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.path, self.message)
    }
}

/// Collector handed to each rule
#[derive(Debug, Default)]
pub struct Findings {
    items: Vec<Finding>,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        rule: RuleKind,
        change: ChangeKind,
        path: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
    ) {
        let finding = Finding {
            rule,
            change,
            path: path.into(),
            severity,
            message: message.into(),
        };
        tracing::debug!(
            rule = %finding.rule,
            change = %finding.change,
            path = %finding.path,
            severity = %finding.severity,
            "{}",
            finding.message
        );
        self.items.push(finding);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Finding> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Finding> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_display() {
        let mut findings = Findings::new();
        assert!(findings.is_empty());

        findings.record(
            RuleKind::Types,
            ChangeKind::Removed,
            "Query.hero",
            Severity::MAJOR,
            "field removed",
        );

        assert_eq!(findings.len(), 1);
        let first = findings.iter().next().unwrap();
        assert_eq!(first.to_string(), "[major] Query.hero: field removed");
        assert_eq!(findings.into_vec()[0].change, ChangeKind::Removed);
    }
}
