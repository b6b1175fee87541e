//! Structural comparison rules and the engine that runs them
//!
//! The engine runs a fixed, ordered list of rules (enums, then types with
//! their fields and arguments, then directives) over the pair of schemas
//! and unions the severities they report. Every rule always runs; there is
//! no early exit once a breaking change has been seen.
//!
//! Copyright (c) 2025 Schemaver Team
//! Licensed under the Apache-2.0 license

mod directives;
mod enums;
mod types;

pub use directives::DirectiveRule;
pub use enums::EnumRule;
pub use types::TypeRule;

use crate::findings::{Finding, Findings, RuleKind};
use crate::model::Schema;
use crate::pair::Pair;
use crate::severity::{Bump, Severity};
use serde::{Deserialize, Serialize};

/// A single structural rule over a new/old schema pair
pub trait Rule: Send + Sync {
    /// Which rule this is, for findings and logs
    fn kind(&self) -> RuleKind;

    /// Compare the two snapshots and report the severity of what changed
    fn check(&self, schemas: Pair<&Schema>, findings: &mut Findings) -> Severity;
}

/// Outcome of running every rule over a schema pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub severity: Severity,
    pub findings: Vec<Finding>,
}

impl Report {
    pub fn bump(&self) -> Bump {
        self.severity.bump()
    }

    pub fn is_unchanged(&self) -> bool {
        self.severity.is_none()
    }
}

/// Ordered rule runner
pub struct RuleEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleEngine {
    /// Engine with the standard rule order: enums, types, directives
    pub fn new() -> Self {
        Self::with_rules(vec![
            Box::new(EnumRule),
            Box::new(TypeRule),
            Box::new(DirectiveRule),
        ])
    }

    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    pub fn rule_kinds(&self) -> Vec<RuleKind> {
        self.rules.iter().map(|rule| rule.kind()).collect()
    }

    /// Run all rules and union their severities
    pub fn evaluate(&self, schemas: Pair<&Schema>) -> Report {
        let mut findings = Findings::new();
        let mut severity = Severity::NONE;

        for rule in &self.rules {
            let span = tracing::debug_span!("rule", rule = %rule.kind());
            let _guard = span.enter();

            let result = rule.check(schemas, &mut findings);
            tracing::debug!(severity = %result, "rule finished");
            severity |= result;
        }

        Report {
            severity,
            findings: findings.into_vec(),
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_kinds())
            .finish()
    }
}
