//! Schema directives
//!
//! Copyright (c) 2025 Schemaver Team
//! Licensed under the Apache-2.0 license

use super::Rule;
use crate::findings::{ChangeKind, Findings, RuleKind};
use crate::model::{DirectiveDef, Schema};
use crate::pair::Pair;
use crate::severity::Severity;

/// Directives are compared by name only; their arguments are not inspected.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectiveRule;

impl Rule for DirectiveRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Directives
    }

    fn check(&self, schemas: Pair<&Schema>, findings: &mut Findings) -> Severity {
        let directives = schemas.diff_on(|s| &s.directives, |d: &DirectiveDef| d.name.clone());

        if directives.has_removed() {
            for removed in &directives.removed {
                findings.record(
                    RuleKind::Directives,
                    ChangeKind::Removed,
                    format!("@{}", removed.name),
                    Severity::MAJOR,
                    format!("directive @{} deleted", removed.name),
                );
            }
            return Severity::MAJOR;
        }

        if directives.has_added() {
            for added in &directives.added {
                findings.record(
                    RuleKind::Directives,
                    ChangeKind::Added,
                    format!("@{}", added.name),
                    Severity::PATCH,
                    format!("directive @{} added", added.name),
                );
            }
            return Severity::PATCH;
        }

        Severity::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(new: &Schema, old: &Schema) -> Severity {
        DirectiveRule.check(Pair::new(new, old), &mut Findings::new())
    }

    #[test]
    fn test_directive_added_is_patch() {
        let old = Schema::builder().directive("skip").build();
        let new = Schema::builder().directive("skip").directive("cached").build();
        assert_eq!(run(&new, &old), Severity::PATCH);
    }

    #[test]
    fn test_directive_removed_is_major() {
        let old = Schema::builder().directive("skip").directive("include").build();
        let new = Schema::builder().directive("skip").build();
        assert_eq!(run(&new, &old), Severity::MAJOR);
    }

    #[test]
    fn test_removal_hides_addition() {
        let old = Schema::builder().directive("skip").build();
        let new = Schema::builder().directive("include").build();

        let mut findings = Findings::new();
        let severity = DirectiveRule.check(Pair::new(&new, &old), &mut findings);
        assert_eq!(severity, Severity::MAJOR);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings.iter().next().unwrap().path, "@skip");
    }

    #[test]
    fn test_reordering_is_not_a_change() {
        let old = Schema::builder().directive("skip").directive("include").build();
        let new = Schema::builder().directive("include").directive("skip").build();
        assert!(run(&new, &old).is_none());
    }
}
