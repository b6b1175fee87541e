//! Enum types and enum values
//!
//! Copyright (c) 2025 Schemaver Team
//! Licensed under the Apache-2.0 license

use super::Rule;
use crate::findings::{ChangeKind, Findings, RuleKind};
use crate::model::{EnumTypeDef, EnumValueDef, Schema};
use crate::pair::{Pair, SetPair};
use crate::severity::Severity;

/// Removing an enum type or value is breaking; adding one is additive.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumRule;

impl Rule for EnumRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Enums
    }

    fn check(&self, schemas: Pair<&Schema>, findings: &mut Findings) -> Severity {
        let enums = SetPair::new(
            schemas.new.enum_types(),
            schemas.old.enum_types(),
            |e: &EnumTypeDef| e.name.clone(),
        );

        if enums.has_removed() {
            for removed in &enums.removed {
                findings.record(
                    RuleKind::Enums,
                    ChangeKind::Removed,
                    removed.name.as_str(),
                    Severity::MAJOR,
                    format!("enum type {} deleted", removed.name),
                );
            }
            return Severity::MAJOR;
        }

        let values = check_enum_values(&enums.paired, findings);
        if !values.is_none() {
            return values;
        }

        if enums.has_added() {
            for added in &enums.added {
                findings.record(
                    RuleKind::Enums,
                    ChangeKind::Added,
                    added.name.as_str(),
                    Severity::MINOR,
                    format!("enum type {} added", added.name),
                );
            }
            return Severity::MINOR;
        }

        Severity::NONE
    }
}

/// Walk paired enums until one loses a value.
///
/// A deleted value sets the result to `MAJOR` and ends the walk; later
/// enums are not inspected. Added values set `MINOR`.
fn check_enum_values(enums: &[Pair<&EnumTypeDef>], findings: &mut Findings) -> Severity {
    let mut severity = Severity::NONE;

    for pair in enums {
        let values = pair.diff_on(|e| &e.values, |v: &EnumValueDef| v.name.clone());
        let enum_name = &pair.new.name;

        if values.has_removed() {
            for value in &values.removed {
                findings.record(
                    RuleKind::Enums,
                    ChangeKind::Removed,
                    format!("{}.{}", enum_name, value.name),
                    Severity::MAJOR,
                    format!("enum value {} deleted from {}", value.name, enum_name),
                );
            }
            return Severity::MAJOR;
        }

        if values.has_added() {
            for value in &values.added {
                findings.record(
                    RuleKind::Enums,
                    ChangeKind::Added,
                    format!("{}.{}", enum_name, value.name),
                    Severity::MINOR,
                    format!("enum value {} added in {}", value.name, enum_name),
                );
            }
            severity = Severity::MINOR;
        }
    }

    severity
}
