//! Non-enum types, their fields, and field arguments
//!
//! Copyright (c) 2025 Schemaver Team
//! Licensed under the Apache-2.0 license

use super::Rule;
use crate::findings::{ChangeKind, Findings, RuleKind};
use crate::model::{ArgDef, FieldDef, Schema, StructuredTypeDef};
use crate::pair::{Pair, SetPair};
use crate::severity::Severity;

/// Types, fields and arguments.
///
/// A removed type is breaking and ends the rule. Otherwise field-level
/// changes decide; only when no field changed does a brand-new type count
/// as an additive change.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeRule;

impl Rule for TypeRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Types
    }

    fn check(&self, schemas: Pair<&Schema>, findings: &mut Findings) -> Severity {
        let types = SetPair::new(
            schemas.new.structured_types(),
            schemas.old.structured_types(),
            |t: &StructuredTypeDef| t.name.clone(),
        );

        if types.has_removed() {
            for removed in &types.removed {
                findings.record(
                    RuleKind::Types,
                    ChangeKind::Removed,
                    removed.name.as_str(),
                    Severity::MAJOR,
                    format!("{} type {} deleted", removed.kind, removed.name),
                );
            }
            return Severity::MAJOR;
        }

        let fields = check_type_fields(&types.paired, findings);
        if !fields.is_none() {
            return fields;
        }

        if types.has_added() {
            for added in &types.added {
                findings.record(
                    RuleKind::Types,
                    ChangeKind::Added,
                    added.name.as_str(),
                    Severity::MINOR,
                    format!("{} type {} added", added.kind, added.name),
                );
            }
            return Severity::MINOR;
        }

        Severity::NONE
    }
}

/// Union of the field-level severities of every paired type
fn check_type_fields(types: &[Pair<&StructuredTypeDef>], findings: &mut Findings) -> Severity {
    let mut severity = Severity::NONE;
    for pair in types {
        severity |= check_fields_of(*pair, findings);
    }
    severity
}

fn check_fields_of(ty: Pair<&StructuredTypeDef>, findings: &mut Findings) -> Severity {
    let type_name = &ty.new.name;

    let (new_fields, old_fields) = match (&ty.new.fields, &ty.old.fields) {
        (None, None) => return Severity::NONE,
        (Some(new_fields), Some(old_fields)) => (new_fields, old_fields),
        _ => {
            findings.record(
                RuleKind::Types,
                ChangeKind::KindChanged,
                type_name.as_str(),
                Severity::MAJOR,
                format!("{} changed from {} to {}", type_name, ty.old.kind, ty.new.kind),
            );
            return Severity::MAJOR;
        }
    };

    let fields = SetPair::new(new_fields.values(), old_fields.values(), |f: &FieldDef| {
        f.name.clone()
    });

    if fields.has_removed() {
        for removed in &fields.removed {
            findings.record(
                RuleKind::Types,
                ChangeKind::Removed,
                format!("{}.{}", type_name, removed.name),
                Severity::MAJOR,
                format!("field {} deleted from {}", removed.name, type_name),
            );
        }
        return Severity::MAJOR;
    }

    let mut severity = Severity::NONE;
    for field in &fields.paired {
        severity |= check_field(type_name, *field, findings);
    }
    if !severity.is_none() {
        return severity;
    }

    if fields.has_added() {
        for added in &fields.added {
            findings.record(
                RuleKind::Types,
                ChangeKind::Added,
                format!("{}.{}", type_name, added.name),
                Severity::MINOR,
                format!("field {} added to {}", added.name, type_name),
            );
        }
        return Severity::MINOR;
    }

    Severity::NONE
}

fn check_field(type_name: &str, field: Pair<&FieldDef>, findings: &mut Findings) -> Severity {
    let path = format!("{}.{}", type_name, field.new.name);
    let mut severity = Severity::NONE;

    if !field.eq_by(|f| f.ty.signature()) {
        let new_sig = field.new.ty.signature();
        let old_sig = field.old.ty.signature();

        if new_sig == format!("{}!", old_sig) {
            findings.record(
                RuleKind::Types,
                ChangeKind::NonNullAdded,
                path.as_str(),
                Severity::MINOR,
                format!("field type narrowed from {} to {}", old_sig, new_sig),
            );
            severity |= Severity::MINOR;
        } else {
            findings.record(
                RuleKind::Types,
                ChangeKind::TypeChanged,
                path.as_str(),
                Severity::MAJOR,
                format!("field type changed from {} to {}", old_sig, new_sig),
            );
            return severity | Severity::MAJOR;
        }
    }

    let args = field.diff_on(|f| &f.args, |a: &ArgDef| a.name.clone());
    severity |= check_field_arguments(&path, &args, findings);

    if !field.eq_by(|f| f.deprecation_reason.clone()) {
        findings.record(
            RuleKind::Types,
            ChangeKind::Deprecated,
            path.as_str(),
            Severity::PATCH,
            match &field.new.deprecation_reason {
                Some(reason) => format!("field deprecated: {}", reason),
                None => "field deprecation removed".to_string(),
            },
        );
        severity |= Severity::PATCH;
    }

    severity
}

/// Arguments are matched by name and compared by innermost type name only;
/// list and non-null wrappers on arguments are not inspected.
fn check_field_arguments(
    field_path: &str,
    args: &SetPair<'_, ArgDef>,
    findings: &mut Findings,
) -> Severity {
    if args.total_cardinality() == 0 {
        return Severity::NONE;
    }

    if args.has_removed() {
        for removed in &args.removed {
            findings.record(
                RuleKind::Types,
                ChangeKind::Removed,
                format!("{}({})", field_path, removed.name),
                Severity::MAJOR,
                format!("argument {} deleted from {}", removed.name, field_path),
            );
        }
        return Severity::MAJOR;
    }

    let changed = args
        .paired
        .iter()
        .find(|arg| !arg.eq_by(|a| a.ty.innermost_name().to_string()));
    if let Some(arg) = changed {
        findings.record(
            RuleKind::Types,
            ChangeKind::TypeChanged,
            format!("{}({})", field_path, arg.new.name),
            Severity::MAJOR,
            format!(
                "argument type changed from {} to {}",
                arg.old.ty, arg.new.ty
            ),
        );
        return Severity::MAJOR;
    }

    if args.has_added() {
        for added in &args.added {
            findings.record(
                RuleKind::Types,
                ChangeKind::Added,
                format!("{}({})", field_path, added.name),
                Severity::MINOR,
                format!("argument {} added to {}", added.name, field_path),
            );
        }
        return Severity::MINOR;
    }

    Severity::NONE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TypeKind, TypeReference};

    fn named(name: &str) -> TypeReference {
        TypeReference::named(name)
    }

    fn query(fields: Vec<FieldDef>) -> Schema {
        Schema::builder().scalar("String").object("Query", fields).build()
    }

    fn run(new: &Schema, old: &Schema) -> (Severity, Vec<crate::findings::Finding>) {
        let mut findings = Findings::new();
        let severity = TypeRule.check(Pair::new(new, old), &mut findings);
        (severity, findings.into_vec())
    }

    #[test]
    fn test_type_removed_is_major() {
        let old = query(vec![FieldDef::new("a", named("String"))]);
        let new = Schema::builder()
            .object("Query", [FieldDef::new("a", named("String"))])
            .build();

        let (severity, findings) = run(&new, &old);
        assert_eq!(severity, Severity::MAJOR);
        assert_eq!(findings[0].path, "String");
    }

    #[test]
    fn test_type_added_is_minor() {
        let old = query(vec![FieldDef::new("a", named("String"))]);
        let new = Schema::builder()
            .scalar("String")
            .scalar("DateTime")
            .object("Query", [FieldDef::new("a", named("String"))])
            .build();

        let (severity, _) = run(&new, &old);
        assert_eq!(severity, Severity::MINOR);
    }

    #[test]
    fn test_field_added_and_removed() {
        let old = query(vec![FieldDef::new("a", named("String"))]);
        let new = query(vec![
            FieldDef::new("a", named("String")),
            FieldDef::new("b", named("String")),
        ]);

        assert_eq!(run(&new, &old).0, Severity::MINOR);
        assert_eq!(run(&old, &new).0, Severity::MAJOR);
    }

    #[test]
    fn test_field_type_change_is_major() {
        let old = query(vec![FieldDef::new("a", named("String"))]);
        let new = query(vec![FieldDef::new("a", TypeReference::list(named("String")))]);

        let (severity, findings) = run(&new, &old);
        assert_eq!(severity, Severity::MAJOR);
        assert_eq!(findings[0].change, ChangeKind::TypeChanged);
        assert!(findings[0].message.contains("String to [String]"));
    }

    #[test]
    fn test_adding_non_null_is_minor() {
        let old = query(vec![FieldDef::new("a", named("String"))]);
        let new = query(vec![FieldDef::new("a", TypeReference::non_null(named("String")))]);

        let (severity, findings) = run(&new, &old);
        assert_eq!(severity, Severity::MINOR);
        assert_eq!(findings[0].change, ChangeKind::NonNullAdded);
    }

    #[test]
    fn test_removing_non_null_is_major() {
        let old = query(vec![FieldDef::new("a", TypeReference::non_null(named("String")))]);
        let new = query(vec![FieldDef::new("a", named("String"))]);

        assert_eq!(run(&new, &old).0, Severity::MAJOR);
    }

    #[test]
    fn test_type_change_skips_argument_and_deprecation_checks() {
        let old = query(vec![FieldDef::new("a", named("String")).with_arg("x", named("Int"))]);
        let new = query(vec![FieldDef::new("a", named("Int")).deprecated("gone")]);

        let (severity, findings) = run(&new, &old);
        assert_eq!(severity, Severity::MAJOR);
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_non_null_relaxation_still_checks_arguments() {
        let old = query(vec![FieldDef::new("a", named("String"))]);
        let new = query(vec![FieldDef::new("a", TypeReference::non_null(named("String")))
            .with_arg("x", named("Int"))]);

        let (severity, findings) = run(&new, &old);
        assert_eq!(severity, Severity::MINOR);
        assert_eq!(findings.len(), 2);
    }

    #[test]
    fn test_deprecation_is_patch() {
        let old = query(vec![FieldDef::new("a", named("String"))]);
        let new = query(vec![FieldDef::new("a", named("String")).deprecated("use b")]);

        let (severity, findings) = run(&new, &old);
        assert_eq!(severity, Severity::PATCH);
        assert_eq!(findings[0].message, "field deprecated: use b");

        // undeprecating is reported the same way
        assert_eq!(run(&old, &new).0, Severity::PATCH);
    }

    #[test]
    fn test_field_changes_shadow_type_additions() {
        let old = query(vec![FieldDef::new("a", named("String"))]);
        let new = Schema::builder()
            .scalar("String")
            .scalar("DateTime")
            .object("Query", [FieldDef::new("a", named("String")).deprecated("old")])
            .build();

        let (severity, findings) = run(&new, &old);
        assert_eq!(severity, Severity::PATCH);
        assert!(findings.iter().all(|f| f.change != ChangeKind::Added));
    }

    #[test]
    fn test_severities_union_across_fields_and_types() {
        let old = Schema::builder()
            .object("A", [FieldDef::new("x", named("String"))])
            .object("B", [FieldDef::new("y", named("String"))])
            .scalar("String")
            .build();
        let new = Schema::builder()
            .object("A", [FieldDef::new("x", TypeReference::non_null(named("String")))])
            .object("B", [FieldDef::new("y", named("String")).deprecated("old")])
            .scalar("String")
            .build();

        let (severity, _) = run(&new, &old);
        assert_eq!(severity, Severity::MINOR | Severity::PATCH);
    }

    #[test]
    fn test_sibling_types_checked_after_field_removal() {
        let old = Schema::builder()
            .object("A", [FieldDef::new("x", named("String"))])
            .object("B", [FieldDef::new("y", named("String"))])
            .scalar("String")
            .build();
        let new = Schema::builder()
            .object("A", Vec::new())
            .object("B", [FieldDef::new("y", named("String")).deprecated("old")])
            .scalar("String")
            .build();

        let (severity, findings) = run(&new, &old);
        assert_eq!(severity, Severity::MAJOR | Severity::PATCH);
        assert_eq!(findings.len(), 2);
    }

    #[test]
    fn test_argument_changes() {
        let base = FieldDef::new("hero", named("String")).with_arg("episode", named("Episode"));

        let old = query(vec![base.clone()]);
        let added = query(vec![base.clone().with_arg("limit", named("Int"))]);
        let removed = query(vec![FieldDef::new("hero", named("String"))]);
        let retyped = query(vec![
            FieldDef::new("hero", named("String")).with_arg("episode", named("Int"))
        ]);

        assert_eq!(run(&added, &old).0, Severity::MINOR);
        assert_eq!(run(&removed, &old).0, Severity::MAJOR);
        assert_eq!(run(&retyped, &old).0, Severity::MAJOR);
    }

    #[test]
    fn test_argument_wrappers_are_ignored() {
        let old = query(vec![FieldDef::new("hero", named("String")).with_arg("id", named("ID"))]);
        let new = query(vec![FieldDef::new("hero", named("String"))
            .with_arg("id", TypeReference::non_null(TypeReference::list(named("ID"))))]);

        assert!(run(&new, &old).0.is_none());
    }

    #[test]
    fn test_scalars_are_skipped() {
        let schema = Schema::builder().scalar("String").build();
        assert!(run(&schema, &schema).0.is_none());
    }

    #[test]
    fn test_kind_change_is_major() {
        let old = Schema::builder().scalar("Date").build();
        let new = Schema::builder()
            .with_fields("Date", TypeKind::Object, [FieldDef::new("iso", named("Date"))])
            .build();

        let (severity, findings) = run(&new, &old);
        assert_eq!(severity, Severity::MAJOR);
        assert_eq!(findings[0].change, ChangeKind::KindChanged);
    }
}
