//! Schemaver Core - semantic version bumps from schema changes
//!
//! This crate compares two snapshots of a typed API schema (a graph of
//! named types, fields, arguments, enums and directives) and decides which
//! component of a semantic version the change set calls for.
//!
//! # Main Components
//!
//! - **Schema Model**: immutable snapshot of types, fields and directives
//! - **Pairing**: identity-keyed partition of new/old collections
//! - **Rule Engine**: ordered enum, type/field/argument and directive rules
//! - **Severity Mapping**: bit-flag severities mapped onto major/minor/patch
//! - **Version Arithmetic**: semantic version parsing and incrementing
//!
//! # Example
//!
//! ```
//! use schemaver_core::{compute_next_version, FieldDef, Schema, TypeReference};
//!
//! let old = Schema::builder()
//!     .scalar("String")
//!     .object("Query", [FieldDef::new("hero", TypeReference::named("String"))])
//!     .build();
//! let new = Schema::builder()
//!     .scalar("String")
//!     .object("Query", [
//!         FieldDef::new("hero", TypeReference::named("String")),
//!         FieldDef::new("villain", TypeReference::named("String")),
//!     ])
//!     .build();
//!
//! assert_eq!(compute_next_version(&new, Some(&old), "1.0.0")?, "1.1.0");
//! assert_eq!(compute_next_version(&new, None, "3.2.1")?, "3.2.1");
//! # Ok::<(), schemaver_core::Error>(())
//! ```

pub mod error;
pub mod findings;
pub mod model;
pub mod pair;
pub mod rules;
pub mod severity;
pub mod version;

pub use error::{Error, Result};
pub use findings::{ChangeKind, Finding, Findings, RuleKind};
pub use model::{
    ArgDef, DirectiveDef, EnumTypeDef, EnumValueDef, FieldDef, Schema, SchemaBuilder,
    StructuredTypeDef, TypeDef, TypeKind, TypeReference,
};
pub use pair::{Pair, SetPair};
pub use rules::{Report, Rule, RuleEngine};
pub use severity::{Bump, Severity};
pub use version::{SchemaVersion, VersionError};

use serde::{Deserialize, Serialize};

/// Version assumed when the caller does not supply one
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Full outcome of a version computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionReport {
    pub previous_version: String,
    pub next_version: String,
    pub severity: Severity,
    pub bump: Bump,
    pub findings: Vec<Finding>,
}

/// Run every rule over the two snapshots
pub fn compare(new_schema: &Schema, old_schema: &Schema) -> Report {
    RuleEngine::new().evaluate(Pair::new(new_schema, old_schema))
}

/// Compute the next version together with the findings behind it.
///
/// Without an old schema this is a first publish and `old_version` is
/// returned verbatim.
pub fn compute_report(
    new_schema: &Schema,
    old_schema: Option<&Schema>,
    old_version: &str,
) -> Result<VersionReport> {
    let Some(old_schema) = old_schema else {
        tracing::debug!(version = old_version, "no previous schema, keeping version");
        return Ok(VersionReport {
            previous_version: old_version.to_string(),
            next_version: old_version.to_string(),
            severity: Severity::NONE,
            bump: Bump::None,
            findings: Vec::new(),
        });
    };

    let report = compare(new_schema, old_schema);
    let bump = report.bump();
    let next_version = match bump {
        Bump::None => old_version.to_string(),
        _ => version::increment(old_version, bump)
            .map_err(|e| Error::version(old_version, e))?,
    };

    tracing::info!(
        severity = %report.severity,
        bump = %bump,
        findings = report.findings.len(),
        from = old_version,
        to = %next_version,
        "schema comparison finished"
    );

    Ok(VersionReport {
        previous_version: old_version.to_string(),
        next_version,
        severity: report.severity,
        bump,
        findings: report.findings,
    })
}

/// Next version string for `new_schema` relative to `old_schema`
pub fn compute_next_version(
    new_schema: &Schema,
    old_schema: Option<&Schema>,
    old_version: &str,
) -> Result<String> {
    compute_report(new_schema, old_schema, old_version).map(|report| report.next_version)
}

/// [`compute_next_version`] starting from [`DEFAULT_VERSION`]
pub fn compute_next_version_default(new_schema: &Schema, old_schema: Option<&Schema>) -> Result<String> {
    compute_next_version(new_schema, old_schema, DEFAULT_VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Schema {
        Schema::builder()
            .scalar("String")
            .enum_type("Episode", ["NEWHOPE"])
            .object("Query", [FieldDef::new("hero", TypeReference::named("String"))])
            .directive("skip")
            .build()
    }

    #[test]
    fn test_no_old_schema_keeps_version() {
        assert_eq!(compute_next_version(&base(), None, "5.0.0").unwrap(), "5.0.0");
        assert_eq!(compute_next_version_default(&base(), None).unwrap(), "1.0.0");
        // not parsed when nothing is compared
        assert_eq!(compute_next_version(&base(), None, "not-a-version").unwrap(), "not-a-version");
    }

    #[test]
    fn test_unchanged_schema_keeps_version_verbatim() {
        let schema = base();
        assert_eq!(compute_next_version(&schema, Some(&schema), "v1.0.0+abc").unwrap(), "v1.0.0+abc");
    }

    #[test]
    fn test_major_with_lower_flags_is_major() {
        let old = base();
        let new = Schema::builder()
            .scalar("String")
            .enum_type("Episode", ["NEWHOPE"])
            .object("Query", Vec::new())
            .directive("skip")
            .directive("cached")
            .build();

        let report = compute_report(&new, Some(&old), "1.4.2").unwrap();
        assert_eq!(report.severity, Severity::MAJOR | Severity::PATCH);
        assert_eq!(report.bump, Bump::Major);
        assert_eq!(report.next_version, "2.0.0");
        assert_eq!(report.findings.len(), 2);
    }

    #[test]
    fn test_invalid_version_is_an_error() {
        let old = base();
        let new = Schema::builder()
            .scalar("String")
            .enum_type("Episode", ["NEWHOPE", "JEDI"])
            .object("Query", [FieldDef::new("hero", TypeReference::named("String"))])
            .directive("skip")
            .build();

        let err = compute_next_version(&new, Some(&old), "one").unwrap_err();
        assert!(matches!(err, Error::Version { .. }));
    }

    #[test]
    fn test_overflowing_version_is_an_error() {
        let old = base();
        let new = Schema::builder()
            .scalar("String")
            .object("Query", [FieldDef::new("hero", TypeReference::named("String"))])
            .directive("skip")
            .build();

        let err = compute_next_version(&new, Some(&old), "18446744073709551615.0.0").unwrap_err();
        assert!(matches!(
            err,
            Error::Version {
                source: VersionError::Overflow { .. },
                ..
            }
        ));
    }
}
