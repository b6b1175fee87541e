//! In-memory schema object model
//!
//! A [`Schema`] is an immutable snapshot: a map from type name to
//! [`TypeDef`] plus the ordered list of directives. Enum and structured
//! types, as well as list/non-null type references, are explicit variants
//! so the comparison rules can match on them exhaustively.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One snapshot of a typed API schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub types: BTreeMap<String, TypeDef>,
    #[serde(default)]
    pub directives: Vec<DirectiveDef>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a schema
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Look up a type by name
    pub fn get_type(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    /// All enum types, in name order
    pub fn enum_types(&self) -> Vec<&EnumTypeDef> {
        self.types
            .values()
            .filter_map(|t| match t {
                TypeDef::Enum(e) => Some(e),
                TypeDef::Structured(_) => None,
            })
            .collect()
    }

    /// All non-enum types, in name order
    pub fn structured_types(&self) -> Vec<&StructuredTypeDef> {
        self.types
            .values()
            .filter_map(|t| match t {
                TypeDef::Structured(s) => Some(s),
                TypeDef::Enum(_) => None,
            })
            .collect()
    }
}

/// A named type definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum TypeDef {
    Enum(EnumTypeDef),
    Structured(StructuredTypeDef),
}

impl TypeDef {
    pub fn name(&self) -> &str {
        match self {
            TypeDef::Enum(e) => &e.name,
            TypeDef::Structured(s) => &s.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumTypeDef {
    pub name: String,
    pub values: Vec<EnumValueDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValueDef {
    pub name: String,
}

/// Introspection kind of a non-enum type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    InputObject,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Scalar => write!(f, "scalar"),
            TypeKind::Object => write!(f, "object"),
            TypeKind::Interface => write!(f, "interface"),
            TypeKind::Union => write!(f, "union"),
            TypeKind::InputObject => write!(f, "input object"),
        }
    }
}

/// Any type that is not an enum.
///
/// `fields` is `None` for leaf types (scalars, unions), which take no part
/// in field-level comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredTypeDef {
    pub name: String,
    pub kind: TypeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, FieldDef>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeReference,
    #[serde(default)]
    pub args: Vec<ArgDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeReference,
}

/// Reference to a type, possibly wrapped in list / non-null modifiers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeReference {
    Named(String),
    List(Box<TypeReference>),
    NonNull(Box<TypeReference>),
}

impl TypeReference {
    pub fn named(name: impl Into<String>) -> Self {
        TypeReference::Named(name.into())
    }

    pub fn list(inner: TypeReference) -> Self {
        TypeReference::List(Box::new(inner))
    }

    pub fn non_null(inner: TypeReference) -> Self {
        TypeReference::NonNull(Box::new(inner))
    }

    /// Canonical signature: `Name`, `[inner]`, `inner!`
    pub fn signature(&self) -> String {
        match self {
            TypeReference::Named(name) => name.clone(),
            TypeReference::List(inner) => format!("[{}]", inner.signature()),
            TypeReference::NonNull(inner) => format!("{}!", inner.signature()),
        }
    }

    /// Name of the innermost named type, ignoring all wrappers
    pub fn innermost_name(&self) -> &str {
        match self {
            TypeReference::Named(name) => name,
            TypeReference::List(inner) | TypeReference::NonNull(inner) => inner.innermost_name(),
        }
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectiveDef {
    pub name: String,
    #[serde(default)]
    pub args: Vec<ArgDef>,
    #[serde(default)]
    pub locations: Vec<String>,
}

/// Fluent construction of schemas, mostly for tests and embedders
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    /// Add an enum type with the given value names
    pub fn enum_type<I, S>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values
            .into_iter()
            .map(|v| EnumValueDef { name: v.into() })
            .collect();
        self.schema.types.insert(
            name.to_string(),
            TypeDef::Enum(EnumTypeDef {
                name: name.to_string(),
                values,
            }),
        );
        self
    }

    /// Add a scalar type
    pub fn scalar(mut self, name: &str) -> Self {
        self.schema.types.insert(
            name.to_string(),
            TypeDef::Structured(StructuredTypeDef {
                name: name.to_string(),
                kind: TypeKind::Scalar,
                fields: None,
            }),
        );
        self
    }

    /// Add an object type with the given fields
    pub fn object<I>(self, name: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = FieldDef>,
    {
        self.with_fields(name, TypeKind::Object, fields)
    }

    /// Add a type of any field-carrying kind
    pub fn with_fields<I>(mut self, name: &str, kind: TypeKind, fields: I) -> Self
    where
        I: IntoIterator<Item = FieldDef>,
    {
        let fields = fields.into_iter().map(|f| (f.name.clone(), f)).collect();
        self.schema.types.insert(
            name.to_string(),
            TypeDef::Structured(StructuredTypeDef {
                name: name.to_string(),
                kind,
                fields: Some(fields),
            }),
        );
        self
    }

    /// Add a directive without arguments
    pub fn directive(mut self, name: &str) -> Self {
        self.schema.directives.push(DirectiveDef {
            name: name.to_string(),
            args: Vec::new(),
            locations: Vec::new(),
        });
        self
    }

    pub fn build(self) -> Schema {
        self.schema
    }
}

impl FieldDef {
    /// Create a field with no arguments
    pub fn new(name: impl Into<String>, ty: TypeReference) -> Self {
        Self {
            name: name.into(),
            ty,
            args: Vec::new(),
            deprecation_reason: None,
        }
    }

    pub fn with_arg(mut self, name: impl Into<String>, ty: TypeReference) -> Self {
        self.args.push(ArgDef {
            name: name.into(),
            ty,
        });
        self
    }

    pub fn deprecated(mut self, reason: impl Into<String>) -> Self {
        self.deprecation_reason = Some(reason.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_of_wrapped_reference() {
        let ty = TypeReference::non_null(TypeReference::list(TypeReference::non_null(
            TypeReference::named("Character"),
        )));
        assert_eq!(ty.signature(), "[Character!]!");
        assert_eq!(ty.innermost_name(), "Character");
        assert_eq!(ty.to_string(), "[Character!]!");
    }

    #[test]
    fn test_enum_and_structured_partition() {
        let schema = Schema::builder()
            .enum_type("Episode", ["NEWHOPE", "EMPIRE"])
            .scalar("String")
            .object("Query", [FieldDef::new("hero", TypeReference::named("String"))])
            .build();

        let enums: Vec<&str> = schema.enum_types().iter().map(|e| e.name.as_str()).collect();
        let others: Vec<&str> = schema.structured_types().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(enums, vec!["Episode"]);
        assert_eq!(others, vec!["Query", "String"]);
        assert_eq!(schema.get_type("Episode").map(TypeDef::name), Some("Episode"));
    }

    #[test]
    fn test_serde_round_trip_preserves_model() {
        let schema = Schema::builder()
            .object(
                "Query",
                [FieldDef::new("human", TypeReference::named("Human"))
                    .with_arg("id", TypeReference::non_null(TypeReference::named("ID")))
                    .deprecated("use node")],
            )
            .directive("skip")
            .build();

        let json = serde_json::to_value(&schema).unwrap();
        let back: Schema = serde_json::from_value(json).unwrap();
        assert_eq!(back, schema);
    }
}
