//! GraphQL introspection documents and their conversion into the core model
//!
//! The serde types mirror the result of the standard introspection query.
//! Only what the comparison rules look at is kept when converting: enum
//! values, fields with their argument and deprecation data, input fields,
//! and directives. Descriptions, interfaces and possible types are decoded
//! but otherwise ignored.

use crate::loader::error::{LoaderError, LoaderResult};
use schemaver_core::{
    ArgDef, DirectiveDef, EnumTypeDef, EnumValueDef, FieldDef, Schema, StructuredTypeDef, TypeDef,
    TypeKind, TypeReference,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Reason GraphQL assumes when a field is deprecated without one
pub const DEFAULT_DEPRECATION_REASON: &str = "No longer supported";

/// Top-level introspection result, `data` envelope already removed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntrospectionDocument {
    #[serde(rename = "__schema")]
    pub schema: IntrospectionSchema,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionSchema {
    #[serde(default)]
    pub query_type: Option<NamedTypeRef>,
    #[serde(default)]
    pub mutation_type: Option<NamedTypeRef>,
    #[serde(default)]
    pub subscription_type: Option<NamedTypeRef>,
    pub types: Vec<FullType>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub directives: Vec<IntrospectionDirective>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedTypeRef {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntrospectionKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullType {
    pub kind: IntrospectionKind,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<IntrospectionField>>,
    #[serde(default)]
    pub input_fields: Option<Vec<InputValue>>,
    #[serde(default)]
    pub interfaces: Option<Vec<TypeRef>>,
    #[serde(default)]
    pub enum_values: Option<Vec<IntrospectionEnumValue>>,
    #[serde(default)]
    pub possible_types: Option<Vec<TypeRef>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionField {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub args: Vec<InputValue>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub is_deprecated: bool,
    #[serde(default)]
    pub deprecation_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputValue {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionEnumValue {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_deprecated: bool,
    #[serde(default)]
    pub deprecation_reason: Option<String>,
}

/// Possibly wrapped type reference as introspection spells it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    pub kind: IntrospectionKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub of_type: Option<Box<TypeRef>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionDirective {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub locations: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub args: Vec<InputValue>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl IntrospectionDocument {
    /// Decode a document from an already parsed JSON value
    pub fn from_value(value: serde_json::Value, path: &Path) -> LoaderResult<Self> {
        serde_json::from_value(value).map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }

    /// Convert into the comparison model.
    ///
    /// `path` only labels errors; malformed type references are reported
    /// at their JSON location, e.g. `$.__schema.types[4].fields[0].type.ofType`.
    pub fn into_schema(self, path: &Path) -> LoaderResult<Schema> {
        let mut types = BTreeMap::new();

        for (index, full_type) in self.schema.types.into_iter().enumerate() {
            let location = format!("$.__schema.types[{}]", index);
            let name = full_type.name.clone();
            let converted = convert_type(full_type, &location, path)?;

            if types.insert(name.clone(), converted).is_some() {
                return Err(LoaderError::validation_error(
                    path.to_path_buf(),
                    location,
                    format!("duplicate type name '{}'", name),
                ));
            }
        }

        let directives = self
            .schema
            .directives
            .into_iter()
            .enumerate()
            .map(|(index, directive)| {
                let location = format!("$.__schema.directives[{}]", index);
                Ok(DirectiveDef {
                    args: convert_args(directive.args, &location, path)?,
                    name: directive.name,
                    locations: directive.locations,
                })
            })
            .collect::<LoaderResult<Vec<_>>>()?;

        tracing::debug!(
            path = %path.display(),
            types = types.len(),
            directives = directives.len(),
            "converted introspection document"
        );

        Ok(Schema { types, directives })
    }
}

fn convert_type(full_type: FullType, location: &str, path: &Path) -> LoaderResult<TypeDef> {
    let kind = match full_type.kind {
        IntrospectionKind::Enum => {
            let values = full_type
                .enum_values
                .unwrap_or_default()
                .into_iter()
                .map(|value| EnumValueDef { name: value.name })
                .collect();
            return Ok(TypeDef::Enum(EnumTypeDef {
                name: full_type.name,
                values,
            }));
        }
        IntrospectionKind::Scalar => TypeKind::Scalar,
        IntrospectionKind::Object => TypeKind::Object,
        IntrospectionKind::Interface => TypeKind::Interface,
        IntrospectionKind::Union => TypeKind::Union,
        IntrospectionKind::InputObject => TypeKind::InputObject,
        IntrospectionKind::List | IntrospectionKind::NonNull => {
            return Err(LoaderError::validation_error(
                path.to_path_buf(),
                format!("{}.kind", location),
                "wrapper kinds cannot name a type",
            ));
        }
    };

    let fields = match kind {
        TypeKind::Object | TypeKind::Interface => {
            let fields = full_type.fields.unwrap_or_default();
            let mut map = BTreeMap::new();
            for (index, field) in fields.into_iter().enumerate() {
                let location = format!("{}.fields[{}]", location, index);
                let field = convert_field(field, &location, path)?;
                map.entry(field.name.clone()).or_insert(field);
            }
            Some(map)
        }
        TypeKind::InputObject => {
            let inputs = full_type.input_fields.unwrap_or_default();
            let mut map = BTreeMap::new();
            for (index, input) in inputs.into_iter().enumerate() {
                let location = format!("{}.inputFields[{}]", location, index);
                let ty = convert_type_ref(&input.ty, &format!("{}.type", location), path)?;
                map.entry(input.name.clone())
                    .or_insert_with(|| FieldDef::new(input.name, ty));
            }
            Some(map)
        }
        TypeKind::Scalar | TypeKind::Union => None,
    };

    Ok(TypeDef::Structured(StructuredTypeDef {
        name: full_type.name,
        kind,
        fields,
    }))
}

fn convert_field(field: IntrospectionField, location: &str, path: &Path) -> LoaderResult<FieldDef> {
    let ty = convert_type_ref(&field.ty, &format!("{}.type", location), path)?;
    let args = convert_args(field.args, location, path)?;

    let deprecation_reason = match (field.is_deprecated, field.deprecation_reason) {
        (_, Some(reason)) => Some(reason),
        (true, None) => Some(DEFAULT_DEPRECATION_REASON.to_string()),
        (false, None) => None,
    };

    Ok(FieldDef {
        name: field.name,
        ty,
        args,
        deprecation_reason,
    })
}

fn convert_args(args: Vec<InputValue>, location: &str, path: &Path) -> LoaderResult<Vec<ArgDef>> {
    args.into_iter()
        .enumerate()
        .map(|(index, arg)| {
            let ty = convert_type_ref(&arg.ty, &format!("{}.args[{}].type", location, index), path)?;
            Ok(ArgDef { name: arg.name, ty })
        })
        .collect()
}

fn convert_type_ref(type_ref: &TypeRef, location: &str, path: &Path) -> LoaderResult<TypeReference> {
    match type_ref.kind {
        IntrospectionKind::NonNull | IntrospectionKind::List => {
            let inner = type_ref.of_type.as_deref().ok_or_else(|| {
                LoaderError::validation_error(
                    path.to_path_buf(),
                    location,
                    "wrapper type reference is missing 'ofType'",
                )
            })?;
            let inner = convert_type_ref(inner, &format!("{}.ofType", location), path)?;
            Ok(if type_ref.kind == IntrospectionKind::NonNull {
                TypeReference::non_null(inner)
            } else {
                TypeReference::list(inner)
            })
        }
        _ => type_ref
            .name
            .as_deref()
            .map(TypeReference::named)
            .ok_or_else(|| {
                LoaderError::validation_error(
                    path.to_path_buf(),
                    location,
                    "named type reference is missing 'name'",
                )
            }),
    }
}
