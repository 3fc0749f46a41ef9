//! # Example Values
//!
//! The typed view of a parsed example response, and the reverse direction: rendering
//! a schema back into placeholder-tagged example data.

use crate::tags::{PlaceholderTag, STRING_TAG};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use utoipa::openapi::schema::{AdditionalProperties, ArrayItems, Object, Schema, SchemaType};
use utoipa::openapi::RefOr;

/// A parsed example response.
#[derive(Debug, Clone, PartialEq)]
pub enum ExampleValue {
    /// A leaf: a placeholder string or any other JSON literal.
    Scalar(Value),
    /// An ordered, assumed homogeneous, sequence.
    Sequence(Vec<ExampleValue>),
    /// A mapping, in document order.
    Mapping(IndexMap<String, ExampleValue>),
}

impl From<Value> for ExampleValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => {
                ExampleValue::Sequence(items.into_iter().map(ExampleValue::from).collect())
            }
            Value::Object(entries) => ExampleValue::Mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, ExampleValue::from(v)))
                    .collect(),
            ),
            scalar => ExampleValue::Scalar(scalar),
        }
    }
}

impl ExampleValue {
    /// Parses example JSON text.
    pub fn parse(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Value>(text).map(ExampleValue::from)
    }
}

/// Renders `schema` as placeholder-tagged example data.
///
/// Unconstrained schemas (and references) render as `null`, arrays as a one element
/// sequence (or empty when the item schema is unconstrained), wildcard maps as
/// `{"<string>": ...}`.
pub fn placeholder_example(schema: &Schema) -> Value {
    match schema {
        Schema::Array(array) => match &array.items {
            ArrayItems::RefOrSchema(item) => match &**item {
                RefOr::T(inner) if !is_unconstrained(inner) => {
                    Value::Array(vec![placeholder_example(inner)])
                }
                _ => Value::Array(Vec::new()),
            },
            _ => Value::Array(Vec::new()),
        },
        Schema::Object(object) => object_example(object),
        _ => Value::Null,
    }
}

fn object_example(object: &Object) -> Value {
    if let Some(additional) = object.additional_properties.as_deref() {
        let value = match additional {
            AdditionalProperties::RefOr(RefOr::T(inner)) => placeholder_example(inner),
            _ => Value::Null,
        };
        let mut map = Map::new();
        map.insert(STRING_TAG.to_string(), value);
        return Value::Object(map);
    }

    if !object.properties.is_empty() {
        let map = object
            .properties
            .iter()
            .map(|(name, property)| {
                let value = match property {
                    RefOr::T(inner) => placeholder_example(inner),
                    RefOr::Ref(_) => Value::Null,
                };
                (name.clone(), value)
            })
            .collect::<Map<String, Value>>();
        return Value::Object(map);
    }

    match &object.schema_type {
        SchemaType::Type(ty) => PlaceholderTag::canonical_for(ty)
            .map(|tag| Value::String(tag.to_string()))
            .unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

/// True for a schema that places no constraint on its value.
pub fn is_unconstrained(schema: &Schema) -> bool {
    match schema {
        Schema::Object(object) => {
            object.schema_type == SchemaType::AnyValue
                && object.properties.is_empty()
                && object.additional_properties.is_none()
        }
        _ => false,
    }
}
