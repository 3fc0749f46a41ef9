#![deny(missing_docs)]

//! # Response Schema Inference
//!
//! Derives an OpenAPI schema from a placeholder-tagged example response.
//!
//! - Placeholder strings map through the closed tag table in [`crate::tags`].
//! - Sequences take their item schema from the first element.
//! - A mapping whose only key is `<string>` is a wildcard-keyed dictionary and becomes
//!   an `additionalProperties` object; any other mapping is a fixed-field object.
//!
//! Shapes that cannot be classified yield `None`; nested positions fall back to an
//! unconstrained schema so that one bad leaf does not lose the whole tree.

use crate::diagnostics::{Diagnostics, Warning};
use crate::example::ExampleValue;
use crate::tags::{PlaceholderTag, STRING_TAG};
use indexmap::IndexMap;
use serde_json::Value;
use utoipa::openapi::schema::{
    AdditionalProperties, ArrayBuilder, ObjectBuilder, Schema, SchemaType, Type,
};
use utoipa::openapi::RefOr;

/// A schema without a `type`: any value is accepted.
pub fn unconstrained() -> Schema {
    Schema::Object(ObjectBuilder::new().schema_type(SchemaType::AnyValue).build())
}

/// A bare schema of the given primitive type.
pub fn primitive(ty: Type) -> Schema {
    Schema::Object(ObjectBuilder::new().schema_type(ty).build())
}

/// Infers the schema of an example value.
///
/// Returns `None` ("no opinion") for unrecognized tags and non-string literals; a
/// warning is recorded in either case.
pub fn infer_schema(example: &ExampleValue, diagnostics: &mut Diagnostics) -> Option<Schema> {
    match example {
        ExampleValue::Scalar(Value::String(raw)) => infer_placeholder(raw, diagnostics),
        ExampleValue::Scalar(other) => {
            diagnostics.warn(Warning::UnclassifiableResponseShape {
                subject: format!("type of literal {}", other),
            });
            None
        }
        ExampleValue::Sequence(items) => Some(infer_sequence(items, diagnostics)),
        ExampleValue::Mapping(entries) => Some(infer_mapping(entries, diagnostics)),
    }
}

fn infer_placeholder(raw: &str, diagnostics: &mut Diagnostics) -> Option<Schema> {
    match PlaceholderTag::from(raw).schema_type() {
        Some(ty) => Some(primitive(ty)),
        None => {
            diagnostics.warn(Warning::UnrecognizedResponseTag {
                tag: raw.to_string(),
            });
            None
        }
    }
}

fn infer_sequence(items: &[ExampleValue], diagnostics: &mut Diagnostics) -> Schema {
    let item = items
        .first()
        .and_then(|first| infer_schema(first, diagnostics))
        .unwrap_or_else(|| {
            diagnostics.warn(Warning::UnclassifiableResponseShape {
                subject: "item type of array".to_string(),
            });
            unconstrained()
        });

    Schema::Array(ArrayBuilder::new().items(RefOr::T(item)).build())
}

fn infer_mapping(entries: &IndexMap<String, ExampleValue>, diagnostics: &mut Diagnostics) -> Schema {
    if entries.len() == 1 {
        if let Some(value) = entries.get(STRING_TAG) {
            let value_schema = infer_schema(value, diagnostics).unwrap_or_else(|| {
                diagnostics.warn(Warning::UnclassifiableResponseShape {
                    subject: "value type of object".to_string(),
                });
                unconstrained()
            });
            return Schema::Object(
                ObjectBuilder::new()
                    .schema_type(Type::Object)
                    .additional_properties(Some(AdditionalProperties::RefOr(RefOr::T(
                        value_schema,
                    ))))
                    .build(),
            );
        }
    }

    let mut object = ObjectBuilder::new().schema_type(Type::Object);
    for (key, value) in entries {
        let property = infer_schema(value, diagnostics).unwrap_or_else(unconstrained);
        object = object.property(key.as_str(), RefOr::T(property));
    }
    Schema::Object(object.build())
}
