#![deny(missing_docs)]

//! # Parameter Mapping
//!
//! Turns catalogue arguments into OpenAPI query parameters.
//!
//! A lone positional argument becomes a parameter aliased to `arg`. Several positional
//! arguments are merged into one exploded array parameter named `arg` whose length is
//! pinned to the number of arguments. Options always map one-to-one under their own
//! names. File arguments never become parameters; they travel in the request body.

use crate::annotations::{self, Annotations};
use crate::catalogue::{Argument, ArgumentType};
use crate::diagnostics::{Diagnostics, Warning};
use crate::inference::primitive;
use serde_json::Value;
use utoipa::openapi::extensions::{Extensions, ExtensionsBuilder};
use utoipa::openapi::path::{Parameter, ParameterBuilder, ParameterIn};
use utoipa::openapi::schema::{ArrayBuilder, ObjectBuilder, Schema, Type};
use utoipa::openapi::{Deprecated, RefOr, Required};

/// Name shared by positional arguments.
pub const POSITIONAL_ALIAS: &str = "arg";

/// Vendor extension flagging experimental parameters.
pub const EXPERIMENTAL_EXTENSION: &str = "x-experimental";

/// An argument resolved against the type table, before it is turned into a parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedArgument {
    /// Original argument name.
    pub name: String,
    /// Description with the default-value suffix removed.
    pub description: String,
    /// OpenAPI type of the argument.
    pub schema_type: Type,
    /// Parsed default value.
    pub default: Option<Value>,
    /// Whether the argument is required.
    pub required: bool,
    /// Lifecycle hints from the description.
    pub annotations: Annotations,
}

/// Maps the declared argument type to an OpenAPI type.
///
/// Returns `None` for file arguments. Unsupported types fall back to `string`.
pub fn schema_type_for(arg: &Argument, diagnostics: &mut Diagnostics) -> Option<Type> {
    match &arg.ty {
        ArgumentType::Bool => Some(Type::Boolean),
        ArgumentType::Int | ArgumentType::Uint | ArgumentType::Int64 => Some(Type::Integer),
        ArgumentType::String => Some(Type::String),
        ArgumentType::Array => Some(Type::Array),
        ArgumentType::File => None,
        ArgumentType::Other(declared) => {
            diagnostics.warn(Warning::UnsupportedArgumentType {
                argument: arg.name.clone(),
                declared: declared.clone(),
            });
            Some(Type::String)
        }
    }
}

/// Resolves an argument's type, default and description. `None` for file arguments.
pub fn map_argument(arg: &Argument, diagnostics: &mut Diagnostics) -> Option<MappedArgument> {
    let schema_type = schema_type_for(arg, diagnostics)?;
    let default = arg
        .default_value()
        .map(|raw| parse_default(arg, raw, &schema_type, diagnostics));

    Some(MappedArgument {
        name: arg.name.clone(),
        description: strip_default_suffix(arg).to_string(),
        schema_type,
        default,
        required: arg.required,
        annotations: annotations::classify(&arg.description),
    })
}

/// Parses a default value as the argument's schema type.
///
/// Booleans and 32-bit integers are parsed; other types keep the text. On failure the
/// raw text is kept and a warning is recorded.
pub fn parse_default(
    arg: &Argument,
    raw: &str,
    schema_type: &Type,
    diagnostics: &mut Diagnostics,
) -> Value {
    let parsed = match schema_type {
        Type::Boolean => parse_bool(raw).map(Value::Bool),
        Type::Integer => raw.parse::<i32>().ok().map(Value::from),
        _ => Some(Value::String(raw.to_string())),
    };

    parsed.unwrap_or_else(|| {
        diagnostics.warn(Warning::UnparseableDefault {
            argument: arg.name.clone(),
            value: raw.to_string(),
        });
        Value::String(raw.to_string())
    })
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Removes the generated `" Default: <value>."` suffix from the description.
pub fn strip_default_suffix(arg: &Argument) -> &str {
    let suffix = format!(" Default: {}.", arg.default.as_deref().unwrap_or_default());
    arg.description
        .strip_suffix(suffix.as_str())
        .unwrap_or(&arg.description)
}

fn argument_schema(schema_type: &Type, default: Option<Value>) -> Schema {
    match schema_type {
        Type::Array => Schema::Array(
            ArrayBuilder::new()
                .items(RefOr::T(primitive(Type::String)))
                .default(default)
                .build(),
        ),
        other => Schema::Object(
            ObjectBuilder::new()
                .schema_type(other.clone())
                .default(default)
                .build(),
        ),
    }
}

fn experimental_extension() -> Extensions {
    ExtensionsBuilder::new()
        .add(EXPERIMENTAL_EXTENSION, true)
        .build()
}

fn required_flag(required: bool) -> Required {
    if required {
        Required::True
    } else {
        Required::False
    }
}

/// Builds the query parameter for a single argument.
///
/// With `alias_to_positional` the parameter is named [`POSITIONAL_ALIAS`] instead of
/// the argument name. Returns `None` for file arguments.
pub fn parameter_for_argument(
    arg: &Argument,
    alias_to_positional: bool,
    diagnostics: &mut Diagnostics,
) -> Option<Parameter> {
    let mapped = map_argument(arg, diagnostics)?;
    let name = if alias_to_positional {
        POSITIONAL_ALIAS
    } else {
        mapped.name.as_str()
    };

    let mut builder = ParameterBuilder::new()
        .name(name)
        .parameter_in(ParameterIn::Query)
        .description(Some(mapped.description.as_str()))
        .required(required_flag(mapped.required))
        .schema(Some(RefOr::T(argument_schema(
            &mapped.schema_type,
            mapped.default.clone(),
        ))));

    if mapped.annotations.deprecated {
        builder = builder.deprecated(Some(Deprecated::True));
    }
    if mapped.annotations.experimental {
        builder = builder.extensions(Some(experimental_extension()));
    }

    Some(builder.build())
}

/// Merges several positional arguments into one exploded array parameter.
///
/// The array holds exactly one string slot per mapped argument. Defaults are carried
/// positionally (with `null` for slots without one) as soon as any argument has a
/// default. The parameter is deprecated if any argument is. File arguments are skipped.
pub fn parameter_for_positional_arguments(
    args: &[&Argument],
    diagnostics: &mut Diagnostics,
) -> Parameter {
    let mapped: Vec<MappedArgument> = args
        .iter()
        .filter_map(|arg| map_argument(arg, diagnostics))
        .collect();

    let description = mapped
        .iter()
        .enumerate()
        .map(|(i, m)| format!("arg{} ({}): {}", i, m.name, m.description.trim()))
        .collect::<Vec<_>>()
        .join("\n");
    let deprecated = mapped.iter().any(|m| m.annotations.deprecated);
    // The group takes the required flag of its last argument only.
    let required = mapped.last().is_some_and(|m| m.required);

    let count = mapped.len();
    let mut schema = ArrayBuilder::new()
        .items(RefOr::T(primitive(Type::String)))
        .min_items(Some(count))
        .max_items(Some(count));
    if mapped.iter().any(|m| m.default.is_some()) {
        let defaults = mapped
            .iter()
            .map(|m| m.default.clone().unwrap_or(Value::Null))
            .collect();
        schema = schema.default(Some(Value::Array(defaults)));
    }

    let mut builder = ParameterBuilder::new()
        .name(POSITIONAL_ALIAS)
        .parameter_in(ParameterIn::Query)
        .description(Some(description))
        .required(required_flag(required))
        .schema(Some(RefOr::T(Schema::Array(schema.build()))))
        .explode(Some(true));
    if deprecated {
        builder = builder.deprecated(Some(Deprecated::True));
    }
    builder.build()
}
