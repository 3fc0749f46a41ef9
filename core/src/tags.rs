//! # Placeholder Tags
//!
//! Example responses use string literals such as `"<bool>"` to say "a value of this
//! type goes here". This module is the closed table from those tags to OpenAPI types.

use utoipa::openapi::schema::Type;

/// The string placeholder; as the sole key of a mapping it marks a wildcard-keyed map.
pub const STRING_TAG: &str = "<string>";

/// Every placeholder the lookup table recognizes.
pub const KNOWN_TAGS: &[&str] = &[
    "<bool>",
    "<int>",
    "<uint>",
    "<int32>",
    "<uint32>",
    "<int64>",
    "<uint64>",
    "<duration-ns>",
    "<timestamp>",
    "<float32>",
    "<float64>",
    "<string>",
    "<peer-id>",
    "peer-id",
    "<cid-string>",
    "<multiaddr-string>",
    "<array>",
    "<object>",
];

/// A parsed placeholder tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlaceholderTag {
    /// `<bool>`
    Bool,
    /// `<int>`
    Int,
    /// `<uint>`
    Uint,
    /// `<int32>`
    Int32,
    /// `<uint32>`
    Uint32,
    /// `<int64>`
    Int64,
    /// `<uint64>`
    Uint64,
    /// `<duration-ns>`, nanoseconds.
    DurationNs,
    /// `<timestamp>`
    Timestamp,
    /// `<float32>`
    Float32,
    /// `<float64>`
    Float64,
    /// `<string>`
    String,
    /// `<peer-id>` or the bare `peer-id`.
    PeerId,
    /// `<cid-string>`
    CidString,
    /// `<multiaddr-string>`
    MultiaddrString,
    /// `<array>`
    Array,
    /// `<object>`
    Object,
    /// Anything else, kept verbatim.
    Unknown(String),
}

impl From<&str> for PlaceholderTag {
    fn from(raw: &str) -> Self {
        match raw {
            "<bool>" => PlaceholderTag::Bool,
            "<int>" => PlaceholderTag::Int,
            "<uint>" => PlaceholderTag::Uint,
            "<int32>" => PlaceholderTag::Int32,
            "<uint32>" => PlaceholderTag::Uint32,
            "<int64>" => PlaceholderTag::Int64,
            "<uint64>" => PlaceholderTag::Uint64,
            "<duration-ns>" => PlaceholderTag::DurationNs,
            "<timestamp>" => PlaceholderTag::Timestamp,
            "<float32>" => PlaceholderTag::Float32,
            "<float64>" => PlaceholderTag::Float64,
            STRING_TAG => PlaceholderTag::String,
            "<peer-id>" | "peer-id" => PlaceholderTag::PeerId,
            "<cid-string>" => PlaceholderTag::CidString,
            "<multiaddr-string>" => PlaceholderTag::MultiaddrString,
            "<array>" => PlaceholderTag::Array,
            "<object>" => PlaceholderTag::Object,
            other => PlaceholderTag::Unknown(other.to_string()),
        }
    }
}

impl PlaceholderTag {
    /// The OpenAPI primitive type the tag stands for, `None` for unknown tags.
    pub fn schema_type(&self) -> Option<Type> {
        let ty = match self {
            PlaceholderTag::Bool => Type::Boolean,
            PlaceholderTag::Int
            | PlaceholderTag::Uint
            | PlaceholderTag::Int32
            | PlaceholderTag::Uint32
            | PlaceholderTag::Int64
            | PlaceholderTag::Uint64
            | PlaceholderTag::DurationNs
            | PlaceholderTag::Timestamp => Type::Integer,
            PlaceholderTag::Float32 | PlaceholderTag::Float64 => Type::Number,
            PlaceholderTag::String
            | PlaceholderTag::PeerId
            | PlaceholderTag::CidString
            | PlaceholderTag::MultiaddrString => Type::String,
            PlaceholderTag::Array => Type::Array,
            PlaceholderTag::Object => Type::Object,
            PlaceholderTag::Unknown(_) => return None,
        };
        Some(ty)
    }

    /// Canonical placeholder written back when rendering an example for `ty`.
    pub fn canonical_for(ty: &Type) -> Option<&'static str> {
        match ty {
            Type::Boolean => Some("<bool>"),
            Type::Integer => Some("<int64>"),
            Type::Number => Some("<float64>"),
            Type::String => Some(STRING_TAG),
            Type::Array => Some("<array>"),
            Type::Object => Some("<object>"),
            _ => None,
        }
    }
}
