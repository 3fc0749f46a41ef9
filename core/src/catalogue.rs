#![deny(missing_docs)]

//! # Command Catalogue
//!
//! Endpoint and argument descriptors consumed by the generator.
//!
//! The catalogue is a JSON or YAML sequence of endpoint records. It is read-only to
//! the rest of the crate: parameters, schemas and operations are synthesized from it
//! without ever mutating it.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::path::Path;

/// Response text marking an endpoint whose body is plain text rather than JSON.
pub const PLAIN_TEXT_RESPONSE: &str = "This endpoint returns a `text/plain` response body.";

/// Declared primitive type of an argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ArgumentType {
    /// `bool`
    Bool,
    /// `int`
    Int,
    /// `uint`
    Uint,
    /// `int64`
    Int64,
    /// `string`
    String,
    /// `array` (of strings)
    Array,
    /// `file`, carried in the request body.
    File,
    /// Any other declared type, kept verbatim.
    Other(String),
}

impl ArgumentType {
    /// The declared type name as it appears in the catalogue.
    pub fn as_str(&self) -> &str {
        match self {
            ArgumentType::Bool => "bool",
            ArgumentType::Int => "int",
            ArgumentType::Uint => "uint",
            ArgumentType::Int64 => "int64",
            ArgumentType::String => "string",
            ArgumentType::Array => "array",
            ArgumentType::File => "file",
            ArgumentType::Other(raw) => raw,
        }
    }
}

impl From<&str> for ArgumentType {
    fn from(raw: &str) -> Self {
        match raw {
            "bool" => ArgumentType::Bool,
            "int" => ArgumentType::Int,
            "uint" => ArgumentType::Uint,
            "int64" => ArgumentType::Int64,
            "string" => ArgumentType::String,
            "array" => ArgumentType::Array,
            "file" => ArgumentType::File,
            other => ArgumentType::Other(other.to_string()),
        }
    }
}

impl From<String> for ArgumentType {
    fn from(raw: String) -> Self {
        ArgumentType::from(raw.as_str())
    }
}

impl From<ArgumentType> for String {
    fn from(ty: ArgumentType) -> Self {
        ty.as_str().to_string()
    }
}

impl Display for ArgumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single input slot of an endpoint, positional or option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    /// Argument name.
    pub name: String,
    /// Declared primitive type.
    #[serde(rename = "type")]
    pub ty: ArgumentType,
    /// Default value as text, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Human readable description, possibly ending in an auto-generated default suffix.
    #[serde(default)]
    pub description: String,
    /// Whether the argument must be supplied.
    #[serde(default)]
    pub required: bool,
}

impl Argument {
    /// Creates an optional argument without default or description.
    pub fn new(name: impl Into<String>, ty: impl Into<ArgumentType>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            default: None,
            description: String::new(),
            required: false,
        }
    }

    /// Sets the default value text.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Marks the argument as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// True for arguments transported as request-body files.
    pub fn is_file(&self) -> bool {
        self.ty == ArgumentType::File
    }

    /// The default value, treating an empty string as absent.
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref().filter(|d| !d.is_empty())
    }
}

/// Lifecycle stage of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Stable command.
    #[default]
    #[serde(alias = "Active")]
    Active,
    /// Command subject to change.
    #[serde(alias = "Experimental")]
    Experimental,
    /// Command scheduled for removal.
    #[serde(alias = "Deprecated")]
    Deprecated,
    /// Command no longer served.
    #[serde(alias = "Removed")]
    Removed,
}

impl Status {
    /// All statuses in document order.
    pub const ALL: [Status; 4] = [
        Status::Active,
        Status::Experimental,
        Status::Deprecated,
        Status::Removed,
    ];
}

impl Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::Active => "active",
            Status::Experimental => "experimental",
            Status::Deprecated => "deprecated",
            Status::Removed => "removed",
        };
        write!(f, "{}", label)
    }
}

/// One RPC command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Path-like command name, e.g. `/api/v0/files/cp`.
    pub name: String,
    /// Command description.
    #[serde(default)]
    pub description: String,
    /// Positional arguments, in order.
    #[serde(default)]
    pub arguments: Vec<Argument>,
    /// Named options, in order.
    #[serde(default)]
    pub options: Vec<Argument>,
    /// Raw example response: JSON text, [`PLAIN_TEXT_RESPONSE`], or empty.
    #[serde(default)]
    pub response: String,
    /// Lifecycle stage.
    #[serde(default)]
    pub status: Status,
}

impl Endpoint {
    /// Creates an active endpoint with no arguments and no response.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            arguments: Vec::new(),
            options: Vec::new(),
            response: String::new(),
            status: Status::Active,
        }
    }
}

/// Endpoints of the catalogue with the given status, in catalogue order.
pub fn in_status(endpoints: &[Endpoint], status: Status) -> impl Iterator<Item = &Endpoint> {
    endpoints.iter().filter(move |e| e.status == status)
}

/// Text format of catalogue and configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// JSON text.
    Json,
    /// YAML text.
    Yaml,
}

impl SourceFormat {
    /// Guesses the format from a file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => SourceFormat::Yaml,
            _ => SourceFormat::Json,
        }
    }
}

/// Parses a catalogue document into endpoint records.
pub fn parse_catalogue(text: &str, format: SourceFormat) -> AppResult<Vec<Endpoint>> {
    match format {
        SourceFormat::Json => serde_json::from_str(text)
            .map_err(|e| AppError::Catalogue(format!("Failed to parse catalogue JSON: {}", e))),
        SourceFormat::Yaml => serde_yaml::from_str(text)
            .map_err(|e| AppError::Catalogue(format!("Failed to parse catalogue YAML: {}", e))),
    }
}
