#![deny(missing_docs)]

//! # RPC OpenAPI Core
//!
//! Synthesizes an OpenAPI 3.0 document from a catalogue of RPC command descriptors.
//!
//! Arguments become query parameters (several positional arguments merge into one
//! array parameter), file arguments become a multipart request body, and response
//! schemas are inferred from placeholder-tagged example responses.

/// Shared error types.
pub mod error;

/// Non-fatal warnings.
pub mod diagnostics;

/// Endpoint and argument descriptors.
pub mod catalogue;

/// Generator configuration.
pub mod config;

/// Description-text annotations.
pub mod annotations;

/// Argument -> parameter mapping.
pub mod params;

/// Placeholder tag lookup table.
pub mod tags;

/// Example response values.
pub mod example;

/// Example -> schema inference.
pub mod inference;

/// Request body Markdown rendering.
pub mod markdown;

/// Document assembly and serialization.
pub mod document;

/// Endpoint -> operation assembly.
pub mod assembler;

pub use assembler::Generator;
pub use catalogue::{parse_catalogue, Argument, ArgumentType, Endpoint, SourceFormat, Status};
pub use config::GeneratorConfig;
pub use diagnostics::{Diagnostics, Warning};
pub use document::{Document, DocumentBuilder};
pub use error::{AppError, AppResult};
pub use example::ExampleValue;
pub use inference::infer_schema;
pub use markdown::{BodyFormatter, MarkdownFormatter};
