//! # Error Handling
//!
//! Provides the unified `AppError` enum for failures that abort document generation.
//! Recoverable problems (odd argument types, unparseable examples, ...) are not errors;
//! they are reported through [`crate::diagnostics`] instead.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// JSON (de)serialization failure.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// YAML (de)serialization failure.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// The endpoint catalogue could not be loaded.
    #[from(ignore)]
    #[display("Catalogue Error: {_0}")]
    Catalogue(String),

    /// The generator configuration is invalid.
    #[from(ignore)]
    #[display("Config Error: {_0}")]
    Config(String),

    /// The same operation was registered twice for one path.
    #[from(ignore)]
    #[display("Duplicate operation: {method} {path}")]
    DuplicateOperation {
        /// HTTP verb of the clashing operation.
        method: String,
        /// Path the operation was registered under.
        path: String,
    },

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
