//! # Diagnostics
//!
//! Non-fatal findings raised while synthesizing parameters and schemas.
//!
//! Every warning degrades the output locally (a `string` fallback type, a raw default,
//! a missing schema or response) and never aborts generation. Warnings are logged via
//! `tracing` as they happen and kept in a [`Diagnostics`] sink for callers to inspect.

use derive_more::Display;

/// A recoverable problem found in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Warning {
    /// An argument declares a type outside the supported table; `string` is used.
    #[display("Unsupported type for argument '{argument}': {declared}")]
    UnsupportedArgumentType {
        /// Argument name.
        argument: String,
        /// The declared type, verbatim.
        declared: String,
    },

    /// A default value does not parse as the argument's schema type; the raw text is kept.
    #[display("Couldn't parse default value '{value}' for '{argument}'")]
    UnparseableDefault {
        /// Argument name.
        argument: String,
        /// The raw default text.
        value: String,
    },

    /// A placeholder string in an example response is not a known type tag.
    #[display("Unsupported type for response: {tag}")]
    UnrecognizedResponseTag {
        /// The unrecognized placeholder.
        tag: String,
    },

    /// Part of an example response has no classifiable shape.
    #[display("Couldn't determine {subject}")]
    UnclassifiableResponseShape {
        /// What could not be determined, e.g. "item type of array".
        subject: String,
    },

    /// The example response of an endpoint is not valid JSON.
    #[display("Couldn't parse JSON for response of {endpoint}: {reason}")]
    MalformedResponseJson {
        /// Endpoint path.
        endpoint: String,
        /// Parser error message.
        reason: String,
    },
}

/// Collects warnings emitted during a generation run.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs and records a warning.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// Warnings recorded so far, in emission order.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Number of recorded warnings.
    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    /// True when nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Consumes the sink, returning the recorded warnings.
    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}
