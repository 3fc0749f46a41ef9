//! # Description Annotations
//!
//! Lifecycle hints that command authors embed in free-form argument descriptions.
//! All substring matching lives here so that structured metadata can replace it
//! without touching the parameter mapper.

const EXPERIMENTAL_MARKER: &str = "(experimental)";
const DEPRECATED_MARKER: &str = "(DEPRECATED)";
const REMOVED_PREFIX: &str = "Removed, ";

/// Flags derived from an argument description.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Annotations {
    /// The argument is experimental (`x-experimental`).
    pub experimental: bool,
    /// The argument is deprecated or already removed.
    pub deprecated: bool,
}

/// Classifies an argument description.
pub fn classify(description: &str) -> Annotations {
    Annotations {
        experimental: description.contains(EXPERIMENTAL_MARKER),
        deprecated: description.contains(DEPRECATED_MARKER)
            || description.starts_with(REMOVED_PREFIX),
    }
}
