#![deny(missing_docs)]

//! # Generator Configuration
//!
//! Document metadata and selection rules. Every field has a default matching the
//! Kubo RPC reference, so an empty configuration file is valid.

use crate::catalogue::{SourceFormat, Status};
use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use url::Url;

/// Default API title.
pub const DEFAULT_TITLE: &str = "IPFS RPC API";

/// Default API version.
pub const DEFAULT_VERSION: &str = "0.13.0";

/// Default reference documentation URL; endpoint anchors are appended as fragments.
pub const DEFAULT_DOCS_URL: &str = "https://docs.ipfs.tech/reference/kubo/rpc/";

/// Default prefix stripped from endpoint names to form operation ids.
pub const DEFAULT_PATH_PREFIX: &str = "/api/v0/";

/// Default API description.
pub const DEFAULT_DESCRIPTION: &str = "When a Kubo IPFS node is running as a daemon, it exposes an HTTP RPC API that allows you to control the node and run the same commands you can from the command line.

In many cases, using this RPC API is preferable to embedding IPFS directly in your program — it allows you to maintain peer connections that are longer lived than your app and you can keep a single IPFS node running instead of several if your app can be launched multiple times. In fact, the `ipfs` CLI commands use this RPC API when operating in online mode.";

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// `info.title`
    pub title: String,
    /// `info.version`
    pub version: String,
    /// `info.description`
    pub description: String,
    /// Top-level `externalDocs.url`, also the base of per-operation links.
    pub docs_url: String,
    /// Prefix removed from endpoint names to form operation ids.
    pub path_prefix: String,
    /// Statuses whose endpoints are emitted. Order here is irrelevant; documents
    /// always list Active, Experimental, Deprecated, Removed in that order.
    pub statuses: Vec<Status>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            version: DEFAULT_VERSION.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            docs_url: DEFAULT_DOCS_URL.to_string(),
            path_prefix: DEFAULT_PATH_PREFIX.to_string(),
            statuses: vec![Status::Active, Status::Experimental, Status::Deprecated],
        }
    }
}

impl GeneratorConfig {
    /// Parses a configuration document. Missing fields take their defaults.
    pub fn parse(text: &str, format: SourceFormat) -> AppResult<Self> {
        let config: Self = match format {
            SourceFormat::Json => serde_json::from_str(text)
                .map_err(|e| AppError::Config(format!("Failed to parse config JSON: {}", e)))?,
            SourceFormat::Yaml => serde_yaml::from_str(text)
                .map_err(|e| AppError::Config(format!("Failed to parse config YAML: {}", e)))?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that the metadata is usable.
    pub fn validate(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::Config("title must not be empty".to_string()));
        }
        if self.version.trim().is_empty() {
            return Err(AppError::Config("version must not be empty".to_string()));
        }
        self.docs_url()?;
        Ok(())
    }

    /// The parsed documentation URL.
    pub fn docs_url(&self) -> AppResult<Url> {
        Url::parse(&self.docs_url).map_err(|e| {
            AppError::Config(format!("Invalid docs_url '{}': {}", self.docs_url, e))
        })
    }

    /// Enables a status in addition to the configured ones.
    pub fn with_status(mut self, status: Status) -> Self {
        if !self.statuses.contains(&status) {
            self.statuses.push(status);
        }
        self
    }

    /// Enabled statuses in document order.
    pub fn enabled_statuses(&self) -> impl Iterator<Item = Status> + '_ {
        Status::ALL
            .into_iter()
            .filter(move |s| self.statuses.contains(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert!(config.validate().is_ok());
        let statuses: Vec<Status> = config.enabled_statuses().collect();
        assert_eq!(
            statuses,
            vec![Status::Active, Status::Experimental, Status::Deprecated]
        );
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "title: My RPC\nstatuses: [deprecated, active]\n";
        let config = GeneratorConfig::parse(yaml, SourceFormat::Yaml).unwrap();
        assert_eq!(config.title, "My RPC");
        assert_eq!(config.version, DEFAULT_VERSION);
        assert_eq!(config.path_prefix, DEFAULT_PATH_PREFIX);
        // Document order wins over configured order.
        let statuses: Vec<Status> = config.enabled_statuses().collect();
        assert_eq!(statuses, vec![Status::Active, Status::Deprecated]);
    }

    #[test]
    fn test_with_status_is_idempotent() {
        let config = GeneratorConfig::default()
            .with_status(Status::Removed)
            .with_status(Status::Removed);
        assert_eq!(config.statuses.len(), 4);
        assert_eq!(config.enabled_statuses().last(), Some(Status::Removed));
    }

    #[test]
    fn test_invalid_docs_url() {
        let json = r#"{"docs_url": "not a url"}"#;
        let err = GeneratorConfig::parse(json, SourceFormat::Json).unwrap_err();
        match err {
            AppError::Config(msg) => assert!(msg.contains("docs_url")),
            other => panic!("Expected config error, got {}", other),
        }
    }

    #[test]
    fn test_empty_title_rejected() {
        let config = GeneratorConfig {
            title: " ".into(),
            ..GeneratorConfig::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }
}
