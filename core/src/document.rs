#![deny(missing_docs)]

//! # OpenAPI Document
//!
//! Write-once assembly of the final document and its serialization.
//!
//! The tree is held as `utoipa` model types. Serialization goes through a
//! `serde_json::Value` so that the emitted `openapi` field names the 3.0 dialect the
//! generated content follows.

use crate::config::GeneratorConfig;
use crate::error::{AppError, AppResult};
use serde_json::Value;
use utoipa::openapi::path::{HttpMethod, Operation, PathItem};
use utoipa::openapi::{ExternalDocs, InfoBuilder, OpenApi, OpenApiBuilder};

/// OpenAPI version written into generated documents.
pub const OPENAPI_VERSION: &str = "3.0.3";

/// Accumulates operations into a document.
pub struct DocumentBuilder {
    openapi: OpenApi,
}

impl DocumentBuilder {
    /// Starts a document carrying the configured metadata.
    pub fn new(config: &GeneratorConfig) -> AppResult<Self> {
        config.validate()?;

        let info = InfoBuilder::new()
            .title(config.title.as_str())
            .version(config.version.as_str())
            .description(Some(config.description.as_str()))
            .build();
        let openapi = OpenApiBuilder::new()
            .info(info)
            .external_docs(Some(ExternalDocs::new(config.docs_url.as_str())))
            .build();

        Ok(Self { openapi })
    }

    /// Registers `operation` as the `POST` operation of `path`.
    ///
    /// Fails if the path already has a `POST` operation.
    pub fn register_post(&mut self, path: &str, operation: Operation) -> AppResult<()> {
        let paths = &mut self.openapi.paths.paths;
        match paths.get_mut(path) {
            Some(item) if item.post.is_some() => {
                return Err(AppError::DuplicateOperation {
                    method: "POST".to_string(),
                    path: path.to_string(),
                })
            }
            Some(item) => item.post = Some(operation),
            None => {
                paths.insert(path.to_string(), PathItem::new(HttpMethod::Post, operation));
            }
        }
        Ok(())
    }

    /// Finishes the document.
    pub fn build(self) -> Document {
        Document {
            openapi: self.openapi,
        }
    }
}

/// A generated OpenAPI document.
#[derive(Clone)]
pub struct Document {
    openapi: OpenApi,
}

impl Document {
    /// The underlying model.
    pub fn openapi(&self) -> &OpenApi {
        &self.openapi
    }

    /// `POST` operations keyed by path, in registration order.
    pub fn operations(&self) -> impl Iterator<Item = (&str, &Operation)> {
        self.openapi
            .paths
            .paths
            .iter()
            .filter_map(|(path, item)| item.post.as_ref().map(|op| (path.as_str(), op)))
    }

    /// The document as a JSON value.
    pub fn to_value(&self) -> AppResult<Value> {
        let mut value = serde_json::to_value(&self.openapi)?;
        if let Value::Object(root) = &mut value {
            root.insert(
                "openapi".to_string(),
                Value::String(OPENAPI_VERSION.to_string()),
            );
        }
        Ok(value)
    }

    /// The document as YAML text.
    pub fn to_yaml(&self) -> AppResult<String> {
        Ok(serde_yaml::to_string(&self.to_value()?)?)
    }

    /// The document as pretty-printed JSON text.
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_value()?)?)
    }
}
