#![deny(missing_docs)]

//! # Endpoint Assembly
//!
//! Builds one OpenAPI operation per catalogue endpoint and folds them into a document.
//!
//! Endpoints are emitted grouped by status (Active, Experimental, Deprecated, Removed),
//! skipping statuses the configuration does not enable, and in catalogue order within a
//! group. Every operation is registered under `POST`.

use crate::catalogue::{in_status, Argument, Endpoint, PLAIN_TEXT_RESPONSE};
use crate::config::GeneratorConfig;
use crate::diagnostics::{Diagnostics, Warning};
use crate::document::{Document, DocumentBuilder};
use crate::error::AppResult;
use crate::example::ExampleValue;
use crate::inference::infer_schema;
use crate::markdown::{BodyFormatter, MarkdownFormatter, REQUEST_BODY_HEADING};
use crate::params::{parameter_for_argument, parameter_for_positional_arguments};
use serde_json::Value;
use url::Url;
use utoipa::openapi::path::{Operation, OperationBuilder, Parameter};
use utoipa::openapi::request_body::{RequestBody, RequestBodyBuilder};
use utoipa::openapi::response::{Response, ResponseBuilder};
use utoipa::openapi::schema::{ArrayBuilder, ObjectBuilder, Schema, SchemaFormat, Type};
use utoipa::openapi::{ContentBuilder, ExternalDocs, RefOr, Required};

/// Description shared by all generated `200` responses.
pub const SUCCESS_DESCRIPTION: &str = "Successful response";

/// Media type of file uploads.
pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// Turns endpoint catalogues into documents.
pub struct Generator<F = MarkdownFormatter> {
    config: GeneratorConfig,
    formatter: F,
}

impl Generator<MarkdownFormatter> {
    /// Creates a generator using the Markdown request body formatter.
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_formatter(config, MarkdownFormatter)
    }
}

impl<F: BodyFormatter> Generator<F> {
    /// Creates a generator with a custom request body formatter.
    pub fn with_formatter(config: GeneratorConfig, formatter: F) -> Self {
        Self { config, formatter }
    }

    /// The active configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Builds the document for `endpoints`.
    ///
    /// Recoverable problems are recorded in `diagnostics`. A duplicate path aborts the
    /// whole run.
    pub fn generate(
        &self,
        endpoints: &[Endpoint],
        diagnostics: &mut Diagnostics,
    ) -> AppResult<Document> {
        let mut builder = DocumentBuilder::new(&self.config)?;
        let docs_url = self.config.docs_url()?;

        for status in self.config.enabled_statuses() {
            for endpoint in in_status(endpoints, status) {
                let operation = self.build_operation(endpoint, &docs_url, diagnostics);
                builder.register_post(&endpoint.name, operation)?;
            }
        }

        Ok(builder.build())
    }

    /// Builds the operation of a single endpoint.
    pub fn build_operation(
        &self,
        endpoint: &Endpoint,
        docs_url: &Url,
        diagnostics: &mut Diagnostics,
    ) -> Operation {
        let _span = tracing::debug_span!("endpoint", name = %endpoint.name).entered();
        tracing::debug!(status = %endpoint.status, "building operation");

        let mut anchor_url = docs_url.clone();
        anchor_url.set_fragment(Some(&docs_anchor(&endpoint.name)));

        let mut builder = OperationBuilder::new()
            .operation_id(Some(operation_id(&endpoint.name, &self.config.path_prefix)))
            .description(Some(endpoint.description.as_str()));

        for parameter in query_parameters(endpoint, diagnostics) {
            builder = builder.parameter(parameter);
        }

        let body_args: Vec<&Argument> = endpoint
            .arguments
            .iter()
            .filter(|a| a.is_file())
            .collect();
        if let Some(body) = request_body(&body_args, &self.formatter) {
            builder = builder.request_body(Some(body));
        }

        if let Some(response) = response_for(endpoint, diagnostics) {
            builder = builder.response("200", RefOr::T(response));
        }

        let mut operation = builder.build();
        operation.external_docs = Some(ExternalDocs::new(anchor_url.as_str()));
        operation
    }
}

/// Operation id: the endpoint name without `prefix`.
pub fn operation_id<'a>(name: &'a str, prefix: &str) -> &'a str {
    name.strip_prefix(prefix).unwrap_or(name)
}

/// Reference docs anchor: `/api/v0/files/cp` becomes `api-v0-files-cp`.
pub fn docs_anchor(name: &str) -> String {
    name.strip_prefix('/').unwrap_or(name).replace('/', "-")
}

/// Query parameters of an endpoint: positional arguments first, then one per option.
pub fn query_parameters(endpoint: &Endpoint, diagnostics: &mut Diagnostics) -> Vec<Parameter> {
    let positional: Vec<&Argument> = endpoint
        .arguments
        .iter()
        .filter(|a| !a.is_file())
        .collect();

    let mut parameters = Vec::new();
    if positional.len() > 1 {
        parameters.push(parameter_for_positional_arguments(&positional, diagnostics));
    } else {
        parameters.extend(
            positional
                .iter()
                .filter_map(|arg| parameter_for_argument(arg, true, diagnostics)),
        );
    }
    parameters.extend(
        endpoint
            .options
            .iter()
            .filter_map(|opt| parameter_for_argument(opt, false, diagnostics)),
    );
    parameters
}

/// The `multipart/form-data` body for file arguments, `None` without any.
///
/// Only the first file argument names a form field.
pub fn request_body<F: BodyFormatter>(
    body_args: &[&Argument],
    formatter: &F,
) -> Option<RequestBody> {
    let first = body_args.first()?;

    let block = formatter.body_block(body_args);
    let block = block.trim();
    let description = block.strip_prefix(REQUEST_BODY_HEADING).unwrap_or(block);

    let binary = ObjectBuilder::new()
        .schema_type(Type::String)
        .format(Some(SchemaFormat::Custom("binary".to_string())))
        .build();
    let files = ArrayBuilder::new()
        .items(RefOr::T(Schema::Object(binary)))
        .build();
    let form = ObjectBuilder::new()
        .schema_type(Type::Object)
        .property(first.name.as_str(), RefOr::T(Schema::Array(files)))
        .build();

    let mut builder = RequestBodyBuilder::new()
        .description(Some(description))
        .content(
            MULTIPART_FORM_DATA,
            ContentBuilder::new()
                .schema(Some(RefOr::T(Schema::Object(form))))
                .build(),
        );
    if body_args.iter().any(|a| a.required) {
        builder = builder.required(Some(Required::True));
    }
    Some(builder.build())
}

/// The `200` response of an endpoint.
///
/// `None` for an empty response text and for example JSON that fails to parse.
pub fn response_for(endpoint: &Endpoint, diagnostics: &mut Diagnostics) -> Option<Response> {
    match endpoint.response.as_str() {
        "" => None,
        PLAIN_TEXT_RESPONSE => Some(
            ResponseBuilder::new()
                .description(SUCCESS_DESCRIPTION)
                .content("text/plain", ContentBuilder::new().build())
                .build(),
        ),
        raw => {
            let example: Value = match serde_json::from_str(raw) {
                Ok(value) => value,
                Err(e) => {
                    diagnostics.warn(Warning::MalformedResponseJson {
                        endpoint: endpoint.name.clone(),
                        reason: e.to_string(),
                    });
                    return None;
                }
            };

            let schema = infer_schema(&ExampleValue::from(example.clone()), diagnostics);
            let mut content = ContentBuilder::new().example(Some(example));
            if let Some(schema) = schema {
                content = content.schema(Some(RefOr::T(schema)));
            }

            Some(
                ResponseBuilder::new()
                    .description(SUCCESS_DESCRIPTION)
                    .content("application/json", content.build())
                    .build(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::Status;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn endpoint(name: &str, status: Status) -> Endpoint {
        let mut e = Endpoint::new(name);
        e.status = status;
        e
    }

    fn docs_url() -> Url {
        GeneratorConfig::default().docs_url().unwrap()
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(operation_id("/api/v0/files/cp", "/api/v0/"), "files/cp");
        assert_eq!(operation_id("/other/cmd", "/api/v0/"), "/other/cmd");
        assert_eq!(docs_anchor("/api/v0/files/cp"), "api-v0-files-cp");
    }

    #[test]
    fn test_operation_metadata() {
        let generator = Generator::new(GeneratorConfig::default());
        let mut e = endpoint("/api/v0/files/cp", Status::Active);
        e.description = "Copy files.".into();
        let mut diagnostics = Diagnostics::new();

        let op = generator.build_operation(&e, &docs_url(), &mut diagnostics);
        assert_eq!(op.operation_id.as_deref(), Some("files/cp"));
        assert_eq!(op.description.as_deref(), Some("Copy files."));
        assert_eq!(
            op.external_docs.unwrap().url,
            "https://docs.ipfs.tech/reference/kubo/rpc/#api-v0-files-cp"
        );
    }

    #[test]
    fn test_single_argument_is_aliased() {
        let mut e = endpoint("/api/v0/cat", Status::Active);
        e.arguments = vec![Argument::new("ipfs-path", "string").required()];
        e.options = vec![Argument::new("offset", "int64")];
        let mut diagnostics = Diagnostics::new();

        let params = query_parameters(&e, &mut diagnostics);
        let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["arg", "offset"]);
    }

    #[test]
    fn test_multiple_arguments_are_merged_options_are_not() {
        let mut e = endpoint("/api/v0/files/cp", Status::Active);
        e.arguments = vec![
            Argument::new("source", "string").required(),
            Argument::new("dest", "string").required(),
        ];
        e.options = vec![
            Argument::new("parents", "bool"),
            Argument::new("flush", "bool"),
        ];
        let mut diagnostics = Diagnostics::new();

        let params = query_parameters(&e, &mut diagnostics);
        let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["arg", "parents", "flush"]);
        assert_eq!(params[0].explode, Some(true));
    }

    #[test]
    fn test_file_arguments_go_to_body() {
        let generator = Generator::new(GeneratorConfig::default());
        let mut e = endpoint("/api/v0/add", Status::Active);
        e.arguments = vec![Argument::new("path", "file").required()];
        e.options = vec![Argument::new("quiet", "bool")];
        let mut diagnostics = Diagnostics::new();

        let op = generator.build_operation(&e, &docs_url(), &mut diagnostics);
        let params = op.parameters.as_ref().unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "quiet");

        let body = op.request_body.unwrap();
        assert_eq!(body.required, Some(Required::True));
        let description = body.description.clone().unwrap();
        assert!(description.starts_with("Argument `path` is of file type."));
        assert!(!description.ends_with('\n'));

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value["content"][MULTIPART_FORM_DATA]["schema"],
            json!({
                "type": "object",
                "properties": {
                    "path": {
                        "type": "array",
                        "items": {"type": "string", "format": "binary"}
                    }
                }
            })
        );
    }

    #[test]
    fn test_optional_file_body_is_not_required() {
        let file = Argument::new("data", "file");
        let body = request_body(&[&file], &MarkdownFormatter).unwrap();
        assert!(body.required.is_none());
        assert!(request_body(&[], &MarkdownFormatter).is_none());
    }

    struct FixedFormatter;

    impl BodyFormatter for FixedFormatter {
        fn body_block(&self, _args: &[&Argument]) -> String {
            "### Request Body\n\nUpload things.\n\n".to_string()
        }
    }

    #[test]
    fn test_custom_formatter_heading_stripped() {
        let file = Argument::new("data", "file");
        let body = request_body(&[&file], &FixedFormatter).unwrap();
        assert_eq!(body.description.as_deref(), Some("Upload things."));
    }

    #[test]
    fn test_plain_text_response() {
        let mut e = endpoint("/api/v0/cat", Status::Active);
        e.response = PLAIN_TEXT_RESPONSE.to_string();
        let mut diagnostics = Diagnostics::new();

        let response = response_for(&e, &mut diagnostics).unwrap();
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["description"], json!(SUCCESS_DESCRIPTION));
        assert!(value["content"]["text/plain"].get("schema").is_none());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_empty_response_has_no_response_object() {
        let e = endpoint("/api/v0/shutdown", Status::Active);
        let mut diagnostics = Diagnostics::new();
        assert!(response_for(&e, &mut diagnostics).is_none());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_malformed_response_is_dropped_with_warning() {
        let mut e = endpoint("/api/v0/broken", Status::Active);
        e.response = "{\"Key\": ".to_string();
        let mut diagnostics = Diagnostics::new();

        assert!(response_for(&e, &mut diagnostics).is_none());
        assert!(matches!(
            diagnostics.warnings()[0],
            Warning::MalformedResponseJson { ref endpoint, .. } if endpoint == "/api/v0/broken"
        ));
    }

    #[test]
    fn test_json_response_has_example_and_schema() {
        let mut e = endpoint("/api/v0/pin/ls", Status::Active);
        e.response = r#"{"Keys": {"<string>": {"Type": "<string>"}}}"#.to_string();
        let mut diagnostics = Diagnostics::new();

        let response = response_for(&e, &mut diagnostics).unwrap();
        let value = serde_json::to_value(&response).unwrap();
        let media = &value["content"]["application/json"];
        assert_eq!(
            media["example"],
            json!({"Keys": {"<string>": {"Type": "<string>"}}})
        );
        assert_eq!(
            media["schema"],
            json!({
                "type": "object",
                "properties": {
                    "Keys": {
                        "type": "object",
                        "additionalProperties": {
                            "type": "object",
                            "properties": {"Type": {"type": "string"}}
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_unclassifiable_response_keeps_example_only() {
        let mut e = endpoint("/api/v0/version", Status::Active);
        e.response = "\"<mystery>\"".to_string();
        let mut diagnostics = Diagnostics::new();

        let response = response_for(&e, &mut diagnostics).unwrap();
        let value = serde_json::to_value(&response).unwrap();
        let media = &value["content"]["application/json"];
        assert_eq!(media["example"], json!("<mystery>"));
        assert!(media.get("schema").is_none());
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_status_ordering() {
        let endpoints = vec![
            endpoint("/api/v0/old", Status::Deprecated),
            endpoint("/api/v0/stable", Status::Active),
            endpoint("/api/v0/new", Status::Experimental),
            endpoint("/api/v0/gone", Status::Removed),
        ];
        let generator = Generator::new(GeneratorConfig::default());
        let mut diagnostics = Diagnostics::new();

        let doc = generator.generate(&endpoints, &mut diagnostics).unwrap();
        let paths: Vec<&str> = doc.operations().map(|(path, _)| path).collect();
        assert_eq!(
            paths,
            vec!["/api/v0/stable", "/api/v0/new", "/api/v0/old"]
        );
    }

    #[test]
    fn test_removed_can_be_enabled() {
        let endpoints = vec![
            endpoint("/api/v0/gone", Status::Removed),
            endpoint("/api/v0/stable", Status::Active),
        ];
        let config = GeneratorConfig::default().with_status(Status::Removed);
        let generator = Generator::new(config);
        let mut diagnostics = Diagnostics::new();

        let doc = generator.generate(&endpoints, &mut diagnostics).unwrap();
        let paths: Vec<&str> = doc.operations().map(|(path, _)| path).collect();
        assert_eq!(paths, vec!["/api/v0/stable", "/api/v0/gone"]);
    }

    #[test]
    fn test_duplicate_endpoint_aborts() {
        let endpoints = vec![
            endpoint("/api/v0/id", Status::Active),
            endpoint("/api/v0/id", Status::Experimental),
        ];
        let generator = Generator::new(GeneratorConfig::default());
        let mut diagnostics = Diagnostics::new();
        assert!(generator.generate(&endpoints, &mut diagnostics).is_err());
    }
}
