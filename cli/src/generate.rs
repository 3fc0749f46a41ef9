#![deny(missing_docs)]

//! # Generate Command
//!
//! Reads an endpoint catalogue, runs the generator and writes the document.

use crate::error::{CliError, CliResult};
use clap::ValueEnum;
use rpc_openapi_core::{
    parse_catalogue, Diagnostics, Document, Generator, GeneratorConfig, SourceFormat, Status,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Serialization of the emitted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// YAML text.
    Yaml,
    /// Pretty-printed JSON.
    Json,
}

/// Arguments for the generate command.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Path to the endpoint catalogue (.yaml/.yml or .json).
    #[clap(long, env = "RPC_OPENAPI_CATALOGUE")]
    pub catalogue: PathBuf,

    /// Optional generator configuration (.yaml/.yml or .json).
    #[clap(long, env = "RPC_OPENAPI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format.
    #[clap(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,

    /// Output path. Prints to stdout if not provided.
    #[clap(long)]
    pub output: Option<PathBuf>,

    /// Also emit endpoints with the `removed` status.
    #[clap(long)]
    pub include_removed: bool,
}

fn read_source(path: &Path, what: &str) -> CliResult<String> {
    if !path.exists() {
        return Err(CliError::General(format!(
            "{} file not found: {:?}",
            what, path
        )));
    }
    Ok(fs::read_to_string(path)?)
}

/// Loads the configuration file, if any, and applies command line overrides.
pub fn load_config(args: &GenerateArgs) -> CliResult<GeneratorConfig> {
    let config = match &args.config {
        Some(path) => {
            let text = read_source(path, "Config")?;
            GeneratorConfig::parse(&text, SourceFormat::from_path(path))?
        }
        None => GeneratorConfig::default(),
    };

    Ok(if args.include_removed {
        config.with_status(Status::Removed)
    } else {
        config
    })
}

/// Serializes the document in the requested format.
pub fn render(document: &Document, format: OutputFormat) -> CliResult<String> {
    let text = match format {
        OutputFormat::Yaml => document.to_yaml()?,
        OutputFormat::Json => document.to_json()?,
    };
    Ok(text)
}

/// Executes the generate command.
pub fn execute(args: &GenerateArgs) -> CliResult<()> {
    let config = load_config(args)?;

    let text = read_source(&args.catalogue, "Catalogue")?;
    let endpoints = parse_catalogue(&text, SourceFormat::from_path(&args.catalogue))?;
    tracing::debug!(endpoints = endpoints.len(), "catalogue loaded");

    let generator = Generator::new(config);
    let mut diagnostics = Diagnostics::new();
    let document = generator.generate(&endpoints, &mut diagnostics)?;
    let output = render(&document, args.format)?;

    if !diagnostics.is_empty() {
        tracing::info!(warnings = diagnostics.len(), "generated with warnings");
    }

    match &args.output {
        Some(out_path) => {
            if let Some(parent) = out_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(out_path, output)?;
            tracing::info!(path = ?out_path, "document written");
        }
        None => println!("{}", output),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const CATALOGUE: &str = r#"
- name: /api/v0/id
  description: Show IPFS node id info.
  options:
    - name: format
      type: string
      description: Optional output format.
  response: '{"ID": "<string>", "Addresses": ["<string>"]}'
- name: /api/v0/a-gone
  status: removed
  response: '{"Hash": "<string>"}'
"#;

    fn args(dir: &Path, format: OutputFormat) -> GenerateArgs {
        let catalogue = dir.join("commands.yaml");
        fs::write(&catalogue, CATALOGUE).unwrap();
        GenerateArgs {
            catalogue,
            config: None,
            format,
            output: Some(dir.join("out").join("openapi.out")),
            include_removed: false,
        }
    }

    #[test]
    fn test_generate_yaml() {
        let dir = tempdir().unwrap();
        let args = args(dir.path(), OutputFormat::Yaml);
        execute(&args).unwrap();

        let written = fs::read_to_string(args.output.as_ref().unwrap()).unwrap();
        let doc: serde_yaml::Value = serde_yaml::from_str(&written).unwrap();
        assert_eq!(doc["openapi"].as_str(), Some("3.0.3"));
        assert!(doc["paths"]["/api/v0/id"]["post"].is_mapping());
        assert!(doc["paths"].get("/api/v0/a-gone").is_none());
    }

    #[test]
    fn test_generate_json_with_removed() {
        let dir = tempdir().unwrap();
        let mut args = args(dir.path(), OutputFormat::Json);
        args.include_removed = true;
        execute(&args).unwrap();

        let written = fs::read_to_string(args.output.as_ref().unwrap()).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&written).unwrap();
        let paths: Vec<&String> = doc["paths"].as_object().unwrap().keys().collect();
        assert_eq!(paths, vec!["/api/v0/id", "/api/v0/a-gone"]);
    }

    #[test]
    fn test_config_file_applies() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        fs::write(&config_path, r#"{"title": "Custom RPC", "version": "9.9.9"}"#).unwrap();

        let mut args = args(dir.path(), OutputFormat::Json);
        args.config = Some(config_path);
        let config = load_config(&args).unwrap();
        assert_eq!(config.title, "Custom RPC");
        assert!(!config.statuses.contains(&Status::Removed));

        execute(&args).unwrap();
        let written = fs::read_to_string(args.output.as_ref().unwrap()).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(doc["info"]["title"], "Custom RPC");
        assert_eq!(doc["info"]["version"], "9.9.9");
    }

    #[test]
    fn test_invalid_config_fails() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        fs::write(&config_path, "docs_url: not-a-url\n").unwrap();

        let mut args = args(dir.path(), OutputFormat::Yaml);
        args.config = Some(config_path);
        assert!(matches!(execute(&args), Err(CliError::Core(_))));
        assert!(!args.output.as_ref().unwrap().exists());
    }

    #[test]
    fn test_missing_catalogue() {
        let dir = tempdir().unwrap();
        let mut args = args(dir.path(), OutputFormat::Yaml);
        args.catalogue = dir.path().join("missing.yaml");
        match execute(&args) {
            Err(CliError::General(msg)) => assert!(msg.contains("Catalogue file not found")),
            other => panic!("Expected missing catalogue error, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_endpoint_writes_nothing() {
        let dir = tempdir().unwrap();
        let args = args(dir.path(), OutputFormat::Yaml);
        fs::write(
            &args.catalogue,
            "- name: /api/v0/id\n- name: /api/v0/id\n  status: experimental\n",
        )
        .unwrap();

        assert!(matches!(execute(&args), Err(CliError::Core(_))));
        assert!(!args.output.as_ref().unwrap().exists());
    }
}
