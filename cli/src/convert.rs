#![deny(missing_docs)]

//! # Convert Command
//!
//! Reads a Postman collection export, runs the translation core, and
//! writes the resulting OpenAPI document as JSON or YAML. Per-node
//! diagnostics go to stderr; only an undecodable input file fails the
//! command.

use std::fs;
use std::path::PathBuf;

use p2o_core::translate::Translation;

use crate::error::{CliError, CliResult};

/// Arguments for the convert command.
#[derive(clap::Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Path to the Postman collection JSON export.
    pub input: PathBuf,

    /// Output file; prints to stdout when omitted.
    #[clap(long, short)]
    pub output: Option<PathBuf>,

    /// Output serialization format.
    #[clap(long, value_enum, default_value = "json")]
    pub format: OutputFormat,
}

/// Supported output serializations.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

/// Executes the convert command.
///
/// # Arguments
///
/// * `args` - Command arguments.
pub fn execute(args: &ConvertArgs) -> CliResult<()> {
    let text = fs::read_to_string(&args.input)?;

    // Decode failure is the only fatal outcome; no partial output is
    // written in that case.
    let translation = p2o_core::translate_str(&text)?;
    report_diagnostics(&translation);

    let rendered = render(&translation, args.format)?;

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)?;
            println!(
                "Converted {} paths into {:?} ({} warnings).",
                translation.document.paths.len(),
                path,
                translation.diagnostics.len()
            );
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

/// Serializes the document with construction key order preserved.
fn render(translation: &Translation, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&translation.document)
            .map_err(|e| CliError::General(format!("Failed to serialize document: {}", e))),
        OutputFormat::Yaml => serde_yaml::to_string(&translation.document)
            .map_err(|e| CliError::General(format!("Failed to serialize document: {}", e))),
    }
}

fn report_diagnostics(translation: &Translation) {
    for diagnostic in &translation.diagnostics {
        eprintln!("warning: {}: {}", diagnostic.node, diagnostic.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLLECTION: &str = r#"{
        "info": {"name": "Demo"},
        "item": [
            {"name": "broken"},
            {"name": "Get user", "request": {
                "method": "GET",
                "url": {"raw": "https://x.example/users/1", "path": ["users", ":id"],
                        "variable": [{"key": "id", "value": "1"}]}
            }}
        ]
    }"#;

    #[test]
    fn test_convert_writes_json_document() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("collection.json");
        let output = dir.path().join("openapi.json");
        fs::write(&input, COLLECTION).unwrap();

        let args = ConvertArgs {
            input,
            output: Some(output.clone()),
            format: OutputFormat::Json,
        };
        execute(&args).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains(r#""openapi": "3.0.0""#));
        assert!(written.contains("/users/{id}"));
        assert!(written.contains(r#""title": "Demo""#));
    }

    #[test]
    fn test_convert_writes_yaml_document() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("collection.json");
        let output = dir.path().join("openapi.yml");
        fs::write(&input, COLLECTION).unwrap();

        let args = ConvertArgs {
            input,
            output: Some(output.clone()),
            format: OutputFormat::Yaml,
        };
        execute(&args).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("openapi: 3.0.0"));
        assert!(written.contains("/users/{id}"));
    }

    #[test]
    fn test_convert_rejects_invalid_input_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.json");
        let output = dir.path().join("never.json");
        fs::write(&input, "{ definitely not json").unwrap();

        let args = ConvertArgs {
            input,
            output: Some(output.clone()),
            format: OutputFormat::Json,
        };
        assert!(execute(&args).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_convert_missing_file_is_io_error() {
        let args = ConvertArgs {
            input: PathBuf::from("/nonexistent/collection.json"),
            output: None,
            format: OutputFormat::Json,
        };
        assert!(matches!(execute(&args), Err(CliError::Io(_))));
    }
}
