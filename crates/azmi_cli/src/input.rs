//! Reading input documents and writing command output.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use azmi_identity::BLOCK_NAME;

use crate::config::OutputFormat;
use crate::error::CliError;

/// Read a JSON or YAML document. The format follows the file extension;
/// stdin (`-`) and unknown extensions try JSON first, then YAML.
pub fn read_document(path: &Path) -> Result<Value, CliError> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|source| CliError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        buffer
    } else {
        fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?
    };

    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    parse_document(&content, extension).map_err(|message| CliError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

fn parse_document(content: &str, extension: &str) -> Result<Value, String> {
    match extension {
        "json" => serde_json::from_str(content).map_err(|e| e.to_string()),
        "yaml" | "yml" => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        _ => serde_json::from_str(content).or_else(|_| serde_yaml::from_str(content).map_err(|e| e.to_string())),
    }
}

/// Pick out the identity block list. Accepts the list itself or a host
/// object with an `identity` key; a host object without one has no block.
pub fn identity_blocks(document: Value) -> Result<Vec<Value>, String> {
    match document {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove(BLOCK_NAME) {
            Some(Value::Array(items)) => Ok(items),
            Some(Value::Null) => Ok(Vec::new()),
            Some(_) => Err(format!("`{BLOCK_NAME}` must be a list of blocks")),
            None => Ok(Vec::new()),
        },
        _ => Err(format!(
            "expected a list of {BLOCK_NAME} blocks or an object with an `{BLOCK_NAME}` key"
        )),
    }
}

/// Unwrap `{"identity": {...}}` around a single object, if present.
pub fn unwrap_identity_object(document: Value) -> Value {
    match document {
        Value::Object(mut map) if map.get(BLOCK_NAME).is_some_and(Value::is_object) => {
            map.remove(BLOCK_NAME).unwrap_or(Value::Null)
        }
        other => other,
    }
}

pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    Ok(rendered.trim_end().to_string())
}

pub fn write_output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(value, format)?);
    Ok(())
}
