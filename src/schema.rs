//! Schema validation of resume documents.
//!
//! Schemas are JSON-schema definitions stored as YAML. Two are embedded in
//! the binary (the canonical JSON Resume dialect and the legacy resumy
//! format); anything else is treated as a path to a custom schema file.

use std::fs;
use std::path::Path;

use jsonschema::JSONSchema;

use crate::error::{Error, Result};

pub const CANONICAL_SCHEMA: &str = "jsonresume";
pub const LEGACY_SCHEMA: &str = "resumy";

const JSONRESUME_YAML: &str = include_str!("../schemas/jsonresume.yaml");
const RESUMY_YAML: &str = include_str!("../schemas/resumy.yaml");

/// Resolve a schema argument to its YAML text. A built-in name (with or
/// without the `.yaml` suffix) wins over the filesystem.
fn schema_text(name: &str) -> Result<String> {
    match name.strip_suffix(".yaml").unwrap_or(name) {
        "jsonresume" => Ok(JSONRESUME_YAML.to_string()),
        "resumy" => Ok(RESUMY_YAML.to_string()),
        _ => {
            let path = Path::new(name);
            if path.is_file() {
                fs::read_to_string(path).map_err(|source| Error::ReadFile {
                    path: path.to_path_buf(),
                    source,
                })
            } else {
                Err(Error::UnknownSchema(name.to_string()))
            }
        }
    }
}

/// Validate a document against the named schema.
///
/// Every violation is reported, one per line, with its instance path.
pub fn validate(doc: &serde_yaml::Value, schema_name: &str) -> Result<()> {
    let schema_yaml: serde_yaml::Value = serde_yaml::from_str(&schema_text(schema_name)?)?;
    let schema = serde_json::to_value(&schema_yaml).map_err(|e| Error::Schema(e.to_string()))?;
    let instance = serde_json::to_value(doc).map_err(|e| Error::Schema(e.to_string()))?;

    let compiled = JSONSchema::compile(&schema).map_err(|e| Error::Schema(e.to_string()))?;
    if let Err(errors) = compiled.validate(&instance) {
        let report: Vec<String> = errors
            .map(|err| {
                let path = err.instance_path.to_string();
                if path.is_empty() {
                    format!("  {err}")
                } else {
                    format!("  {path}: {err}")
                }
            })
            .collect();
        return Err(Error::Validation(report.join("\n")));
    }
    Ok(())
}
