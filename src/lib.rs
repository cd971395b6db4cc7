//! Build styled PDF resumes from YAML descriptions.
//!
//! The pipeline is: load YAML, validate against a schema, normalize legacy
//! documents to the JSON Resume dialect, render HTML through a theme, and
//! hand the HTML to an external renderer for the PDF export.

pub mod error;
pub mod model;
pub mod normalize;
pub mod pdf;
pub mod render;
pub mod schema;
pub mod theme;

use std::fs;
use std::path::Path;

pub use error::{Error, Result};
pub use model::Resume;

/// Starter config written by the `init` command.
pub const EXAMPLE_CONFIG: &str = include_str!("../assets/config.example.yaml");

/// Load a YAML document from disk.
pub fn load_document(path: &Path) -> Result<serde_yaml::Value> {
    let text = fs::read_to_string(path).map_err(|source| Error::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_yaml::from_str(&text)?)
}

/// Bring a document into canonical form. Legacy documents are normalized;
/// documents already in canonical form pass through unchanged.
pub fn to_canonical(doc: &serde_yaml::Value) -> Result<serde_yaml::Value> {
    if !normalize::is_legacy(doc) {
        return Ok(doc.clone());
    }
    let legacy: model::LegacyDocument = serde_yaml::from_value(doc.clone())?;
    let resume = normalize::normalize(&legacy)?;
    Ok(serde_yaml::to_value(&resume)?)
}
