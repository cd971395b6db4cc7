use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by any resumy command. All of them are fatal to the
/// current invocation; there is no retry logic anywhere.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A legacy document is missing a field that has no default and is
    /// required by the canonical schema.
    #[error("schema mismatch: missing required field `{path}`")]
    SchemaMismatch { path: String },

    /// The document does not conform to the selected schema.
    #[error("validation failed:\n{0}")]
    Validation(String),

    /// The schema itself could not be compiled.
    #[error("invalid schema: {0}")]
    Schema(String),

    #[error("unknown schema `{0}` (expected a built-in name or a path to a schema file)")]
    UnknownSchema(String),

    #[error("unknown theme `{0}` (expected a built-in name or a path to a theme directory)")]
    UnknownTheme(String),

    #[error("invalid month `{0}` (expected a three-letter abbreviation like `Aug`)")]
    InvalidMonth(String),

    #[error("failed to read `{path}`: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write `{path}`: {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("weasyprint not found on PATH; install it to build PDFs")]
    RendererNotFound,

    #[error("weasyprint failed: {0}")]
    Render(String),
}

impl Error {
    /// Process exit code for this error. Validation problems exit with 2,
    /// everything else with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::SchemaMismatch { .. } | Error::Validation(_) => 2,
            _ => 1,
        }
    }

    pub(crate) fn missing(path: impl Into<String>) -> Self {
        Error::SchemaMismatch { path: path.into() }
    }
}
