//! Error kinds surfaced by the extraction pipelines.

use thiserror::Error;

/// Failures with a stable meaning across both pipelines.
///
/// Library functions return `anyhow::Result` and wrap these values so callers
/// can add context freely and still `downcast_ref::<ExtractError>()` to decide
/// what went wrong.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Too few positional arguments were supplied to a helper binary.
    #[error("expected {expected} positional arguments, got {got}")]
    ArgumentCount { expected: usize, got: usize },

    /// A catalog document (JSON or YAML) could not be decoded.
    #[error("failed to parse {source_name}: {detail}")]
    CatalogParse { source_name: String, detail: String },

    /// A selection could not be resolved to exactly one bundle.
    #[error("resolution failed: {0}")]
    Resolution(String),
}

impl ExtractError {
    pub fn catalog_parse(source_name: impl Into<String>, detail: impl ToString) -> Self {
        ExtractError::CatalogParse {
            source_name: source_name.into(),
            detail: detail.to_string(),
        }
    }

    pub fn resolution(message: impl Into<String>) -> Self {
        ExtractError::Resolution(message.into())
    }

    /// Short machine-readable code, used in log fields.
    pub fn reason_code(&self) -> &'static str {
        match self {
            ExtractError::ArgumentCount { .. } => "argument_count",
            ExtractError::CatalogParse { .. } => "catalog_parse",
            ExtractError::Resolution(_) => "resolution",
        }
    }
}
