//! Error types for the schema module.

use thiserror::Error;

use crate::validator::Diagnostic;

/// Result type alias for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur while building or checking schemas.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Configuration is invalid: {}", join_diagnostics(.0))]
    Invalid(Vec<Diagnostic>),

    #[error("Invalid validator pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

fn join_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
