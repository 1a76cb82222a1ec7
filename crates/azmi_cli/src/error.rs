//! Error types for the CLI.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the CLI itself, as opposed to the libraries it drives.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid config file {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("Validation failed with {0} error(s)")]
    ValidationFailed(usize),
}
