//! Error types for resource ID parsing.

use thiserror::Error;

/// Result type alias for resource ID operations.
pub type ResourceIdResult<T> = Result<T, ResourceIdError>;

/// Errors that can occur while parsing an ARM resource ID.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceIdError {
    #[error("Resource ID cannot be empty")]
    Empty,

    #[error("Resource ID {id:?} has leading or trailing whitespace")]
    SurroundingWhitespace { id: String },

    #[error("Resource ID {id:?} must start with \"/\"")]
    MissingLeadingSlash { id: String },

    #[error("Resource ID {id:?} must consist of key/value segment pairs")]
    OddSegments { id: String },

    #[error("Resource ID {id:?} contains an empty segment")]
    EmptySegment { id: String },

    #[error("Resource ID {id:?} is missing the {segment:?} segment")]
    MissingSegment { id: String, segment: &'static str },

    #[error("Resource ID {id:?} has provider {found:?}, expected {expected:?}")]
    WrongProvider {
        id: String,
        found: String,
        expected: &'static str,
    },

    #[error("Resource ID {id:?} has unexpected segments: {remaining}")]
    UnexpectedSegments { id: String, remaining: String },
}
