//! Error types for the identity module.

use thiserror::Error;

use azmi_schema::SchemaError;

/// Result type alias for identity operations.
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Errors raised while expanding an identity block.
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("identity_ids can only be specified when type includes UserAssigned")]
    IdentityIdsRequireUserAssigned,

    #[error("Unsupported identity type {value:?}, expected one of: {allowed}")]
    UnsupportedType { value: String, allowed: String },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid field {field}: expected {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("At most one identity block may be specified, got {0}")]
    TooManyBlocks(usize),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}
