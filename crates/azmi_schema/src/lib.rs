//! # azmi_schema
//!
//! Declarative block schemas and configuration validation for azmi.
//!
//! A schema describes the shape of a configuration block: attribute types,
//! which attributes are required, optional or computed, list limits and
//! string constraints. The validator walks an untyped [`serde_json::Value`]
//! against a schema and reports every problem it finds, so typed models only
//! ever see input that already has the right shape.
//!
//! ## Example
//!
//! ```rust
//! use azmi_schema::{validate_block, Attribute, AttributeType, BlockSchema, StringValidator};
//! use serde_json::json;
//!
//! let schema = BlockSchema::new()
//!     .with_attribute(
//!         "type",
//!         Attribute::required(AttributeType::String)
//!             .with_validator(StringValidator::one_of(["SystemAssigned"])),
//!     )
//!     .with_attribute("principal_id", Attribute::computed(AttributeType::String));
//!
//! let report = validate_block(&schema, &json!({ "type": "SystemAssigned" }));
//! assert!(report.valid);
//! ```

pub mod error;
pub mod schema;
pub mod validator;

pub use error::{SchemaError, SchemaResult};
pub use schema::{Attribute, AttributeType, BlockSchema, CheckFn, Presence, StringValidator};
pub use validator::{validate_attribute, validate_block, Diagnostic, ValidationReport};
