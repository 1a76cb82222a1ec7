//! # azmi_identity
//!
//! Schema, expand and flatten for the Azure managed identity block.
//!
//! A resource declares which identity modes it supports through an
//! [`IdentityCapabilities`] set. [`IdentityBlock`] turns that set into a
//! block schema and maps between the configuration form (a list holding at
//! most one map) and the typed [`ManagedIdentityConfig`]. [`ArmIdentity`]
//! covers the other edge: the `identity` object of ARM request and response
//! bodies.
//!
//! ## Example
//!
//! ```rust
//! use azmi_identity::{IdentityBlock, IdentityKind};
//! use serde_json::json;
//!
//! let block = IdentityBlock::system_assigned_user_assigned();
//! let config = block
//!     .expand(&[json!({
//!         "type": "SystemAssigned, UserAssigned",
//!         "identity_ids": [
//!             "/subscriptions/s/resourceGroups/rg/providers/Microsoft.ManagedIdentity/userAssignedIdentities/app"
//!         ]
//!     })])
//!     .unwrap();
//! assert_eq!(config.kind(), IdentityKind::SystemAssignedUserAssigned);
//!
//! let flattened = block.flatten(Some(&config));
//! assert_eq!(flattened[0]["type"], "SystemAssigned, UserAssigned");
//! ```

pub mod arm;
pub mod block;
pub mod config;
pub mod error;
pub mod kind;

pub use arm::{ArmIdentity, ArmUserAssignedIdentity};
pub use block::{
    FlattenedBlock, IdentityBlock, BLOCK_NAME, FIELD_IDENTITY_IDS, FIELD_PRINCIPAL_ID,
    FIELD_TENANT_ID, FIELD_TYPE,
};
pub use config::ManagedIdentityConfig;
pub use error::{IdentityError, IdentityResult};
pub use kind::{IdentityCapabilities, IdentityKind};
