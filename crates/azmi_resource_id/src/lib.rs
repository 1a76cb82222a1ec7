//! # azmi_resource_id
//!
//! Parsing and formatting of Azure Resource Manager resource IDs.
//!
//! [`ResourceId`] splits any ARM ID into its subscription, resource group,
//! provider namespace and `type/name` pairs. Typed IDs such as
//! [`UserAssignedIdentityId`] are built on top of it by popping the segments
//! they expect and rejecting anything left over.
//!
//! ## Example
//!
//! ```rust
//! use azmi_resource_id::UserAssignedIdentityId;
//!
//! let id = UserAssignedIdentityId::parse(
//!     "/subscriptions/s/resourcegroups/rg/providers/Microsoft.ManagedIdentity/userAssignedIdentities/app",
//! )
//! .unwrap();
//! assert_eq!(id.name, "app");
//! assert_eq!(
//!     id.to_string(),
//!     "/subscriptions/s/resourceGroups/rg/providers/Microsoft.ManagedIdentity/userAssignedIdentities/app"
//! );
//! ```

pub mod error;
pub mod resource_id;
pub mod user_assigned;

pub use error::{ResourceIdError, ResourceIdResult};
pub use resource_id::ResourceId;
pub use user_assigned::{
    validate_user_assigned_identity_id, UserAssignedIdentityId, MANAGED_IDENTITY_PROVIDER,
    USER_ASSIGNED_IDENTITIES,
};
