//! Normalized managed identity state.

use serde::{Deserialize, Serialize};

use crate::error::{IdentityError, IdentityResult};
use crate::kind::IdentityKind;

/// The identity assigned to a resource, independent of configuration shape.
///
/// Built fresh on every read of configuration or remote state and never
/// mutated afterwards. A `None` kind always carries empty fields, and
/// user-assigned identity IDs only ever accompany a kind that includes
/// `UserAssigned`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ManagedIdentityConfigRepr")]
pub struct ManagedIdentityConfig {
    kind: IdentityKind,
    principal_id: String,
    tenant_id: String,
    user_assigned_identity_ids: Vec<String>,
}

impl ManagedIdentityConfig {
    /// No identity assigned.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn system_assigned() -> Self {
        Self {
            kind: IdentityKind::SystemAssigned,
            ..Self::default()
        }
    }

    /// Build a config, rejecting identity IDs on a kind that cannot carry them.
    pub fn new(kind: IdentityKind, user_assigned_identity_ids: Vec<String>) -> IdentityResult<Self> {
        if !user_assigned_identity_ids.is_empty() && !kind.includes_user_assigned() {
            return Err(IdentityError::IdentityIdsRequireUserAssigned);
        }
        Ok(Self {
            kind,
            user_assigned_identity_ids,
            ..Self::default()
        })
    }

    /// Attach the principal and tenant reported by the remote system.
    /// Ignored for a `None` kind.
    pub fn with_principal(mut self, principal_id: impl Into<String>, tenant_id: impl Into<String>) -> Self {
        if self.kind != IdentityKind::None {
            self.principal_id = principal_id.into();
            self.tenant_id = tenant_id.into();
        }
        self
    }

    pub fn kind(&self) -> IdentityKind {
        self.kind
    }

    pub fn principal_id(&self) -> &str {
        &self.principal_id
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    pub fn user_assigned_identity_ids(&self) -> &[String] {
        &self.user_assigned_identity_ids
    }

    pub fn is_none(&self) -> bool {
        self.kind == IdentityKind::None
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ManagedIdentityConfigRepr {
    #[serde(default)]
    kind: IdentityKind,
    #[serde(default)]
    principal_id: String,
    #[serde(default)]
    tenant_id: String,
    #[serde(default)]
    user_assigned_identity_ids: Vec<String>,
}

impl TryFrom<ManagedIdentityConfigRepr> for ManagedIdentityConfig {
    type Error = IdentityError;

    fn try_from(repr: ManagedIdentityConfigRepr) -> Result<Self, Self::Error> {
        Ok(ManagedIdentityConfig::new(repr.kind, repr.user_assigned_identity_ids)?
            .with_principal(repr.principal_id, repr.tenant_id))
    }
}
