//! The `identity` object of ARM request and response bodies.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use azmi_resource_id::UserAssignedIdentityId;

use crate::config::ManagedIdentityConfig;
use crate::error::IdentityResult;
use crate::kind::IdentityKind;

/// ARM representation of a resource's managed identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmIdentity {
    /// Kept as a string: ARM is inconsistent about casing and spacing.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_assigned_identities: Option<BTreeMap<String, ArmUserAssignedIdentity>>,
}

/// Per-identity details ARM reports for each user-assigned identity.
/// Requests send an empty object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmUserAssignedIdentity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

impl ArmIdentity {
    /// Request body for a config. Output-only fields are never sent.
    pub fn from_config(config: &ManagedIdentityConfig) -> Self {
        let user_assigned_identities = config.kind().includes_user_assigned().then(|| {
            config
                .user_assigned_identity_ids()
                .iter()
                .map(|id| (id.clone(), ArmUserAssignedIdentity::default()))
                .collect()
        });

        Self {
            kind: config.kind().as_str().to_string(),
            principal_id: None,
            tenant_id: None,
            user_assigned_identities,
        }
    }

    /// Normalize a response body.
    ///
    /// Identity IDs are re-emitted in canonical casing when they parse, since
    /// ARM lower-cases segment names on read. IDs reported alongside a kind
    /// that cannot carry them are dropped.
    pub fn into_config(self) -> IdentityResult<ManagedIdentityConfig> {
        let kind: IdentityKind = self.kind.parse()?;
        if kind == IdentityKind::None {
            return Ok(ManagedIdentityConfig::none());
        }

        let mut ids = BTreeSet::new();
        for raw in self.user_assigned_identities.unwrap_or_default().into_keys() {
            match UserAssignedIdentityId::parse(&raw) {
                Ok(id) => {
                    ids.insert(id.to_string());
                }
                Err(e) => {
                    warn!("Keeping unparseable user-assigned identity ID {raw:?}: {e}");
                    ids.insert(raw);
                }
            }
        }

        if !kind.includes_user_assigned() && !ids.is_empty() {
            warn!(
                kind = %kind,
                dropped = ids.len(),
                "Ignoring user-assigned identities reported for a kind without UserAssigned"
            );
            ids.clear();
        }

        Ok(ManagedIdentityConfig::new(kind, ids.into_iter().collect())?.with_principal(
            self.principal_id.unwrap_or_default(),
            self.tenant_id.unwrap_or_default(),
        ))
    }
}

impl From<&ManagedIdentityConfig> for ArmIdentity {
    fn from(config: &ManagedIdentityConfig) -> Self {
        ArmIdentity::from_config(config)
    }
}

impl TryFrom<ArmIdentity> for ManagedIdentityConfig {
    type Error = crate::error::IdentityError;

    fn try_from(identity: ArmIdentity) -> Result<Self, Self::Error> {
        identity.into_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ID: &str = "/subscriptions/s/resourceGroups/rg/providers/Microsoft.ManagedIdentity/userAssignedIdentities/app";

    #[test]
    fn test_request_body_for_none() {
        let body = serde_json::to_value(ArmIdentity::from_config(&ManagedIdentityConfig::none())).unwrap();
        assert_eq!(body, json!({ "type": "None" }));
    }

    #[test]
    fn test_request_body_for_combined() {
        let config = ManagedIdentityConfig::new(
            IdentityKind::SystemAssignedUserAssigned,
            vec![ID.to_string()],
        )
        .unwrap()
        .with_principal("p", "t");

        let body = serde_json::to_value(ArmIdentity::from(&config)).unwrap();
        assert_eq!(
            body,
            json!({
                "type": "SystemAssigned, UserAssigned",
                "userAssignedIdentities": { ID: {} }
            })
        );
    }

    #[test]
    fn test_response_normalizes_ids_and_kind() {
        let body = json!({
            "type": "SystemAssigned,UserAssigned",
            "principalId": "p",
            "tenantId": "t",
            "userAssignedIdentities": {
                "/subscriptions/s/resourcegroups/rg/providers/Microsoft.ManagedIdentity/userAssignedIdentities/app": {
                    "principalId": "up",
                    "clientId": "uc"
                }
            }
        });
        let identity: ArmIdentity = serde_json::from_value(body).unwrap();
        let config = identity.into_config().unwrap();

        assert_eq!(config.kind(), IdentityKind::SystemAssignedUserAssigned);
        assert_eq!(config.principal_id(), "p");
        assert_eq!(config.tenant_id(), "t");
        assert_eq!(config.user_assigned_identity_ids(), [ID.to_string()]);
    }

    #[test]
    fn test_response_keeps_unparseable_ids() {
        let identity = ArmIdentity {
            kind: "UserAssigned".to_string(),
            user_assigned_identities: Some(BTreeMap::from([(
                "legacy-id".to_string(),
                ArmUserAssignedIdentity::default(),
            )])),
            ..ArmIdentity::default()
        };
        let config = ManagedIdentityConfig::try_from(identity).unwrap();
        assert_eq!(config.user_assigned_identity_ids(), ["legacy-id".to_string()]);
    }

    #[test]
    fn test_response_none_discards_everything() {
        let identity = ArmIdentity {
            kind: "None".to_string(),
            principal_id: Some("p".to_string()),
            ..ArmIdentity::default()
        };
        assert_eq!(identity.into_config().unwrap(), ManagedIdentityConfig::none());
    }

    #[test]
    fn test_response_drops_ids_for_system_assigned() {
        let identity = ArmIdentity {
            kind: "SystemAssigned".to_string(),
            user_assigned_identities: Some(BTreeMap::from([(
                ID.to_string(),
                ArmUserAssignedIdentity::default(),
            )])),
            ..ArmIdentity::default()
        };
        let config = identity.into_config().unwrap();
        assert_eq!(config.kind(), IdentityKind::SystemAssigned);
        assert!(config.user_assigned_identity_ids().is_empty());
    }

    #[test]
    fn test_response_unknown_kind() {
        let identity = ArmIdentity {
            kind: "Delegated".to_string(),
            ..ArmIdentity::default()
        };
        assert!(identity.into_config().is_err());
    }
}
