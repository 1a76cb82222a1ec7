//! User-assigned managed identity resource IDs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ResourceIdError, ResourceIdResult};
use crate::resource_id::ResourceId;

/// Provider namespace of managed identities.
pub const MANAGED_IDENTITY_PROVIDER: &str = "Microsoft.ManagedIdentity";

/// Resource type segment of a user-assigned identity.
pub const USER_ASSIGNED_IDENTITIES: &str = "userAssignedIdentities";

/// `/subscriptions/{subscription_id}/resourceGroups/{resource_group}/providers/Microsoft.ManagedIdentity/userAssignedIdentities/{name}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserAssignedIdentityId {
    pub subscription_id: String,
    pub resource_group: String,
    pub name: String,
}

impl UserAssignedIdentityId {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group: resource_group.into(),
            name: name.into(),
        }
    }

    pub fn parse(input: &str) -> ResourceIdResult<Self> {
        let mut id = ResourceId::parse(input)?;

        let resource_group = id
            .resource_group
            .take()
            .ok_or_else(|| ResourceIdError::MissingSegment {
                id: input.to_string(),
                segment: "resourceGroups",
            })?;

        match id.provider.as_deref() {
            Some(provider) if provider.eq_ignore_ascii_case(MANAGED_IDENTITY_PROVIDER) => {}
            Some(provider) => {
                return Err(ResourceIdError::WrongProvider {
                    id: input.to_string(),
                    found: provider.to_string(),
                    expected: MANAGED_IDENTITY_PROVIDER,
                })
            }
            None => {
                return Err(ResourceIdError::MissingSegment {
                    id: input.to_string(),
                    segment: "providers",
                })
            }
        }

        let name = id.pop_segment(USER_ASSIGNED_IDENTITIES)?;
        id.ensure_consumed()?;

        Ok(Self {
            subscription_id: id.subscription_id,
            resource_group,
            name,
        })
    }

    /// The canonical ID string.
    pub fn id(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for UserAssignedIdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "/subscriptions/{}/resourceGroups/{}/providers/{}/{}/{}",
            self.subscription_id,
            self.resource_group,
            MANAGED_IDENTITY_PROVIDER,
            USER_ASSIGNED_IDENTITIES,
            self.name
        )
    }
}

impl FromStr for UserAssignedIdentityId {
    type Err = ResourceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for UserAssignedIdentityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for UserAssignedIdentityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Schema check for user-assigned identity IDs.
pub fn validate_user_assigned_identity_id(value: &str) -> Result<(), String> {
    UserAssignedIdentityId::parse(value)
        .map(|_| ())
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "/subscriptions/00000000-0000-0000-0000-000000000000/resourceGroups/rg1/providers/Microsoft.ManagedIdentity/userAssignedIdentities/id1";

    #[test]
    fn test_parse_canonical() {
        let id = UserAssignedIdentityId::parse(ID).unwrap();
        assert_eq!(id.subscription_id, "00000000-0000-0000-0000-000000000000");
        assert_eq!(id.resource_group, "rg1");
        assert_eq!(id.name, "id1");
        assert_eq!(id.id(), ID);
    }

    #[test]
    fn test_parse_normalizes_casing() {
        let id = UserAssignedIdentityId::parse(
            "/subscriptions/s/resourcegroups/rg/providers/microsoft.managedidentity/userassignedidentities/x",
        )
        .unwrap();
        assert_eq!(
            id.to_string(),
            "/subscriptions/s/resourceGroups/rg/providers/Microsoft.ManagedIdentity/userAssignedIdentities/x"
        );
    }

    #[test]
    fn test_wrong_provider() {
        let err = UserAssignedIdentityId::parse(
            "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Storage/storageAccounts/x",
        )
        .unwrap_err();
        assert!(matches!(err, ResourceIdError::WrongProvider { .. }));
    }

    #[test]
    fn test_missing_resource_group() {
        let err = UserAssignedIdentityId::parse(
            "/subscriptions/s/providers/Microsoft.ManagedIdentity/userAssignedIdentities/x",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ResourceIdError::MissingSegment {
                segment: "resourceGroups",
                ..
            }
        ));
    }

    #[test]
    fn test_trailing_segments_rejected() {
        let err = UserAssignedIdentityId::parse(&format!("{ID}/federatedIdentityCredentials/f")).unwrap_err();
        assert!(matches!(err, ResourceIdError::UnexpectedSegments { .. }));
    }

    #[test]
    fn test_validate_rejects_padded_and_slashed_ids() {
        for input in [
            format!("  {ID}  "),
            format!("/{ID}"),
            format!("{ID}/"),
            format!("  /{ID}/  "),
        ] {
            assert!(
                validate_user_assigned_identity_id(&input).is_err(),
                "accepted {input:?}"
            );
        }
    }

    #[test]
    fn test_validate_fn_message() {
        assert!(validate_user_assigned_identity_id(ID).is_ok());
        let message = validate_user_assigned_identity_id("id1").unwrap_err();
        assert_eq!(message, "Resource ID \"id1\" must start with \"/\"");
    }

    #[test]
    fn test_serde_as_string() {
        let id = UserAssignedIdentityId::parse(ID).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{ID}\""));
        let back: UserAssignedIdentityId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<UserAssignedIdentityId>("\"/nope\"").is_err());
    }
}
