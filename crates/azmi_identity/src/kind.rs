//! Identity kinds and the capability sets that restrict them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::IdentityError;

/// Which managed identities are assigned to a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IdentityKind {
    #[default]
    None,
    SystemAssigned,
    UserAssigned,
    SystemAssignedUserAssigned,
}

impl IdentityKind {
    /// The literal used in configuration and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityKind::None => "None",
            IdentityKind::SystemAssigned => "SystemAssigned",
            IdentityKind::UserAssigned => "UserAssigned",
            IdentityKind::SystemAssignedUserAssigned => "SystemAssigned, UserAssigned",
        }
    }

    /// Exact match against the configuration literals. `None` is not a
    /// configurable value; an absent block expresses it.
    pub fn from_config_str(s: &str) -> Option<Self> {
        match s {
            "SystemAssigned" => Some(IdentityKind::SystemAssigned),
            "UserAssigned" => Some(IdentityKind::UserAssigned),
            "SystemAssigned, UserAssigned" => Some(IdentityKind::SystemAssignedUserAssigned),
            _ => None,
        }
    }

    /// Lenient match for values returned by ARM, which vary in casing and
    /// in the spacing of the combined form.
    pub fn from_arm_str(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "" | "none" => Some(IdentityKind::None),
            "systemassigned" => Some(IdentityKind::SystemAssigned),
            "userassigned" => Some(IdentityKind::UserAssigned),
            "systemassigned,userassigned" | "userassigned,systemassigned" => {
                Some(IdentityKind::SystemAssignedUserAssigned)
            }
            _ => None,
        }
    }

    pub fn includes_system_assigned(&self) -> bool {
        matches!(
            self,
            IdentityKind::SystemAssigned | IdentityKind::SystemAssignedUserAssigned
        )
    }

    pub fn includes_user_assigned(&self) -> bool {
        matches!(
            self,
            IdentityKind::UserAssigned | IdentityKind::SystemAssignedUserAssigned
        )
    }
}

impl fmt::Display for IdentityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdentityKind {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_arm_str(s).ok_or_else(|| IdentityError::UnsupportedType {
            value: s.to_string(),
            allowed: [
                IdentityKind::None,
                IdentityKind::SystemAssigned,
                IdentityKind::UserAssigned,
                IdentityKind::SystemAssignedUserAssigned,
            ]
            .iter()
            .map(|k| format!("{:?}", k.as_str()))
            .collect::<Vec<_>>()
            .join(", "),
        })
    }
}

impl Serialize for IdentityKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for IdentityKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// The identity modes a resource type supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentityCapabilities {
    allow_system_assigned: bool,
    allow_user_assigned: bool,
}

impl IdentityCapabilities {
    pub const SYSTEM_ASSIGNED_ONLY: Self = Self {
        allow_system_assigned: true,
        allow_user_assigned: false,
    };

    pub const USER_ASSIGNED_ONLY: Self = Self {
        allow_system_assigned: false,
        allow_user_assigned: true,
    };

    pub const SYSTEM_ASSIGNED_OR_USER_ASSIGNED: Self = Self {
        allow_system_assigned: true,
        allow_user_assigned: true,
    };

    pub fn allows_system_assigned(&self) -> bool {
        self.allow_system_assigned
    }

    pub fn allows_user_assigned(&self) -> bool {
        self.allow_user_assigned
    }

    /// Configurable kinds, in the order they are listed in the schema.
    pub fn allowed_kinds(&self) -> Vec<IdentityKind> {
        let mut kinds = Vec::with_capacity(3);
        if self.allow_user_assigned {
            kinds.push(IdentityKind::UserAssigned);
        }
        if self.allow_system_assigned {
            kinds.push(IdentityKind::SystemAssigned);
        }
        if self.allow_system_assigned && self.allow_user_assigned {
            kinds.push(IdentityKind::SystemAssignedUserAssigned);
        }
        kinds
    }

    pub fn allows(&self, kind: IdentityKind) -> bool {
        self.allowed_kinds().contains(&kind)
    }

    /// Literals accepted for `type`.
    pub fn allowed_literals(&self) -> Vec<&'static str> {
        self.allowed_kinds().iter().map(IdentityKind::as_str).collect()
    }
}
