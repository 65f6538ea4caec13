//! Per-request actor context
//!
//! A [`UserContext`] is the actor id plus the roles they hold, one per group.
//! The wire shape produced by the session layer is
//! `{ "id": uuid, "groups": [{ "id": uuid, "role": string }] }`.

use crate::config::AuthzConfig;
use crate::error::{AuthzError, Result};
use crate::types::RoleName;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

/// Role held by the actor in one group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    #[serde(rename = "id")]
    pub group_id: Uuid,
    pub role: RoleName,
}

/// Actor identity and group memberships, in membership order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserContext {
    #[serde(rename = "id")]
    pub actor_id: Uuid,
    #[serde(rename = "groups")]
    pub memberships: Vec<Membership>,
}

#[derive(Deserialize)]
struct RawUserContext {
    id: Uuid,
    #[serde(default)]
    groups: Vec<RawMembership>,
}

#[derive(Deserialize)]
struct RawMembership {
    id: Uuid,
    role: String,
}

impl UserContext {
    /// Context with no memberships
    pub fn new(actor_id: Uuid) -> Self {
        Self {
            actor_id,
            memberships: Vec::new(),
        }
    }

    /// Append a membership
    pub fn with_membership(mut self, group_id: Uuid, role: RoleName) -> Self {
        self.memberships.push(Membership { group_id, role });
        self
    }

    /// Decode from the session's JSON shape
    ///
    /// Unknown role names become `none` unless `config.strict_roles` is set.
    pub fn from_json(value: &Value, config: &AuthzConfig) -> Result<Self> {
        let raw = RawUserContext::deserialize(value)
            .map_err(|e| AuthzError::InvalidInput(format!("Invalid user context: {}", e)))?;

        let mut memberships = Vec::with_capacity(raw.groups.len());
        for group in raw.groups {
            let role = if config.strict_roles {
                group.role.parse::<RoleName>().map_err(|e| {
                    AuthzError::InvalidInput(format!(
                        "Invalid user context: {} in group {}",
                        e, group.id
                    ))
                })?
            } else {
                let role = RoleName::parse_lenient(&group.role);
                if role.as_str() != group.role {
                    warn!(
                        "Unknown role '{}' for actor {} in group {}, treating as none",
                        group.role, raw.id, group.id
                    );
                }
                role
            };
            memberships.push(Membership {
                group_id: group.id,
                role,
            });
        }

        Ok(Self {
            actor_id: raw.id,
            memberships,
        })
    }

    /// Role held in `group_id`, if any
    pub fn role_in(&self, group_id: Uuid) -> Option<RoleName> {
        self.memberships
            .iter()
            .find(|m| m.group_id == group_id)
            .map(|m| m.role)
    }
}
