//! Resource instances and subject type resolution
//!
//! A [`Subject`] is a snapshot of one task, group or user as the data layer
//! loaded it. The loader stamps the subject type when it builds the snapshot;
//! untyped JSON falls back to a `__typename` or `type` attribute. Nothing is
//! ever inferred from the shape of the data.

use crate::condition::lookup;
use crate::error::{AuthzError, Result};
use crate::types::{RoleName, SubjectType};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

/// Discriminator attributes consulted for untagged instances, in order
pub const DISCRIMINATOR_KEYS: [&str; 2] = ["__typename", "type"];

/// Resource instance handed to the ability
#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    kind: Option<SubjectType>,
    data: Value,
}

impl Subject {
    /// Instance stamped with its subject type
    pub fn new(kind: SubjectType, data: Value) -> Self {
        Self {
            kind: Some(kind),
            data,
        }
    }

    /// Instance whose type must be read from its attributes
    pub fn untagged(data: Value) -> Self {
        Self { kind: None, data }
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Value at a dotted path
    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup(&self.data, path)
    }

    /// Resolve the concrete subject type
    ///
    /// A discriminator holding `null` counts as absent. The first one present
    /// decides: it fails when it names something other than `Task`, `Group`
    /// or `User`, as does an instance with no discriminator at all. Callers
    /// treat that as a wiring bug.
    pub fn subject_type(&self) -> Result<SubjectType> {
        if let Some(kind) = self.kind {
            return concrete(kind);
        }

        for key in DISCRIMINATOR_KEYS {
            if let Some(tag) = self.data.get(key).filter(|tag| !tag.is_null()) {
                let tag = tag.as_str().ok_or_else(|| {
                    AuthzError::UnresolvableSubject(format!("'{}' is not a string", key))
                })?;
                let kind = tag
                    .parse::<SubjectType>()
                    .map_err(AuthzError::UnresolvableSubject)?;
                return concrete(kind);
            }
        }

        Err(AuthzError::UnresolvableSubject(
            "instance carries no subject type discriminator".to_string(),
        ))
    }
}

fn concrete(kind: SubjectType) -> Result<SubjectType> {
    match kind {
        SubjectType::All => Err(AuthzError::UnresolvableSubject(
            "'all' is not a concrete subject type".to_string(),
        )),
        kind => Ok(kind),
    }
}

/// Entry of a resource's group relation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRef {
    pub id: Uuid,
    /// Role in that group, only present on user snapshots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<RoleName>,
}

impl GroupRef {
    pub fn new(id: Uuid) -> Self {
        Self { id, role: None }
    }

    pub fn with_role(id: Uuid, role: RoleName) -> Self {
        Self {
            id,
            role: Some(role),
        }
    }

    fn to_value(&self) -> Value {
        match self.role {
            Some(role) => json!({ "id": self.id.to_string(), "role": role.as_str() }),
            None => json!({ "id": self.id.to_string() }),
        }
    }
}

/// Task row with its owner and group relation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub groups: Vec<GroupRef>,
}

/// Group row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
}

/// User row with the groups the user belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub login: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub groups: Vec<GroupRef>,
}

impl From<&Task> for Subject {
    fn from(task: &Task) -> Self {
        Subject::new(
            SubjectType::Task,
            json!({
                "id": task.id.to_string(),
                "userId": task.user_id.to_string(),
                "completed": task.completed,
                "groups": task.groups.iter().map(GroupRef::to_value).collect::<Vec<_>>(),
            }),
        )
    }
}

impl From<&Group> for Subject {
    fn from(group: &Group) -> Self {
        Subject::new(
            SubjectType::Group,
            json!({ "id": group.id.to_string(), "name": group.name }),
        )
    }
}

impl From<&User> for Subject {
    fn from(user: &User) -> Self {
        Subject::new(
            SubjectType::User,
            json!({
                "id": user.id.to_string(),
                "login": user.login,
                "name": user.name,
                "email": user.email,
                "disabled": user.disabled,
                "groups": user.groups.iter().map(GroupRef::to_value).collect::<Vec<_>>(),
            }),
        )
    }
}
