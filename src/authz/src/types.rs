//! Core authorization types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Action requested on a subject
///
/// `Manage` is the action wildcard: a rule granting it covers every action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    Manage,
    Assign,
    Remove,
    MarkDone,
}

impl Action {
    /// Every action, wildcard included
    pub const ALL: [Action; 8] = [
        Action::Create,
        Action::Read,
        Action::Update,
        Action::Delete,
        Action::Manage,
        Action::Assign,
        Action::Remove,
        Action::MarkDone,
    ];

    /// Wire spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Manage => "manage",
            Action::Assign => "assign",
            Action::Remove => "remove",
            Action::MarkDone => "markDone",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| format!("unknown action '{}'", s))
    }
}

/// Resource category a rule applies to
///
/// `All` only ever appears on rules; a concrete resource is always a
/// `Task`, `Group` or `User`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SubjectType {
    Task,
    Group,
    User,
    #[serde(rename = "all")]
    All,
}

impl SubjectType {
    /// Concrete resource types, wildcard excluded
    pub const CONCRETE: [SubjectType; 3] = [SubjectType::Task, SubjectType::Group, SubjectType::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectType::Task => "Task",
            SubjectType::Group => "Group",
            SubjectType::User => "User",
            SubjectType::All => "all",
        }
    }

    /// Whether a rule declared for `self` covers a resource of type `other`
    pub fn covers(&self, other: SubjectType) -> bool {
        *self == SubjectType::All || *self == other
    }
}

impl fmt::Display for SubjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Task" => Ok(SubjectType::Task),
            "Group" => Ok(SubjectType::Group),
            "User" => Ok(SubjectType::User),
            "all" => Ok(SubjectType::All),
            other => Err(format!("unknown subject type '{}'", other)),
        }
    }
}

/// Role held by an actor inside one group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleName {
    Admin,
    Manager,
    Editor,
    User,
    Viewer,
    None,
}

impl RoleName {
    pub const ALL: [RoleName; 6] = [
        RoleName::Admin,
        RoleName::Manager,
        RoleName::Editor,
        RoleName::User,
        RoleName::Viewer,
        RoleName::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::Admin => "admin",
            RoleName::Manager => "manager",
            RoleName::Editor => "editor",
            RoleName::User => "user",
            RoleName::Viewer => "viewer",
            RoleName::None => "none",
        }
    }

    /// Parse a role name, mapping anything unknown to `None`
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or(RoleName::None)
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoleName::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| format!("unknown role '{}'", s))
    }
}

/// Rule polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Grant the action
    Allow,
    /// Deny the action, overriding any matching allow
    Forbid,
}
