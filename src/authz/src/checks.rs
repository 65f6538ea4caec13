//! Named checks used by request handlers
//!
//! Thin wrappers so handlers read as intent. Instance checks propagate the
//! unresolvable-subject error; `create` checks are type-level because no
//! instance exists yet.

use crate::ability::Ability;
use crate::error::Result;
use crate::subject::Subject;
use crate::types::{Action, SubjectType};

// ============================================================================
// TASKS
// ============================================================================

pub fn can_manage_task(ability: &Ability, task: &Subject) -> Result<bool> {
    ability.can(Action::Manage, task, None)
}

pub fn can_create_task(ability: &Ability) -> bool {
    ability.can_type(Action::Create, SubjectType::Task, None)
}

pub fn can_access_task(ability: &Ability, task: &Subject) -> Result<bool> {
    ability.can(Action::Read, task, None)
}

pub fn can_modify_task(ability: &Ability, task: &Subject) -> Result<bool> {
    ability.can(Action::Update, task, None)
}

pub fn can_delete_task(ability: &Ability, task: &Subject) -> Result<bool> {
    ability.can(Action::Delete, task, None)
}

pub fn can_complete_task(ability: &Ability, task: &Subject) -> Result<bool> {
    ability.can(Action::MarkDone, task, None)
}

// ============================================================================
// GROUPS
// ============================================================================

pub fn can_manage_group(ability: &Ability, group: &Subject) -> Result<bool> {
    ability.can(Action::Manage, group, None)
}

pub fn can_create_group(ability: &Ability) -> bool {
    ability.can_type(Action::Create, SubjectType::Group, None)
}

pub fn can_access_group(ability: &Ability, group: &Subject) -> Result<bool> {
    ability.can(Action::Read, group, None)
}

pub fn can_modify_group(ability: &Ability, group: &Subject) -> Result<bool> {
    ability.can(Action::Update, group, None)
}

pub fn can_delete_group(ability: &Ability, group: &Subject) -> Result<bool> {
    ability.can(Action::Delete, group, None)
}

pub fn can_assign_to_group(ability: &Ability, group: &Subject) -> Result<bool> {
    ability.can(Action::Assign, group, None)
}

pub fn can_remove_from_group(ability: &Ability, group: &Subject) -> Result<bool> {
    ability.can(Action::Remove, group, None)
}

// ============================================================================
// USERS
// ============================================================================

pub fn can_manage_user(ability: &Ability, user: &Subject) -> Result<bool> {
    ability.can(Action::Manage, user, None)
}

pub fn can_create_user(ability: &Ability) -> bool {
    ability.can_type(Action::Create, SubjectType::User, None)
}

pub fn can_access_user(ability: &Ability, user: &Subject) -> Result<bool> {
    ability.can(Action::Read, user, None)
}

pub fn can_modify_user(ability: &Ability, user: &Subject) -> Result<bool> {
    ability.can(Action::Update, user, None)
}

pub fn can_delete_user(ability: &Ability, user: &Subject) -> Result<bool> {
    ability.can(Action::Delete, user, None)
}

pub fn can_modify_password(ability: &Ability, user: &Subject) -> Result<bool> {
    ability.can(Action::Update, user, Some("password"))
}

pub fn can_modify_disabled(ability: &Ability, user: &Subject) -> Result<bool> {
    ability.can(Action::Update, user, Some("disabled"))
}
