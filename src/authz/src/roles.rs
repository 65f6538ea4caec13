//! Role policy table
//!
//! Fixed mapping from a role held in a group to the rules it grants. Task and
//! user grants are scoped through the instance's `groups` relation; group
//! grants through the group's own `id`.

use crate::condition::Condition;
use crate::rule::{Rule, RuleOrigin};
use crate::types::{Action, RoleName, SubjectType};
use uuid::Uuid;

/// Fields a manager may update on users of their group. `password` is
/// deliberately absent.
pub const MANAGER_USER_FIELDS: [&str; 3] = ["disabled", "name", "email"];

/// Rules granted by `role` in group `group_id`
pub fn rules_for_role(role: RoleName, group_id: Uuid) -> Vec<Rule> {
    let rules = match role {
        RoleName::Admin => vec![Rule::allow([Action::Manage], SubjectType::All)],
        RoleName::Manager => vec![
            Rule::allow(
                [Action::Assign, Action::Remove, Action::Update, Action::Read],
                SubjectType::Group,
            )
            .when(group_itself(group_id)),
            Rule::allow([Action::Manage], SubjectType::Task).when(member_of(group_id)),
            Rule::allow([Action::Update], SubjectType::User)
                .when(member_of(group_id))
                .on_fields(MANAGER_USER_FIELDS),
        ],
        RoleName::Editor => vec![
            Rule::allow(
                [Action::Create, Action::Update, Action::Delete, Action::Read],
                SubjectType::Task,
            )
            .when(member_of(group_id)),
            Rule::allow([Action::Read], SubjectType::Group),
            Rule::forbid([Action::Delete], SubjectType::Task)
                .when(Condition::new().equals("completed", true)),
        ],
        RoleName::User => vec![
            Rule::allow([Action::Read, Action::MarkDone], SubjectType::Task)
                .when(member_of(group_id)),
            Rule::allow([Action::Read], SubjectType::Group),
        ],
        RoleName::Viewer => vec![
            Rule::allow([Action::Read], SubjectType::Task).when(member_of(group_id)),
            Rule::allow([Action::Read], SubjectType::Group),
        ],
        RoleName::None => Vec::new(),
    };

    let origin = RuleOrigin::Membership { role, group_id };
    rules.into_iter().map(|rule| rule.with_origin(origin)).collect()
}

/// Rules every actor holds regardless of memberships
pub fn self_rules(actor_id: Uuid) -> Vec<Rule> {
    let actor = actor_id.to_string();

    vec![
        Rule::allow([Action::Read], SubjectType::User).when(Condition::new().equals("id", actor.clone())),
        Rule::allow([Action::Update], SubjectType::User).when(Condition::new().equals("id", actor.clone())),
        Rule::allow([Action::Manage], SubjectType::Task).when(Condition::new().equals("userId", actor)),
    ]
    .into_iter()
    .map(|rule| rule.with_origin(RuleOrigin::SelfRule))
    .collect()
}

fn member_of(group_id: Uuid) -> Condition {
    Condition::new().any("groups", Condition::new().equals("id", group_id.to_string()))
}

fn group_itself(group_id: Uuid) -> Condition {
    Condition::new().equals("id", group_id.to_string())
}
