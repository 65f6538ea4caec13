//! Shared fixtures for integration tests

#![allow(dead_code)]

use serde_json::json;
use taskboard_authz::{Ability, RoleName, Subject, SubjectType, UserContext};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Install a fmt subscriber honouring `RUST_LOG`; repeated calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub struct Fixture {
    pub actor: Uuid,
    pub group: Uuid,
    pub other_group: Uuid,
    pub other_user: Uuid,
}

impl Fixture {
    pub fn new() -> Self {
        init_tracing();
        Self {
            actor: Uuid::new_v4(),
            group: Uuid::new_v4(),
            other_group: Uuid::new_v4(),
            other_user: Uuid::new_v4(),
        }
    }

    pub fn ability_with(&self, role: RoleName) -> Ability {
        Ability::build(&UserContext::new(self.actor).with_membership(self.group, role))
    }

    pub fn ability_without_groups(&self) -> Ability {
        Ability::build(&UserContext::new(self.actor))
    }

    /// Task owned by someone else, in `group`
    pub fn task_in(&self, group: Uuid, completed: bool) -> Subject {
        Subject::new(
            SubjectType::Task,
            json!({
                "id": Uuid::new_v4().to_string(),
                "userId": self.other_user.to_string(),
                "completed": completed,
                "groups": [{ "id": group.to_string() }],
            }),
        )
    }

    pub fn task_owned_by(&self, owner: Uuid) -> Subject {
        Subject::new(
            SubjectType::Task,
            json!({
                "id": Uuid::new_v4().to_string(),
                "userId": owner.to_string(),
                "completed": false,
                "groups": [],
            }),
        )
    }

    pub fn group(&self, id: Uuid) -> Subject {
        Subject::new(SubjectType::Group, json!({ "id": id.to_string(), "name": "team" }))
    }

    pub fn user(&self, id: Uuid, groups: &[Uuid]) -> Subject {
        let groups: Vec<_> = groups.iter().map(|g| json!({ "id": g.to_string() })).collect();
        Subject::new(
            SubjectType::User,
            json!({ "id": id.to_string(), "name": "someone", "groups": groups }),
        )
    }
}
