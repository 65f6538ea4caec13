//! Role-by-role behaviour of compiled abilities
//!
//! Each section builds an ability for one role on group G and checks the
//! grants it must and must not carry.

mod common;

use common::Fixture;
use serde_json::json;
use taskboard_authz::{
    Ability, Action, AuthzConfig, AuthzError, DecisionReason, RoleName, RuleOrigin, Subject,
    SubjectType, UserContext,
};

// ============================================================================
// NO MEMBERSHIPS
// ============================================================================

#[test]
fn test_no_groups_own_profile() {
    let fx = Fixture::new();
    let ability = fx.ability_without_groups();
    let me = fx.user(fx.actor, &[]);

    assert!(ability.can(Action::Read, &me, None).unwrap());
    assert!(ability.can(Action::Update, &me, None).unwrap());
    assert!(ability.cannot(Action::Delete, &me, None).unwrap());
}

#[test]
fn test_no_groups_other_profiles() {
    let fx = Fixture::new();
    let ability = fx.ability_without_groups();
    let other = fx.user(fx.other_user, &[]);

    for action in Action::ALL {
        assert!(!ability.can(action, &other, None).unwrap(), "{} on other user", action);
    }
    assert!(!ability.can_type(Action::Manage, SubjectType::User, None));
}

#[test]
fn test_no_groups_own_tasks() {
    let fx = Fixture::new();
    let ability = fx.ability_without_groups();
    let mine = fx.task_owned_by(fx.actor);
    let theirs = fx.task_owned_by(fx.other_user);

    for action in Action::ALL {
        assert!(ability.can(action, &mine, None).unwrap(), "{} on own task", action);
        assert!(!ability.can(action, &theirs, None).unwrap(), "{} on foreign task", action);
    }
}

#[test]
fn test_no_groups_no_group_actions() {
    let fx = Fixture::new();
    let ability = fx.ability_without_groups();
    let group = fx.group(fx.group);

    for action in Action::ALL {
        assert!(!ability.can(action, &group, None).unwrap());
        assert!(!ability.can_type(action, SubjectType::Group, None));
    }
}

// ============================================================================
// VIEWER
// ============================================================================

#[test]
fn test_viewer_reads_group_tasks_only() {
    let fx = Fixture::new();
    let ability = fx.ability_with(RoleName::Viewer);
    let task = fx.task_in(fx.group, false);

    assert!(ability.can(Action::Read, &task, None).unwrap());
    for action in [Action::Update, Action::Delete, Action::MarkDone] {
        assert!(!ability.can(action, &task, None).unwrap(), "viewer should not {}", action);
    }

    let outside = fx.task_in(fx.other_group, false);
    assert!(!ability.can(Action::Read, &outside, None).unwrap());
}

#[test]
fn test_viewer_reads_groups() {
    let fx = Fixture::new();
    let ability = fx.ability_with(RoleName::Viewer);

    assert!(ability.can(Action::Read, &fx.group(fx.group), None).unwrap());
    assert!(ability.can(Action::Read, &fx.group(fx.other_group), None).unwrap());
    assert!(ability.can_type(Action::Read, SubjectType::Group, None));
    assert!(!ability.can(Action::Update, &fx.group(fx.group), None).unwrap());
}

// ============================================================================
// USER
// ============================================================================

#[test]
fn test_user_reads_and_completes() {
    let fx = Fixture::new();
    let ability = fx.ability_with(RoleName::User);
    let task = fx.task_in(fx.group, false);

    assert!(ability.can(Action::Read, &task, None).unwrap());
    assert!(ability.can(Action::MarkDone, &task, None).unwrap());
    assert!(!ability.can(Action::Update, &task, None).unwrap());
    assert!(!ability.can(Action::Delete, &task, None).unwrap());
    assert!(ability.can_type(Action::Read, SubjectType::Group, None));
}

// ============================================================================
// EDITOR
// ============================================================================

#[test]
fn test_editor_crud_on_open_tasks() {
    let fx = Fixture::new();
    let ability = fx.ability_with(RoleName::Editor);
    let task = fx.task_in(fx.group, false);

    for action in [Action::Create, Action::Read, Action::Update, Action::Delete] {
        assert!(ability.can(action, &task, None).unwrap(), "editor should {}", action);
    }
    assert!(ability.can_type(Action::Create, SubjectType::Task, None));
}

#[test]
fn test_editor_cannot_delete_completed_task() {
    let fx = Fixture::new();
    let ability = fx.ability_with(RoleName::Editor);
    let done = fx.task_in(fx.group, true);

    assert!(!ability.can(Action::Delete, &done, None).unwrap());
    assert!(ability.cannot(Action::Delete, &done, None).unwrap());
    assert!(ability.can(Action::Update, &done, None).unwrap());

    let decision = ability.decide(Action::Delete, &done, None).unwrap();
    assert!(matches!(
        decision.reason,
        DecisionReason::Forbidden {
            origin: RuleOrigin::Membership { role: RoleName::Editor, .. },
            ..
        }
    ));
}

#[test]
fn test_editor_forbid_overrides_ownership() {
    let fx = Fixture::new();
    let ability = fx.ability_with(RoleName::Editor);
    let own_done = Subject::new(
        SubjectType::Task,
        json!({ "userId": fx.actor.to_string(), "completed": true, "groups": [] }),
    );

    assert!(ability.can(Action::Update, &own_done, None).unwrap());
    assert!(!ability.can(Action::Delete, &own_done, None).unwrap());
}

// ============================================================================
// MANAGER
// ============================================================================

#[test]
fn test_manager_group_actions() {
    let fx = Fixture::new();
    let ability = fx.ability_with(RoleName::Manager);
    let group = fx.group(fx.group);

    for action in [Action::Assign, Action::Remove, Action::Update, Action::Read] {
        assert!(ability.can(action, &group, None).unwrap(), "manager should {}", action);
    }
    assert!(!ability.can(Action::Delete, &group, None).unwrap());
    assert!(!ability.can(Action::Create, &group, None).unwrap());
    assert!(!ability.can_type(Action::Delete, SubjectType::Group, None));
    assert!(!ability.can_type(Action::Create, SubjectType::Group, None));

    let other = fx.group(fx.other_group);
    assert!(!ability.can(Action::Assign, &other, None).unwrap());
}

#[test]
fn test_manager_manages_group_tasks() {
    let fx = Fixture::new();
    let ability = fx.ability_with(RoleName::Manager);

    let task = fx.task_in(fx.group, true);
    for action in Action::ALL {
        assert!(ability.can(action, &task, None).unwrap(), "manager should {}", action);
    }
    assert!(!ability.can(Action::Read, &fx.task_in(fx.other_group, false), None).unwrap());
}

#[test]
fn test_manager_user_fields() {
    let fx = Fixture::new();
    let ability = fx.ability_with(RoleName::Manager);
    let member = fx.user(fx.other_user, &[fx.group]);

    for field in ["disabled", "name", "email"] {
        assert!(ability.can(Action::Update, &member, Some(field)).unwrap(), "field {}", field);
    }
    assert!(!ability.can(Action::Update, &member, Some("password")).unwrap());
    assert!(
        !ability.can(Action::Update, &member, None).unwrap(),
        "field-scoped grant must not allow whole-record update"
    );

    let outsider = fx.user(fx.other_user, &[fx.other_group]);
    assert!(!ability.can(Action::Update, &outsider, Some("disabled")).unwrap());
}

#[test]
fn test_manager_permitted_fields() {
    let fx = Fixture::new();
    let ability = fx.ability_with(RoleName::Manager);
    let member = fx.user(fx.other_user, &[fx.group]);

    let fields = ability
        .permitted_fields(Action::Update, &member, ["name", "password", "login", "disabled"])
        .unwrap();
    assert_eq!(fields, vec!["name".to_string(), "disabled".to_string()]);

    let me = fx.user(fx.actor, &[fx.group]);
    let fields = ability
        .permitted_fields(Action::Update, &me, ["name", "password"])
        .unwrap();
    assert_eq!(fields.len(), 2);
}

// ============================================================================
// ADMIN
// ============================================================================

#[test]
fn test_admin_can_everything() {
    let fx = Fixture::new();
    let ability = fx.ability_with(RoleName::Admin);

    let subjects = [
        fx.task_in(fx.other_group, true),
        fx.task_owned_by(fx.other_user),
        fx.group(fx.other_group),
        fx.user(fx.other_user, &[]),
    ];

    for subject in &subjects {
        for action in Action::ALL {
            assert!(ability.can(action, subject, None).unwrap());
            assert!(ability.can(action, subject, Some("password")).unwrap());
        }
    }
    for subject_type in [SubjectType::Task, SubjectType::Group, SubjectType::User, SubjectType::All] {
        assert!(ability.can_type(Action::Manage, subject_type, None));
    }
}

// ============================================================================
// ROLE NONE, MULTIPLE MEMBERSHIPS, DECODING
// ============================================================================

#[test]
fn test_none_role_grants_nothing_extra() {
    let fx = Fixture::new();
    let with_none = fx.ability_with(RoleName::None);
    let without = fx.ability_without_groups();

    assert_eq!(with_none.rules(), without.rules());
    assert!(!with_none.can(Action::Read, &fx.task_in(fx.group, false), None).unwrap());
}

#[test]
fn test_roles_are_scoped_per_group() {
    let fx = Fixture::new();
    let ctx = UserContext::new(fx.actor)
        .with_membership(fx.group, RoleName::Viewer)
        .with_membership(fx.other_group, RoleName::Editor);
    let ability = Ability::build(&ctx);

    assert!(!ability.can(Action::Update, &fx.task_in(fx.group, false), None).unwrap());
    assert!(ability.can(Action::Update, &fx.task_in(fx.other_group, false), None).unwrap());
}

#[test]
fn test_task_in_several_groups() {
    let fx = Fixture::new();
    let ability = fx.ability_with(RoleName::Viewer);
    let task = Subject::new(
        SubjectType::Task,
        json!({
            "userId": fx.other_user.to_string(),
            "groups": [{ "id": fx.other_group.to_string() }, { "id": fx.group.to_string() }],
        }),
    );

    assert!(ability.can(Action::Read, &task, None).unwrap());
}

#[test]
fn test_decoded_context_with_unknown_role() {
    let fx = Fixture::new();
    let value = json!({
        "id": fx.actor.to_string(),
        "groups": [{ "id": fx.group.to_string(), "role": "superuser" }],
    });

    let ctx = UserContext::from_json(&value, &AuthzConfig::default()).unwrap();
    let ability = Ability::build(&ctx);
    assert!(!ability.can(Action::Read, &fx.task_in(fx.group, false), None).unwrap());

    let strict = AuthzConfig {
        strict_roles: true,
        ..Default::default()
    };
    assert!(matches!(
        UserContext::from_json(&value, &strict),
        Err(AuthzError::InvalidInput(_))
    ));
}

#[test]
fn test_untagged_instances() {
    let fx = Fixture::new();
    let ability = fx.ability_without_groups();

    let me = Subject::untagged(json!({ "__typename": "User", "id": fx.actor.to_string() }));
    assert!(ability.can(Action::Read, &me, None).unwrap());

    let mine = Subject::untagged(json!({ "type": "Task", "userId": fx.actor.to_string() }));
    assert!(ability.can(Action::Delete, &mine, None).unwrap());

    let shapeless = Subject::untagged(json!({ "userId": fx.actor.to_string() }));
    assert!(matches!(
        ability.can(Action::Read, &shapeless, None),
        Err(AuthzError::UnresolvableSubject(_))
    ));
}

#[test]
fn test_rebuild_reflects_role_change() {
    let fx = Fixture::new();
    let task = fx.task_in(fx.group, false);

    let before = fx.ability_with(RoleName::Viewer);
    assert!(!before.can(Action::Update, &task, None).unwrap());

    let after = fx.ability_with(RoleName::Editor);
    assert!(after.can(Action::Update, &task, None).unwrap());
    assert!(!before.can(Action::Update, &task, None).unwrap());
}
