//! # Taskboard Authorization Engine
//!
//! Capability evaluator deciding whether an actor may perform an action on a
//! task, group or user.
//!
//! ## Features
//!
//! - **Fixed role table** mapping each group role to the rules it grants
//! - **Per-request abilities** compiled from the actor's memberships, never cached
//! - **Structural conditions** over instance fields and group relations
//! - **Field scoping** for partial updates (a manager may disable a user but
//!   not change their password)
//! - **Forbid dominates allow** regardless of rule order
//! - **Pure and synchronous**: no I/O, no shared mutable state
//!
//! ## Example
//!
//! ```rust
//! use taskboard_authz::{Ability, Action, GroupRef, RoleName, Subject, Task, UserContext};
//! use uuid::Uuid;
//!
//! let actor = Uuid::new_v4();
//! let group = Uuid::new_v4();
//! let ctx = UserContext::new(actor).with_membership(group, RoleName::Editor);
//! let ability = Ability::build(&ctx);
//!
//! let task = Subject::from(&Task {
//!     id: Uuid::new_v4(),
//!     user_id: Uuid::new_v4(),
//!     completed: true,
//!     groups: vec![GroupRef::new(group)],
//! });
//!
//! assert!(ability.can(Action::Update, &task, None).unwrap());
//! // Editors may not delete completed tasks
//! assert!(ability.cannot(Action::Delete, &task, None).unwrap());
//! ```

pub mod ability;
pub mod checks;
pub mod condition;
pub mod config;
pub mod context;
pub mod error;
pub mod roles;
pub mod rule;
pub mod subject;
pub mod types;

// Re-export commonly used types
pub use ability::{Ability, AbilityBuilder, AbilityDecision, DecisionReason};
pub use condition::{Condition, Expected};
pub use config::AuthzConfig;
pub use context::{Membership, UserContext};
pub use error::{AuthzError, Result};
pub use roles::{rules_for_role, self_rules};
pub use rule::{Rule, RuleOrigin};
pub use subject::{Group, GroupRef, Subject, Task, User};
pub use types::{Action, Polarity, RoleName, SubjectType};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
