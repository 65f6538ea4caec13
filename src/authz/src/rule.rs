//! Rule definition and matching

use crate::condition::Condition;
use crate::error::{AuthzError, Result};
use crate::types::{Action, Polarity, RoleName, SubjectType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use uuid::Uuid;

/// Where a rule came from, reported in decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleOrigin {
    /// Granted by a role held in a group
    Membership { role: RoleName, group_id: Uuid },
    /// Fixed rule every actor holds over their own profile and tasks
    SelfRule,
    /// Built directly, outside the role table
    Custom,
}

/// One authorization statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Actions covered (never empty)
    pub actions: BTreeSet<Action>,

    /// Subject type covered, `All` for every type
    pub subject_type: SubjectType,

    /// Optional structural condition on the instance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,

    /// Optional field restriction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeSet<String>>,

    /// Allow or forbid
    pub polarity: Polarity,

    /// Provenance, for decision reporting
    pub origin: RuleOrigin,
}

impl Rule {
    /// Allow `actions` on `subject_type`
    pub fn allow(actions: impl IntoIterator<Item = Action>, subject_type: SubjectType) -> Self {
        Self::new(Polarity::Allow, actions, subject_type)
    }

    /// Forbid `actions` on `subject_type`
    pub fn forbid(actions: impl IntoIterator<Item = Action>, subject_type: SubjectType) -> Self {
        Self::new(Polarity::Forbid, actions, subject_type)
    }

    fn new(
        polarity: Polarity,
        actions: impl IntoIterator<Item = Action>,
        subject_type: SubjectType,
    ) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            subject_type,
            condition: None,
            fields: None,
            polarity,
            origin: RuleOrigin::Custom,
        }
    }

    /// Attach a condition; an empty one leaves the rule unconditional
    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = if condition.is_empty() {
            None
        } else {
            Some(condition)
        };
        self
    }

    /// Restrict the rule to the given fields
    pub fn on_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_origin(mut self, origin: RuleOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Validate the rule definition
    pub fn validate(&self) -> Result<()> {
        if self.actions.is_empty() {
            return Err(AuthzError::InvalidRule(format!(
                "rule on {} has no actions",
                self.subject_type
            )));
        }

        if let Some(fields) = &self.fields {
            if fields.is_empty() || fields.iter().any(|f| f.is_empty()) {
                return Err(AuthzError::InvalidRule(format!(
                    "rule on {} has an empty field scope",
                    self.subject_type
                )));
            }
        }

        Ok(())
    }

    pub fn is_forbid(&self) -> bool {
        self.polarity == Polarity::Forbid
    }

    /// Carries a condition with at least one clause
    pub fn is_conditional(&self) -> bool {
        self.condition.as_ref().is_some_and(|c| !c.is_empty())
    }

    /// Action matches directly or through the `manage` wildcard
    pub fn covers_action(&self, action: Action) -> bool {
        self.actions.contains(&action) || self.actions.contains(&Action::Manage)
    }

    /// Subject type, action and field all line up, condition not consulted
    ///
    /// A field-scoped rule only counts when the caller names a field it lists;
    /// it never answers an unscoped check.
    pub fn is_relevant(&self, action: Action, subject_type: SubjectType, field: Option<&str>) -> bool {
        self.subject_type.covers(subject_type)
            && self.covers_action(action)
            && self.covers_field(field)
    }

    fn covers_field(&self, field: Option<&str>) -> bool {
        match (&self.fields, field) {
            (None, _) => true,
            (Some(fields), Some(field)) => fields.contains(field),
            (Some(_), None) => false,
        }
    }

    /// Condition holds for the instance (absent condition always holds)
    pub fn matches_instance(&self, instance: &Value) -> bool {
        self.condition
            .as_ref()
            .map_or(true, |condition| condition.matches(instance))
    }
}
