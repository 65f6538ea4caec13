//! Authorization decision types

use crate::rule::RuleOrigin;
use crate::types::{Action, SubjectType};
use serde::{Deserialize, Serialize};

/// Outcome of one check, with the rule that settled it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityDecision {
    /// Whether the action is permitted
    pub allowed: bool,

    /// Action checked
    pub action: Action,

    /// Resolved subject type of the instance
    pub subject_type: SubjectType,

    /// Field checked, if the check was field-scoped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// Why
    pub reason: DecisionReason,
}

/// Reason for a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DecisionReason {
    /// A matching forbid rule overrode everything else
    Forbidden { rule: usize, origin: RuleOrigin },

    /// At least one allow rule matched and no forbid did
    Allowed { rule: usize, origin: RuleOrigin },

    /// Nothing matched, default deny
    NoMatchingRule,
}

impl AbilityDecision {
    pub(crate) fn new(
        action: Action,
        subject_type: SubjectType,
        field: Option<&str>,
        reason: DecisionReason,
    ) -> Self {
        Self {
            allowed: matches!(reason, DecisionReason::Allowed { .. }),
            action,
            subject_type,
            field: field.map(str::to_string),
            reason,
        }
    }

    /// Index of the deciding rule within the ability
    pub fn rule_index(&self) -> Option<usize> {
        match self.reason {
            DecisionReason::Forbidden { rule, .. } | DecisionReason::Allowed { rule, .. } => Some(rule),
            DecisionReason::NoMatchingRule => None,
        }
    }
}
