//! Ability: the per-request rule set and its evaluator
//!
//! An [`Ability`] is compiled from a [`UserContext`] once per request, used for
//! every check that request makes, and dropped. It is immutable and holds no
//! caches, so role changes apply on the next request.
//!
//! # Evaluation
//!
//! ```text
//! instance → subject type → relevant rules (type, action, field) → conditions
//!                                                                     ↓
//!                          any Forbid → deny · any Allow → allow · none → deny
//! ```
//!
//! Forbid dominates allow no matter which was inserted first.

pub mod decision;

pub use decision::{AbilityDecision, DecisionReason};

use crate::config::AuthzConfig;
use crate::context::UserContext;
use crate::error::{AuthzError, Result};
use crate::roles::{rules_for_role, self_rules};
use crate::rule::Rule;
use crate::subject::Subject;
use crate::types::{Action, SubjectType};
use tracing::{debug, trace};

/// Compiles abilities under a given configuration
#[derive(Debug, Clone, Default)]
pub struct AbilityBuilder {
    config: AuthzConfig,
}

impl AbilityBuilder {
    pub fn new(config: AuthzConfig) -> Self {
        Self { config }
    }

    /// Membership rules in membership order, then the actor's self rules
    pub fn build(&self, ctx: &UserContext) -> Ability {
        let mut rules: Vec<Rule> = ctx
            .memberships
            .iter()
            .flat_map(|m| rules_for_role(m.role, m.group_id))
            .collect();
        rules.extend(self_rules(ctx.actor_id));

        debug!(
            "Ability built for actor {}: {} memberships, {} rules",
            ctx.actor_id,
            ctx.memberships.len(),
            rules.len()
        );

        Ability {
            rules,
            config: self.config.clone(),
        }
    }
}

/// Ordered rule set with the `can`/`cannot` contract
#[derive(Debug, Clone)]
pub struct Ability {
    rules: Vec<Rule>,
    config: AuthzConfig,
}

impl Ability {
    /// Compile with the default configuration
    pub fn build(ctx: &UserContext) -> Self {
        AbilityBuilder::default().build(ctx)
    }

    /// Wrap an explicit rule list, validating every rule
    pub fn from_rules(rules: Vec<Rule>) -> Result<Self> {
        for rule in &rules {
            rule.validate()?;
        }
        Ok(Self {
            rules,
            config: AuthzConfig::default(),
        })
    }

    pub fn with_config(mut self, config: AuthzConfig) -> Self {
        self.config = config;
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Whether `action` is permitted on `subject`, optionally on one field
    pub fn can(&self, action: Action, subject: &Subject, field: Option<&str>) -> Result<bool> {
        Ok(self.decide(action, subject, field)?.allowed)
    }

    pub fn cannot(&self, action: Action, subject: &Subject, field: Option<&str>) -> Result<bool> {
        self.can(action, subject, field).map(|allowed| !allowed)
    }

    /// Full decision with the deciding rule
    ///
    /// Errors only when the subject type cannot be resolved.
    pub fn decide(
        &self,
        action: Action,
        subject: &Subject,
        field: Option<&str>,
    ) -> Result<AbilityDecision> {
        let subject_type = subject.subject_type()?;
        let reason = self.resolve(action, subject_type, field, |rule| {
            rule.matches_instance(subject.data())
        });

        let decision = AbilityDecision::new(action, subject_type, field, reason);
        self.log_decision(&decision);
        Ok(decision)
    }

    /// Whether `action` could be permitted on some `subject_type` instance
    ///
    /// Used where no instance exists yet, e.g. `create`. Conditioned allow
    /// rules count; conditioned forbid rules do not, since nothing shows they
    /// apply.
    pub fn can_type(&self, action: Action, subject_type: SubjectType, field: Option<&str>) -> bool {
        let reason = self.resolve(action, subject_type, field, |rule| {
            !(rule.is_forbid() && rule.is_conditional())
        });

        let decision = AbilityDecision::new(action, subject_type, field, reason);
        self.log_decision(&decision);
        decision.allowed
    }

    pub fn cannot_type(&self, action: Action, subject_type: SubjectType, field: Option<&str>) -> bool {
        !self.can_type(action, subject_type, field)
    }

    /// Subset of `candidates` the actor may apply `action` to, in input order
    pub fn permitted_fields<'a>(
        &self,
        action: Action,
        subject: &Subject,
        candidates: impl IntoIterator<Item = &'a str>,
    ) -> Result<Vec<String>> {
        let mut permitted = Vec::new();
        for field in candidates {
            if self.can(action, subject, Some(field))? {
                permitted.push(field.to_string());
            }
        }
        Ok(permitted)
    }

    /// `Ok(())` when permitted, otherwise `AuthzError::Forbidden`
    pub fn ensure(&self, action: Action, subject: &Subject, field: Option<&str>) -> Result<()> {
        let decision = self.decide(action, subject, field)?;
        if decision.allowed {
            Ok(())
        } else {
            Err(AuthzError::Forbidden {
                action,
                subject_type: decision.subject_type,
            })
        }
    }

    fn resolve(
        &self,
        action: Action,
        subject_type: SubjectType,
        field: Option<&str>,
        applies: impl Fn(&Rule) -> bool,
    ) -> DecisionReason {
        let mut first_allow = None;

        for (index, rule) in self.rules.iter().enumerate() {
            if !rule.is_relevant(action, subject_type, field) || !applies(rule) {
                continue;
            }
            if rule.is_forbid() {
                return DecisionReason::Forbidden {
                    rule: index,
                    origin: rule.origin,
                };
            }
            first_allow.get_or_insert(DecisionReason::Allowed {
                rule: index,
                origin: rule.origin,
            });
        }

        first_allow.unwrap_or(DecisionReason::NoMatchingRule)
    }

    fn log_decision(&self, decision: &AbilityDecision) {
        let field = decision.field.as_deref().unwrap_or("-");
        let outcome = if decision.allowed { "ALLOW" } else { "DENY" };

        macro_rules! emit {
            ($level:ident) => {
                $level!(
                    action = %decision.action,
                    subject_type = %decision.subject_type,
                    field,
                    outcome,
                    reason = ?decision.reason,
                    "Decision"
                )
            };
        }

        if self.config.log_decisions {
            emit!(debug);
        } else {
            emit!(trace);
        }
    }
}
