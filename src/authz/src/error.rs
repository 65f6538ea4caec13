//! Error types for the authorization engine

use crate::types::{Action, SubjectType};
use thiserror::Error;

/// Authorization engine errors
///
/// A denied check is not an error: `can` returns `Ok(false)`. Only contract
/// violations and the explicit [`crate::Ability::ensure`] helper produce one.
#[derive(Debug, Error)]
pub enum AuthzError {
    /// The resource instance carries no usable subject type discriminator
    #[error("Unresolvable subject type: {0}")]
    UnresolvableSubject(String),

    /// Invalid input (context or configuration decoding)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid rule definition
    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    /// Action denied, raised only on request by the caller
    #[error("Forbidden: cannot {action} {subject_type}")]
    Forbidden {
        action: Action,
        subject_type: SubjectType,
    },
}

/// Result type for authorization operations
pub type Result<T> = std::result::Result<T, AuthzError>;
