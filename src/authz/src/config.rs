//! Engine configuration
//!
//! Nothing here changes the role table or the evaluation algorithm; the
//! settings only govern how contexts are decoded and how loudly decisions are
//! logged. Embeddable in a host configuration file:
//!
//! ```toml
//! [authz]
//! strict_roles = true
//! log_decisions = false
//! ```
//!
//! Environment variables read by [`AuthzConfig::from_env`]:
//! - `AUTHZ_STRICT_ROLES` - reject unknown role names (default: false)
//! - `AUTHZ_LOG_DECISIONS` - log every decision at debug level (default: false)

use crate::error::{AuthzError, Result};
use serde::{Deserialize, Serialize};

pub const ENV_STRICT_ROLES: &str = "AUTHZ_STRICT_ROLES";
pub const ENV_LOG_DECISIONS: &str = "AUTHZ_LOG_DECISIONS";

/// Authorization engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthzConfig {
    /// Reject unknown role names when decoding a user context instead of
    /// treating them as `none`
    #[serde(default)]
    pub strict_roles: bool,

    /// Log each decision at debug level rather than trace
    #[serde(default)]
    pub log_decisions: bool,
}

impl Default for AuthzConfig {
    fn default() -> Self {
        Self {
            strict_roles: false,
            log_decisions: false,
        }
    }
}

impl AuthzConfig {
    /// Defaults overridden by any `AUTHZ_*` variables that are set
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_STRICT_ROLES) {
            config.strict_roles = parse_flag(ENV_STRICT_ROLES, &raw)?;
        }
        if let Some(raw) = lookup(ENV_LOG_DECISIONS) {
            config.log_decisions = parse_flag(ENV_LOG_DECISIONS, &raw)?;
        }

        Ok(config)
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(AuthzError::InvalidInput(format!(
            "{} must be a boolean, got '{}'",
            key, raw
        ))),
    }
}
