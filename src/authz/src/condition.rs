//! Structural conditions on resource instances
//!
//! A [`Condition`] is a list of clauses, each pairing a dotted field path with
//! what is expected there. All clauses must hold (AND). A clause either
//! compares the value at the path for equality, or requires that at least one
//! element of a one-to-many relation satisfies a nested condition.
//!
//! ```
//! use taskboard_authz::condition::Condition;
//! use serde_json::json;
//!
//! let in_group = Condition::new().any("groups", Condition::new().equals("id", "g-1"));
//!
//! assert!(in_group.matches(&json!({ "groups": [{ "id": "g-0" }, { "id": "g-1" }] })));
//! assert!(!in_group.matches(&json!({ "groups": [] })));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What a clause expects at its path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expected {
    /// Value at the path equals this value
    Equals(Value),
    /// The path holds a relation (array of objects, or a single object) and
    /// at least one element matches the nested condition
    Any(Condition),
}

/// Conjunction of `(path, expected)` clauses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    clauses: Vec<(String, Expected)>,
}

impl Condition {
    /// Empty condition, matches every instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `path` to equal `value`
    pub fn equals(mut self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.clauses.push((path.into(), Expected::Equals(value.into())));
        self
    }

    /// Require some element of the relation at `path` to match `nested`
    pub fn any(mut self, path: impl Into<String>, nested: Condition) -> Self {
        self.clauses.push((path.into(), Expected::Any(nested)));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clauses(&self) -> &[(String, Expected)] {
        &self.clauses
    }

    /// Evaluate against an instance
    pub fn matches(&self, instance: &Value) -> bool {
        self.clauses
            .iter()
            .all(|(path, expected)| clause_matches(lookup(instance, path), expected))
    }
}

/// Follow a dotted path, `None` when any segment is missing
pub(crate) fn lookup<'a>(instance: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(instance, |current, segment| current.get(segment))
}

fn clause_matches(actual: Option<&Value>, expected: &Expected) -> bool {
    let Some(actual) = actual else {
        return false;
    };

    match expected {
        Expected::Equals(value) => values_equal(actual, value),
        Expected::Any(nested) => match actual {
            Value::Array(items) => items.iter().any(|item| nested.matches(item)),
            Value::Object(_) => nested.matches(actual),
            _ => false,
        },
    }
}

// UUIDs travel as strings, so plain JSON equality covers every case
fn values_equal(actual: &Value, expected: &Value) -> bool {
    actual == expected
}
