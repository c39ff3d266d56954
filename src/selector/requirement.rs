// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Parsed selector clauses and their in-memory evaluation.
//!
//! A selector is an ordered list of requirements combined with logical AND.
//! Each requirement tests one label key. The in-memory evaluation here is
//! the reference semantics; the set-algebra compilation in
//! [`compiler`](super::compiler) must agree with it.

use std::collections::HashMap;
use std::fmt;

/// Operator of a single selector clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `key=value` or `key==value`
    Equals,
    /// `key!=value`
    NotEquals,
    /// `key`
    Exists,
    /// `!key`
    NotExists,
    /// `key in (v1,v2,...)`
    In,
    /// `key notin (v1,v2,...)`
    NotIn,
}

/// One parsed clause of a selector.
///
/// `values` is empty for Exists/NotExists, holds exactly one entry for
/// Equals/NotEquals, and one or more for In/NotIn. The parser upholds this;
/// nothing else constructs requirements from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub key: String,
    pub operator: Operator,
    pub values: Vec<String>,
}

impl Requirement {
    /// Evaluate this requirement against a resource's full label set.
    ///
    /// Absence counts as "not equal": a resource with no label for `key`
    /// satisfies NotEquals and NotIn. This mirrors the set-algebra
    /// compilation, where negative requirements subtract matching ids from
    /// the whole collection.
    pub fn matches(&self, labels: &HashMap<String, String>) -> bool {
        let value = labels.get(&self.key);
        match self.operator {
            Operator::Exists => value.is_some(),
            Operator::NotExists => value.is_none(),
            Operator::Equals => value == self.values.first(),
            Operator::NotEquals => value != self.values.first(),
            Operator::In => value.is_some_and(|v| self.values.contains(v)),
            Operator::NotIn => !value.is_some_and(|v| self.values.contains(v)),
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operator {
            Operator::Exists => write!(f, "{}", self.key),
            Operator::NotExists => write!(f, "!{}", self.key),
            Operator::Equals => write!(f, "{}={}", self.key, self.values[0]),
            Operator::NotEquals => write!(f, "{}!={}", self.key, self.values[0]),
            Operator::In => write!(f, "{} in ({})", self.key, self.values.join(",")),
            Operator::NotIn => write!(f, "{} notin ({})", self.key, self.values.join(",")),
        }
    }
}

/// An immutable, ordered sequence of requirements.
///
/// Parsed once per request and discarded after the response is produced;
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    requirements: Vec<Requirement>,
}

impl Selector {
    pub fn new(requirements: Vec<Requirement>) -> Self {
        Self { requirements }
    }

    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    /// An empty selector matches every resource.
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    /// AND of all requirements; vacuously true when empty.
    pub fn matches(&self, labels: &HashMap<String, String>) -> bool {
        self.requirements.iter().all(|r| r.matches(labels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn req(key: &str, operator: Operator, values: &[&str]) -> Requirement {
        Requirement {
            key: key.to_string(),
            operator,
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    #[test]
    fn test_equals_matches_only_same_value() {
        let r = req("env", Operator::Equals, &["prod"]);
        assert!(r.matches(&labels(&[("env", "prod")])));
        assert!(!r.matches(&labels(&[("env", "staging")])));
        assert!(!r.matches(&labels(&[])));
    }

    #[test]
    fn test_not_equals_matches_on_absence() {
        let r = req("env", Operator::NotEquals, &["prod"]);
        assert!(!r.matches(&labels(&[("env", "prod")])));
        assert!(r.matches(&labels(&[("env", "staging")])));
        // No label at all counts as "not equal".
        assert!(r.matches(&labels(&[])));
    }

    #[test]
    fn test_exists_and_not_exists() {
        let exists = req("fruit", Operator::Exists, &[]);
        let not_exists = req("fruit", Operator::NotExists, &[]);
        let with = labels(&[("fruit", "strawberry")]);
        let without = labels(&[("env", "prod")]);
        assert!(exists.matches(&with));
        assert!(!exists.matches(&without));
        assert!(!not_exists.matches(&with));
        assert!(not_exists.matches(&without));
    }

    #[test]
    fn test_in_is_set_membership() {
        let r = req("animal", Operator::In, &["dog", "horse"]);
        assert!(r.matches(&labels(&[("animal", "dog")])));
        assert!(r.matches(&labels(&[("animal", "horse")])));
        assert!(!r.matches(&labels(&[("animal", "cat")])));
        assert!(!r.matches(&labels(&[])));
    }

    #[test]
    fn test_not_in_matches_on_absence() {
        let r = req("animal", Operator::NotIn, &["dog", "horse"]);
        assert!(!r.matches(&labels(&[("animal", "dog")])));
        assert!(r.matches(&labels(&[("animal", "cat")])));
        assert!(r.matches(&labels(&[])));
    }

    #[test]
    fn test_selector_is_conjunction() {
        let selector = Selector::new(vec![
            req("fruit", Operator::NotExists, &[]),
            req("env", Operator::Equals, &["prod"]),
            req("animal", Operator::In, &["dog", "horse"]),
        ]);
        // The grammar's own example: B and C match, A/D/E do not.
        assert!(selector.matches(&labels(&[("env", "prod"), ("animal", "dog")])));
        assert!(selector.matches(&labels(&[("env", "prod"), ("animal", "horse")])));
        assert!(!selector.matches(&labels(&[("fruit", "strawberry"), ("animal", "horse")])));
        assert!(!selector.matches(&labels(&[("env", "prod")])));
        assert!(!selector.matches(&labels(&[("env", "staging"), ("animal", "dog")])));
    }

    #[test]
    fn test_empty_selector_matches_everything() {
        let selector = Selector::default();
        assert!(selector.matches(&labels(&[])));
        assert!(selector.matches(&labels(&[("env", "prod")])));
    }

    #[test]
    fn test_conflicting_duplicate_keys_are_unsatisfiable() {
        let selector = Selector::new(vec![
            req("env", Operator::Equals, &["prod"]),
            req("env", Operator::Equals, &["staging"]),
        ]);
        assert!(!selector.matches(&labels(&[("env", "prod")])));
        assert!(!selector.matches(&labels(&[("env", "staging")])));
    }

    #[test]
    fn test_requirement_display_round_trips_tokens() {
        assert_eq!(req("k", Operator::Equals, &["v"]).to_string(), "k=v");
        assert_eq!(req("k", Operator::NotEquals, &["v"]).to_string(), "k!=v");
        assert_eq!(req("k", Operator::Exists, &[]).to_string(), "k");
        assert_eq!(req("k", Operator::NotExists, &[]).to_string(), "!k");
        assert_eq!(
            req("k", Operator::In, &["a", "b"]).to_string(),
            "k in (a,b)"
        );
        assert_eq!(
            req("k", Operator::NotIn, &["a"]).to_string(),
            "k notin (a)"
        );
    }
}
