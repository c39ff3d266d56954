// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Parser for Kubernetes-style label selector expressions.
//!
//! Grammar (comma-separated clause list, whitespace insignificant around
//! tokens):
//!
//! - `key`                      existence
//! - `!key`                     non-existence
//! - `key=value`, `key==value`  equality
//! - `key!=value`               inequality
//! - `key in (v1,v2,...)`       set membership
//! - `key notin (v1,v2,...)`    set exclusion
//!
//! Keys are one or two `/`-separated segments (an optional domain prefix is
//! treated as an opaque part of the key). Segments and values are drawn from
//! alphanumerics plus `-`, `_` and `.`. Commas inside parentheses separate
//! set values, not clauses.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ParseError;

use super::requirement::{Operator, Requirement, Selector};

const KEY: &str = r"[A-Za-z0-9._-]+(?:/[A-Za-z0-9._-]+)?";
const VALUE: &str = r"[A-Za-z0-9._-]+";

static EXISTENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^(!?)\s*({KEY})$")).expect("existence regex"));

static COMPARISON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^({KEY})\s*(==|!=|=)\s*({VALUE})$")).expect("comparison regex")
});

static SET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^({KEY})\s+(in|notin)\s*\((.*)\)$")).expect("set regex")
});

static VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^{VALUE}$")).expect("value regex"));

/// Parse a selector string into its requirement list.
///
/// Pure and deterministic: the same input always yields the same selector.
/// An empty (or all-whitespace) selector parses to zero requirements, which
/// matches every resource.
pub fn parse(input: &str) -> Result<Selector, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Selector::default());
    }

    let mut requirements = Vec::new();
    for clause in split_clauses(trimmed)? {
        requirements.push(parse_clause(clause.trim())?);
    }
    Ok(Selector::new(requirements))
}

/// Split a selector on commas at parenthesis depth zero.
///
/// `env=prod,animal in (dog,horse)` has exactly two clauses; the comma
/// between `dog` and `horse` belongs to the value list.
fn split_clauses(input: &str) -> Result<Vec<&str>, ParseError> {
    let mut clauses = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| ParseError::new(input, "unbalanced ')'"))?;
            }
            ',' if depth == 0 => {
                clauses.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(ParseError::new(
            input[start..].trim(),
            "unterminated '('",
        ));
    }
    clauses.push(&input[start..]);
    Ok(clauses)
}

fn parse_clause(clause: &str) -> Result<Requirement, ParseError> {
    if clause.is_empty() {
        return Err(ParseError::new(clause, "empty clause"));
    }

    // Set operators first: `in (...)` contains `=`-free text the other
    // patterns would reject anyway, but a set clause must never fall
    // through to the existence pattern.
    if let Some(caps) = SET_RE.captures(clause) {
        let operator = match &caps[2] {
            "in" => Operator::In,
            _ => Operator::NotIn,
        };
        return Ok(Requirement {
            key: caps[1].to_string(),
            operator,
            values: parse_value_list(clause, &caps[3])?,
        });
    }

    if let Some(caps) = COMPARISON_RE.captures(clause) {
        let operator = match &caps[2] {
            "!=" => Operator::NotEquals,
            _ => Operator::Equals,
        };
        return Ok(Requirement {
            key: caps[1].to_string(),
            operator,
            values: vec![caps[3].to_string()],
        });
    }

    if let Some(caps) = EXISTENCE_RE.captures(clause) {
        let operator = if caps[1].is_empty() {
            Operator::Exists
        } else {
            Operator::NotExists
        };
        return Ok(Requirement {
            key: caps[2].to_string(),
            operator,
            values: Vec::new(),
        });
    }

    Err(ParseError::new(clause, "unrecognized clause"))
}

/// Parse the comma-separated body of an `in`/`notin` value list.
///
/// The list must be non-empty and every entry must be a valid value token.
fn parse_value_list(clause: &str, body: &str) -> Result<Vec<String>, ParseError> {
    if body.trim().is_empty() {
        return Err(ParseError::new(clause, "empty value set"));
    }

    let mut values = Vec::new();
    for raw in body.split(',') {
        let value = raw.trim();
        if !VALUE_RE.is_match(value) {
            return Err(ParseError::new(
                clause,
                format!("invalid value {value:?} in set"),
            ));
        }
        values.push(value.to_string());
    }
    Ok(values)
}
