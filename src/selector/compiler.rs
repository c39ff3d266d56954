// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Compilation of a selector into a predicate over resource guids.
//!
//! This is the second of the two evaluation paths (the first is
//! [`Selector::matches`]). Each requirement becomes a set-membership
//! operation against the label store; the compiled predicate is the
//! intersection of the per-requirement sets. Both paths must agree and are
//! tested against each other.

use std::collections::HashSet;

use tracing::debug;

use crate::error::StoreError;
use crate::store::LabelStore;

use super::requirement::{Operator, Selector};

/// The compiled, evaluable form of a requirement list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Matches every resource. Compiled from the empty selector without any
    /// label store access, and named explicitly so composition with caller
    /// scope never depends on an absence check.
    All,
    /// Guid must be a member of `include` (when bounded) and must not be a
    /// member of `exclude`.
    ///
    /// Negative requirements (NotExists, NotEquals, NotIn) compile to
    /// exclusion sets rather than materializing "all ids minus ...", so a
    /// resource with no label row for the key satisfies them: absence
    /// counts as not-equal.
    Membership {
        include: Option<HashSet<String>>,
        exclude: HashSet<String>,
    },
}

impl Predicate {
    /// Compile a selector against the label store.
    ///
    /// Deterministic: the same requirement list against the same store
    /// state always yields the same id sets.
    pub async fn compile<S>(selector: &Selector, store: &S) -> Result<Predicate, StoreError>
    where
        S: LabelStore + ?Sized,
    {
        if selector.is_empty() {
            return Ok(Predicate::All);
        }

        let mut include: Option<HashSet<String>> = None;
        let mut exclude: HashSet<String> = HashSet::new();

        for requirement in selector.requirements() {
            match requirement.operator {
                Operator::Exists => {
                    let guids = store.guids_with_key(&requirement.key).await?;
                    intersect(&mut include, guids);
                }
                Operator::Equals => {
                    let guids = store
                        .guids_with_key_value(&requirement.key, &requirement.values[0])
                        .await?;
                    intersect(&mut include, guids);
                }
                Operator::In => {
                    let mut guids = HashSet::new();
                    for value in &requirement.values {
                        guids.extend(store.guids_with_key_value(&requirement.key, value).await?);
                    }
                    intersect(&mut include, guids);
                }
                Operator::NotExists => {
                    exclude.extend(store.guids_with_key(&requirement.key).await?);
                }
                Operator::NotEquals => {
                    exclude.extend(
                        store
                            .guids_with_key_value(&requirement.key, &requirement.values[0])
                            .await?,
                    );
                }
                Operator::NotIn => {
                    for value in &requirement.values {
                        exclude.extend(
                            store.guids_with_key_value(&requirement.key, value).await?,
                        );
                    }
                }
            }
        }

        debug!(
            requirements = selector.requirements().len(),
            included = include.as_ref().map(|s| s.len()),
            excluded = exclude.len(),
            "compiled label selector"
        );

        Ok(Predicate::Membership { include, exclude })
    }

    /// Decide whether the resource with `guid` satisfies this predicate.
    pub fn matches(&self, guid: &str) -> bool {
        match self {
            Predicate::All => true,
            Predicate::Membership { include, exclude } => {
                include.as_ref().is_none_or(|set| set.contains(guid)) && !exclude.contains(guid)
            }
        }
    }
}

/// AND a requirement's id set into the accumulated inclusion set.
fn intersect(accumulated: &mut Option<HashSet<String>>, guids: HashSet<String>) {
    match accumulated {
        None => *accumulated = Some(guids),
        Some(existing) => existing.retain(|guid| guids.contains(guid)),
    }
}
