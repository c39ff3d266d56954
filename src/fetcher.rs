// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Composition of base filters, caller scope and the compiled selector
//! predicate into one paginated listing.
//!
//! The scoped and administrative entry points funnel into a single private
//! routine; only the scope argument differs, so selector semantics cannot
//! diverge between the two paths.

use std::collections::HashSet;

use tracing::debug;

use crate::error::FetchError;
use crate::message::ListMessage;
use crate::pagination::{paginate, Page};
use crate::selector::Predicate;
use crate::store::{LabelStore, Resource, ResourceStore};

/// The set of resource guids a caller is authorized to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallerScope {
    /// Administrative caller: no restriction.
    Unrestricted,
    /// Only these guids are visible. The empty set matches nothing.
    Permitted(HashSet<String>),
}

impl CallerScope {
    /// Build a restricted scope from any guid iterator.
    pub fn permitting<I, T>(guids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        CallerScope::Permitted(guids.into_iter().map(Into::into).collect())
    }

    fn permits(&self, guid: &str) -> bool {
        match self {
            CallerScope::Unrestricted => true,
            CallerScope::Permitted(guids) => guids.contains(guid),
        }
    }
}

/// Fetches paginated resource listings from a store backend.
///
/// Stateless across requests: every call parses, compiles and filters
/// freshly and shares nothing with concurrent invocations.
pub struct ResourceFetcher<S> {
    store: S,
}

impl<S> ResourceFetcher<S>
where
    S: ResourceStore + LabelStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Scoped listing. The result is always intersected with `scope`,
    /// whether or not a label selector was supplied, so authorization is
    /// never weaker than without selectors.
    pub async fn fetch(
        &self,
        message: &ListMessage,
        scope: &CallerScope,
    ) -> Result<Page<Resource>, FetchError> {
        self.fetch_scoped(message, scope).await
    }

    /// Administrative listing with no caller restriction.
    pub async fn fetch_all(&self, message: &ListMessage) -> Result<Page<Resource>, FetchError> {
        self.fetch_scoped(message, &CallerScope::Unrestricted).await
    }

    async fn fetch_scoped(
        &self,
        message: &ListMessage,
        scope: &CallerScope,
    ) -> Result<Page<Resource>, FetchError> {
        // Client errors abort before any store access.
        let request = message.page_request()?;
        let selector = message.selector()?;

        // Base-table filters narrow the collection before label filtering;
        // the empty selector compiles to Predicate::All without touching
        // the label store.
        let mut resources = self.store.list(&message.base_filters()).await?;
        let predicate = Predicate::compile(&selector, &self.store).await?;
        resources.retain(|r| scope.permits(&r.guid) && predicate.matches(&r.guid));

        // Pagination needs a total order for reproducible page boundaries:
        // creation time, then guid as the final tie-break.
        resources.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.guid.cmp(&b.guid))
        });

        debug!(
            matched = resources.len(),
            page = request.page(),
            per_page = request.per_page(),
            "fetched resource listing"
        );

        Ok(paginate(resources, request))
    }
}
