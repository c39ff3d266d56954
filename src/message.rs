// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Typed representation of accepted list-query parameters.
//!
//! The web layer deserializes query parameters into a [`ListMessage`] before
//! they reach the fetcher, so the engine never sees raw request bodies.

use serde::Deserialize;

use crate::error::{FetchError, ParseError};
use crate::pagination::{PageRequest, DEFAULT_PER_PAGE};
use crate::selector::{parse, Selector};
use crate::store::BaseFilters;

/// Validated query parameters for a list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMessage {
    /// Restrict to resources with one of these names.
    #[serde(default)]
    pub names: Option<Vec<String>>,
    /// Restrict to resources owned by one of these relationship guids.
    #[serde(default)]
    pub owner_guids: Option<Vec<String>>,
    /// Label selector expression; absent or empty matches everything.
    #[serde(default)]
    pub label_selector: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

impl ListMessage {
    /// Base-table filters carried by this message.
    pub fn base_filters(&self) -> BaseFilters {
        BaseFilters {
            names: self.names.clone(),
            owner_guids: self.owner_guids.clone(),
        }
    }

    /// Parse the label selector. No selector means the empty selector.
    pub fn selector(&self) -> Result<Selector, ParseError> {
        match &self.label_selector {
            Some(expression) => parse(expression),
            None => Ok(Selector::default()),
        }
    }

    /// Pagination knobs with defaults applied, validated.
    pub fn page_request(&self) -> Result<PageRequest, FetchError> {
        PageRequest::new(self.page.unwrap_or(1), self.per_page.unwrap_or(DEFAULT_PER_PAGE))
    }
}
