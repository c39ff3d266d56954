// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Pagination parameters and result-page metadata.
//!
//! The metadata shape (`total_results`, `total_pages`, `first`, `last`,
//! `next`, `previous`) is part of the public API contract and must not
//! change; existing clients navigate listings by it.

use serde::Serialize;

use crate::error::FetchError;

/// Default page size when the request does not specify one.
pub const DEFAULT_PER_PAGE: u32 = 50;

/// Hard cap on the page size a caller may request.
pub const MAX_PER_PAGE: u32 = 5_000;

/// Validated pagination parameters. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Validate raw pagination knobs. Zero values and oversized pages are
    /// rejected before any store access.
    pub fn new(page: u32, per_page: u32) -> Result<Self, FetchError> {
        if page == 0 {
            return Err(FetchError::InvalidPage(
                "page must be a positive integer".to_string(),
            ));
        }
        if per_page == 0 || per_page > MAX_PER_PAGE {
            return Err(FetchError::InvalidPage(format!(
                "per_page must be between 1 and {MAX_PER_PAGE}"
            )));
        }
        Ok(Self { page, per_page })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// Reference to another page of the same listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRef {
    pub page: u32,
    pub per_page: u32,
}

/// Pagination metadata accompanying every result page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    pub total_results: u64,
    pub total_pages: u32,
    pub first: PageRef,
    pub last: PageRef,
    pub next: Option<PageRef>,
    pub previous: Option<PageRef>,
}

/// One page of a filtered, totally ordered collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub resources: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Slice an ordered collection into the requested page.
///
/// A page past the end of the collection is a valid empty page; pagination
/// metadata stays correct either way. `total_pages` is never below 1, even
/// for an empty collection.
pub(crate) fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total_results = items.len() as u64;
    let per_page = request.per_page;
    let total_pages = (total_results.div_ceil(per_page as u64) as u32).max(1);

    let start = (request.page as usize - 1).saturating_mul(per_page as usize);
    let resources: Vec<T> = items
        .into_iter()
        .skip(start)
        .take(per_page as usize)
        .collect();

    let page_ref = |page: u32| PageRef { page, per_page };
    let pagination = PaginationMeta {
        total_results,
        total_pages,
        first: page_ref(1),
        last: page_ref(total_pages),
        next: (request.page < total_pages).then(|| page_ref(request.page + 1)),
        previous: (request.page > 1).then(|| page_ref(request.page - 1)),
    };

    Page {
        resources,
        pagination,
    }
}
