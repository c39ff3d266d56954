// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Error taxonomy for the fetch pipeline.
//!
//! Client errors (`InvalidSelector`, `InvalidPage`) abort the fetch before
//! any store access. Store failures are propagated unchanged; nothing here
//! retries or swallows them.

use thiserror::Error;

/// Errors surfaced by [`ResourceFetcher`](crate::fetcher::ResourceFetcher).
#[derive(Debug, Error)]
pub enum FetchError {
    /// The `label_selector` parameter is malformed (client error).
    #[error(transparent)]
    InvalidSelector(#[from] ParseError),

    /// Pagination parameters are out of range (client error).
    #[error("invalid pagination parameters: {0}")]
    InvalidPage(String),

    /// The base table or label store could not be reached.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

/// A selector clause that violates the grammar.
///
/// Carries the offending clause text so the caller can point at the exact
/// part of the selector that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid label selector clause {clause:?}: {reason}")]
pub struct ParseError {
    /// The clause (or whole selector, for bracket balance errors) at fault.
    pub clause: String,
    /// Human-readable description of the violation.
    pub reason: String,
}

impl ParseError {
    pub(crate) fn new(clause: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            clause: clause.into(),
            reason: reason.into(),
        }
    }
}

/// Failure reported by a store backend.
///
/// The payload is opaque to this crate; timeouts and cancellation are the
/// store client's contract and arrive here already materialized as errors.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct StoreError(#[from] pub anyhow::Error);
