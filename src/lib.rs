// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Label-selector query engine for multi-tenant resource listings.
//!
//! Parses Kubernetes-style selector expressions such as
//! `!fruit,env=prod,animal in (dog,horse)`, compiles them into predicates
//! over a relational label store, and composes the result with caller
//! authorization scoping and name/relationship/pagination filters.
//!
//! The pipeline for one request:
//!
//! ```text
//! ListMessage -> selector::parse -> Predicate::compile -> ResourceFetcher
//!             -> Page<Resource> (+ pagination metadata)
//! ```
//!
//! Everything is request-scoped and read-only against the store; concurrent
//! invocations share no mutable state.

pub mod error;
pub mod fetcher;
pub mod message;
pub mod pagination;
pub mod selector;
pub mod store;

pub use error::{FetchError, ParseError, StoreError};
pub use fetcher::{CallerScope, ResourceFetcher};
pub use message::ListMessage;
pub use pagination::{Page, PageRef, PageRequest, PaginationMeta};
pub use selector::{Operator, Predicate, Requirement, Selector};
pub use store::{BaseFilters, InMemoryStore, LabelStore, Resource, ResourceStore};
