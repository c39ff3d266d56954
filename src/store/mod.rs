// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Store collaborator contracts.
//!
//! The engine issues read-only queries through these traits and makes no
//! transactional or locking assumptions of its own; read-committed snapshot
//! semantics from the backing store are sufficient. Timeouts belong to the
//! store client and surface here as [`StoreError`].

mod memory;

pub use memory::InMemoryStore;

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// A row of the resource base table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub guid: String,
    pub name: String,
    /// Guid of the owning relationship (e.g. the parent organization).
    pub owner_guid: String,
    pub created_at: DateTime<Utc>,
}

/// Base-table predicates applied before label filtering.
///
/// `None` means "no filter on this column"; an empty vector matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseFilters {
    pub names: Option<Vec<String>>,
    pub owner_guids: Option<Vec<String>>,
}

/// Read access to the resource base table.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// List resources matching the base filters, in unspecified order.
    async fn list(&self, filters: &BaseFilters) -> Result<Vec<Resource>, StoreError>;
}

/// Read access to `(resource guid, key, value)` label rows.
///
/// One row per label per resource; at most one label per `(resource, key)`.
#[async_trait]
pub trait LabelStore: Send + Sync {
    /// Guids of resources carrying any label row for `key`.
    async fn guids_with_key(&self, key: &str) -> Result<HashSet<String>, StoreError>;

    /// Guids of resources carrying the label row `key=value`.
    async fn guids_with_key_value(
        &self,
        key: &str,
        value: &str,
    ) -> Result<HashSet<String>, StoreError>;

    /// Full label sets for the given resources, keyed by guid. Resources
    /// without labels are absent from the result.
    async fn labels_for(
        &self,
        guids: &[String],
    ) -> Result<HashMap<String, HashMap<String, String>>, StoreError>;
}
