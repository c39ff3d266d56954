// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! In-memory reference store.
//!
//! Backs the test suite and doubles as the specification of the store
//! contracts: label rows are unique per `(resource, key)` and are deleted
//! with their owning resource.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StoreError;

use super::{BaseFilters, LabelStore, Resource, ResourceStore};

/// Epoch base for synthetic creation timestamps.
const CREATED_AT_BASE: i64 = 1_600_000_000;

#[derive(Debug, Clone)]
struct LabelRow {
    resource_guid: String,
    key: String,
    value: String,
}

/// Vec-backed store over resource and label rows.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    resources: Vec<Resource>,
    labels: Vec<LabelRow>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a resource. `created_offset_secs` orders creation times
    /// deterministically without the tests caring about wall clocks.
    pub fn add_resource(
        &mut self,
        guid: &str,
        name: &str,
        owner_guid: &str,
        created_offset_secs: i64,
    ) -> &mut Self {
        self.resources.push(Resource {
            guid: guid.to_string(),
            name: name.to_string(),
            owner_guid: owner_guid.to_string(),
            created_at: synthetic_timestamp(created_offset_secs),
        });
        self
    }

    /// Upsert a label row. At most one label per `(resource, key)`.
    pub fn set_label(&mut self, resource_guid: &str, key: &str, value: &str) -> &mut Self {
        if let Some(row) = self
            .labels
            .iter_mut()
            .find(|row| row.resource_guid == resource_guid && row.key == key)
        {
            row.value = value.to_string();
        } else {
            self.labels.push(LabelRow {
                resource_guid: resource_guid.to_string(),
                key: key.to_string(),
                value: value.to_string(),
            });
        }
        self
    }

    /// Delete a resource; its labels have no independent lifecycle and are
    /// cascaded away with it.
    pub fn remove_resource(&mut self, guid: &str) {
        self.resources.retain(|r| r.guid != guid);
        self.labels.retain(|row| row.resource_guid != guid);
    }
}

fn synthetic_timestamp(offset_secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(CREATED_AT_BASE + offset_secs, 0)
        .expect("synthetic timestamp in range")
}

#[async_trait]
impl ResourceStore for InMemoryStore {
    async fn list(&self, filters: &BaseFilters) -> Result<Vec<Resource>, StoreError> {
        let matched = self
            .resources
            .iter()
            .filter(|r| {
                filters
                    .names
                    .as_ref()
                    .is_none_or(|names| names.contains(&r.name))
                    && filters
                        .owner_guids
                        .as_ref()
                        .is_none_or(|owners| owners.contains(&r.owner_guid))
            })
            .cloned()
            .collect();
        Ok(matched)
    }
}

#[async_trait]
impl LabelStore for InMemoryStore {
    async fn guids_with_key(&self, key: &str) -> Result<HashSet<String>, StoreError> {
        Ok(self
            .labels
            .iter()
            .filter(|row| row.key == key)
            .map(|row| row.resource_guid.clone())
            .collect())
    }

    async fn guids_with_key_value(
        &self,
        key: &str,
        value: &str,
    ) -> Result<HashSet<String>, StoreError> {
        Ok(self
            .labels
            .iter()
            .filter(|row| row.key == key && row.value == value)
            .map(|row| row.resource_guid.clone())
            .collect())
    }

    async fn labels_for(
        &self,
        guids: &[String],
    ) -> Result<HashMap<String, HashMap<String, String>>, StoreError> {
        let mut result: HashMap<String, HashMap<String, String>> = HashMap::new();
        for row in &self.labels {
            if guids.contains(&row.resource_guid) {
                result
                    .entry(row.resource_guid.clone())
                    .or_default()
                    .insert(row.key.clone(), row.value.clone());
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guids(store: &InMemoryStore) -> Vec<&str> {
        store.resources.iter().map(|r| r.guid.as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_applies_name_and_owner_filters() {
        let mut store = InMemoryStore::new();
        store.add_resource("s1", "lamb", "org-1", 0);
        store.add_resource("s2", "alpaca", "org-2", 1);
        store.add_resource("s3", "horse", "org-1", 2);

        let all = store.list(&BaseFilters::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let by_name = store
            .list(&BaseFilters {
                names: Some(vec!["lamb".to_string(), "horse".to_string()]),
                owner_guids: None,
            })
            .await
            .unwrap();
        assert_eq!(by_name.len(), 2);

        let by_both = store
            .list(&BaseFilters {
                names: Some(vec!["lamb".to_string(), "alpaca".to_string()]),
                owner_guids: Some(vec!["org-2".to_string()]),
            })
            .await
            .unwrap();
        assert_eq!(by_both.len(), 1);
        assert_eq!(by_both[0].guid, "s2");
    }

    #[tokio::test]
    async fn test_empty_filter_vector_matches_nothing() {
        let mut store = InMemoryStore::new();
        store.add_resource("s1", "lamb", "org-1", 0);
        let none = store
            .list(&BaseFilters {
                names: Some(vec![]),
                owner_guids: None,
            })
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_set_label_upserts_per_resource_key() {
        let mut store = InMemoryStore::new();
        store.add_resource("s1", "lamb", "org-1", 0);
        store.set_label("s1", "env", "staging");
        store.set_label("s1", "env", "prod");

        assert!(store
            .guids_with_key_value("env", "staging")
            .await
            .unwrap()
            .is_empty());
        assert!(store
            .guids_with_key_value("env", "prod")
            .await
            .unwrap()
            .contains("s1"));
        assert_eq!(store.labels.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_resource_cascades_labels() {
        let mut store = InMemoryStore::new();
        store.add_resource("s1", "lamb", "org-1", 0);
        store.set_label("s1", "env", "prod");
        store.remove_resource("s1");

        assert!(guids(&store).is_empty());
        assert!(store.guids_with_key("env").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_labels_for_groups_by_guid() {
        let mut store = InMemoryStore::new();
        store.add_resource("s1", "lamb", "org-1", 0);
        store.add_resource("s2", "alpaca", "org-1", 1);
        store.set_label("s1", "env", "prod");
        store.set_label("s1", "animal", "dog");

        let labels = store
            .labels_for(&["s1".to_string(), "s2".to_string()])
            .await
            .unwrap();
        assert_eq!(labels["s1"].len(), 2);
        assert_eq!(labels["s1"]["env"], "prod");
        // Unlabeled resources are absent, not empty.
        assert!(!labels.contains_key("s2"));
    }
}
