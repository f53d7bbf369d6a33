//! In-process entity store.
//!
//! Keeps every collection in a `BTreeMap` behind a single mutex and honours
//! the same revision contract as the PostgreSQL adapter, so the occupancy
//! protocols behave identically when the service runs without a database.
//! Data does not survive a restart.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ports::{Collection, Document, EntityStore, EntityStoreError};

#[derive(Debug)]
struct StoredDocument {
    revision: u64,
    data: Value,
}

#[derive(Debug, Default)]
struct CollectionState {
    last_id: u64,
    documents: BTreeMap<u64, StoredDocument>,
}

type Collections = HashMap<Collection, CollectionState>;

/// [`EntityStore`] backed by process memory.
///
/// Identifiers are allocated per collection starting at 1 and are never
/// reused, even after a delete.
#[derive(Debug, Default)]
pub struct InMemoryEntityStore {
    collections: Mutex<Collections>,
}

impl InMemoryEntityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Collections>, EntityStoreError> {
        self.collections
            .lock()
            .map_err(|_| EntityStoreError::query("in-memory entity store lock poisoned"))
    }
}

fn to_document(id: u64, stored: &StoredDocument) -> Document {
    Document {
        id,
        revision: stored.revision,
        data: stored.data.clone(),
    }
}

#[async_trait]
impl EntityStore for InMemoryEntityStore {
    async fn insert(
        &self,
        collection: Collection,
        data: Value,
    ) -> Result<Document, EntityStoreError> {
        let mut collections = self.lock()?;
        let state = collections.entry(collection).or_default();
        state.last_id += 1;
        let id = state.last_id;
        let stored = StoredDocument { revision: 1, data };
        let document = to_document(id, &stored);
        state.documents.insert(id, stored);
        Ok(document)
    }

    async fn get(
        &self,
        collection: Collection,
        id: u64,
    ) -> Result<Option<Document>, EntityStoreError> {
        let collections = self.lock()?;
        Ok(collections
            .get(&collection)
            .and_then(|state| state.documents.get(&id))
            .map(|stored| to_document(id, stored)))
    }

    async fn scan(&self, collection: Collection) -> Result<Vec<Document>, EntityStoreError> {
        let collections = self.lock()?;
        Ok(collections
            .get(&collection)
            .map(|state| {
                state
                    .documents
                    .iter()
                    .map(|(id, stored)| to_document(*id, stored))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn update(
        &self,
        collection: Collection,
        id: u64,
        data: Value,
        expected_revision: Option<u64>,
    ) -> Result<Option<Document>, EntityStoreError> {
        let mut collections = self.lock()?;
        let Some(stored) = collections
            .get_mut(&collection)
            .and_then(|state| state.documents.get_mut(&id))
        else {
            return Ok(None);
        };
        match expected_revision {
            Some(expected) if expected != stored.revision => {
                return Err(EntityStoreError::revision_mismatch(expected, stored.revision));
            }
            _ => {}
        }
        stored.revision += 1;
        stored.data = data;
        Ok(Some(to_document(id, stored)))
    }

    async fn delete(&self, collection: Collection, id: u64) -> Result<bool, EntityStoreError> {
        let mut collections = self.lock()?;
        Ok(collections
            .get_mut(&collection)
            .is_some_and(|state| state.documents.remove(&id).is_some()))
    }
}
