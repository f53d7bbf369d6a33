//! Typed view of the vessel collection.
//!
//! The repository knows nothing about berths; it only converts between
//! [`Vessel`] values and the JSON documents kept by the [`EntityStore`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::ports::{Collection, Document, EntityStore, EntityStoreError};
use super::{Vessel, VesselDraft, VesselId};

/// Stored vessel body.
#[derive(Debug, Serialize, Deserialize)]
struct VesselRecord {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    length: u32,
}

impl From<&VesselDraft> for VesselRecord {
    fn from(draft: &VesselDraft) -> Self {
        Self {
            name: draft.name().to_owned(),
            kind: draft.kind().to_owned(),
            length: draft.length(),
        }
    }
}

/// Typed CRUD over [`Collection::Vessels`].
pub(crate) struct VesselRepository<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for VesselRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> VesselRepository<S>
where
    S: EntityStore + ?Sized,
{
    pub(crate) fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub(crate) async fn insert(&self, draft: &VesselDraft) -> Result<Vessel, EntityStoreError> {
        let document = self
            .store
            .insert(Collection::Vessels, encode(draft)?)
            .await?;
        decode(document)
    }

    pub(crate) async fn find(&self, id: VesselId) -> Result<Option<Vessel>, EntityStoreError> {
        self.store
            .get(Collection::Vessels, id.get())
            .await?
            .map(decode)
            .transpose()
    }

    pub(crate) async fn list(&self) -> Result<Vec<Vessel>, EntityStoreError> {
        self.store
            .scan(Collection::Vessels)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    /// Overwrite every attribute; `Ok(None)` when the vessel does not exist.
    pub(crate) async fn replace(
        &self,
        id: VesselId,
        draft: &VesselDraft,
    ) -> Result<Option<Vessel>, EntityStoreError> {
        self.store
            .update(Collection::Vessels, id.get(), encode(draft)?, None)
            .await?
            .map(decode)
            .transpose()
    }

    pub(crate) async fn delete(&self, id: VesselId) -> Result<bool, EntityStoreError> {
        self.store.delete(Collection::Vessels, id.get()).await
    }
}

fn encode(draft: &VesselDraft) -> Result<serde_json::Value, EntityStoreError> {
    serde_json::to_value(VesselRecord::from(draft))
        .map_err(|err| EntityStoreError::query(format!("failed to encode vessel: {err}")))
}

fn decode(document: Document) -> Result<Vessel, EntityStoreError> {
    let id = document.id;
    let record: VesselRecord = serde_json::from_value(document.data)
        .map_err(|err| EntityStoreError::query(format!("vessel {id} is malformed: {err}")))?;
    let draft = VesselDraft::new(record.name, record.kind, record.length)
        .map_err(|err| EntityStoreError::query(format!("vessel {id} is invalid: {err}")))?;
    Ok(Vessel::new(VesselId::new(id), draft))
}
