//! Typed view of the berth collection, including occupancy and revision.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::ports::{Collection, Document, EntityStore, EntityStoreError};
use super::{Berth, BerthDraft, BerthId, BerthNumber, Occupancy, VesselId};

/// Stored berth body. `occupant` is `null` for an empty berth.
#[derive(Debug, Serialize, Deserialize)]
struct BerthRecord {
    number: BerthNumber,
    occupant: Option<u64>,
}

impl BerthRecord {
    fn new(number: BerthNumber, occupancy: Occupancy) -> Self {
        Self {
            number,
            occupant: occupancy.occupant().map(VesselId::get),
        }
    }
}

/// Typed CRUD over [`Collection::Berths`].
pub(crate) struct BerthRepository<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for BerthRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> BerthRepository<S>
where
    S: EntityStore + ?Sized,
{
    pub(crate) fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Persist a new berth; berths are always created empty.
    pub(crate) async fn insert(&self, draft: BerthDraft) -> Result<Berth, EntityStoreError> {
        let record = BerthRecord::new(draft.number().clone(), Occupancy::Empty);
        let document = self.store.insert(Collection::Berths, encode(&record)?).await?;
        decode(document)
    }

    pub(crate) async fn find(&self, id: BerthId) -> Result<Option<Berth>, EntityStoreError> {
        self.store
            .get(Collection::Berths, id.get())
            .await?
            .map(decode)
            .transpose()
    }

    pub(crate) async fn list(&self) -> Result<Vec<Berth>, EntityStoreError> {
        self.store
            .scan(Collection::Berths)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    /// Write `berth`'s occupancy, conditional on the revision it was read at.
    ///
    /// Returns the stored snapshot at its new revision, `Ok(None)` when the
    /// berth was deleted in the meantime, or
    /// [`EntityStoreError::RevisionMismatch`] when someone else wrote first.
    pub(crate) async fn save_occupancy(
        &self,
        berth: &Berth,
    ) -> Result<Option<Berth>, EntityStoreError> {
        let record = BerthRecord::new(berth.number().clone(), berth.occupancy());
        self.store
            .update(
                Collection::Berths,
                berth.id().get(),
                encode(&record)?,
                Some(berth.revision()),
            )
            .await?
            .map(decode)
            .transpose()
    }

    pub(crate) async fn delete(&self, id: BerthId) -> Result<bool, EntityStoreError> {
        self.store.delete(Collection::Berths, id.get()).await
    }
}

fn encode(record: &BerthRecord) -> Result<serde_json::Value, EntityStoreError> {
    serde_json::to_value(record)
        .map_err(|err| EntityStoreError::query(format!("failed to encode berth: {err}")))
}

fn decode(document: Document) -> Result<Berth, EntityStoreError> {
    let id = document.id;
    let record: BerthRecord = serde_json::from_value(document.data)
        .map_err(|err| EntityStoreError::query(format!("berth {id} is malformed: {err}")))?;
    let occupancy = Occupancy::from_occupant(record.occupant.map(VesselId::new));
    Ok(Berth::new(
        BerthId::new(id),
        record.number,
        occupancy,
        document.revision,
    ))
}
