//! Occupancy manager: the single owner of the berth/vessel relationship.
//!
//! The store has no foreign keys and no multi-document transactions, so the
//! invariant "every non-empty berth occupant is an existing vessel" is kept
//! here by protocol:
//!
//! - `assign` checks that both sides exist, that the berth is empty and that
//!   the vessel holds no other berth, then writes the berth conditionally on
//!   the revision it read.
//! - `release` checks that the named vessel is the occupant, then empties
//!   the berth conditionally.
//! - `release_by_vessel` scans every berth and clears those held by the
//!   vessel, retrying a bounded number of times when a berth changes
//!   underneath it.
//!
//! A vessel deleted between `assign`'s existence check and its berth write
//! leaves a dangling occupant until the next `release_by_vessel` for that
//! id. The window is a single store round-trip and is not locked against.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use super::ports::{EntityStore, EntityStoreError, OccupancyCommand};
use super::store_errors::{map_store_error, revision_conflict};
use super::{Berth, BerthId, BerthRepository, Error, Occupancy, VesselId, VesselRepository};

/// Upper bound on conditional-write attempts per berth during cleanup.
const MAX_RELEASE_ATTEMPTS: usize = 3;

/// Occupancy state machine and cascading cleanup.
pub struct OccupancyManager<S: ?Sized> {
    vessels: VesselRepository<S>,
    berths: BerthRepository<S>,
}

impl<S: ?Sized> Clone for OccupancyManager<S> {
    fn clone(&self) -> Self {
        Self {
            vessels: self.vessels.clone(),
            berths: self.berths.clone(),
        }
    }
}

impl<S> OccupancyManager<S>
where
    S: EntityStore + ?Sized,
{
    /// Create a manager over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            vessels: VesselRepository::new(Arc::clone(&store)),
            berths: BerthRepository::new(store),
        }
    }

    /// Clear every berth occupied by `vessel_id`.
    ///
    /// Scans the whole berth collection and never assumes a single match.
    /// Returns the berths that were cleared by this call; berths deleted or
    /// re-assigned concurrently are skipped. Fails with `conflict` when a
    /// berth still holds the vessel after [`MAX_RELEASE_ATTEMPTS`] writes.
    pub async fn release_by_vessel(&self, vessel_id: VesselId) -> Result<Vec<BerthId>, Error> {
        let berths = self.berths.list().await.map_err(map_store_error)?;
        let mut released = Vec::new();
        for berth in berths
            .into_iter()
            .filter(|berth| berth.occupancy().is_occupied_by(vessel_id))
        {
            if let Some(id) = self.clear_berth(berth, vessel_id).await? {
                released.push(id);
            }
        }
        if !released.is_empty() {
            info!(
                vessel_id = %vessel_id,
                berths = ?released.iter().map(|id| id.get()).collect::<Vec<_>>(),
                "released berths held by vessel"
            );
        }
        Ok(released)
    }

    async fn clear_berth(
        &self,
        mut berth: Berth,
        vessel_id: VesselId,
    ) -> Result<Option<BerthId>, Error> {
        let mut last_mismatch = None;
        for _ in 0..MAX_RELEASE_ATTEMPTS {
            match self
                .berths
                .save_occupancy(&berth.with_occupancy(Occupancy::Empty))
                .await
            {
                Ok(Some(saved)) => return Ok(Some(saved.id())),
                Ok(None) => return Ok(None),
                Err(EntityStoreError::RevisionMismatch { expected, actual }) => {
                    debug!(
                        berth_id = %berth.id(),
                        expected,
                        actual,
                        "berth changed during release; re-reading"
                    );
                    last_mismatch = Some((expected, actual));
                    match self
                        .berths
                        .find(berth.id())
                        .await
                        .map_err(map_store_error)?
                    {
                        Some(current) if current.occupancy().is_occupied_by(vessel_id) => {
                            berth = current;
                        }
                        _ => return Ok(None),
                    }
                }
                Err(err) => return Err(map_store_error(err)),
            }
        }
        let (expected, actual) = last_mismatch.unwrap_or((berth.revision(), berth.revision()));
        Err(revision_conflict(expected, actual))
    }

    async fn require_both(
        &self,
        berth_id: BerthId,
        vessel_id: VesselId,
    ) -> Result<Option<Berth>, Error> {
        let berth = self.berths.find(berth_id).await.map_err(map_store_error)?;
        let vessel = self.vessels.find(vessel_id).await.map_err(map_store_error)?;
        Ok(berth.filter(|_| vessel.is_some()))
    }

    async fn write_transition(&self, next: Berth) -> Result<Berth, Error> {
        self.berths
            .save_occupancy(&next)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("berth {} no longer exists", next.id())))
    }
}

fn both_missing(berth_id: BerthId, vessel_id: VesselId) -> Error {
    Error::not_found(format!("berth {berth_id} and/or vessel {vessel_id} does not exist"))
}

#[async_trait]
impl<S> OccupancyCommand for OccupancyManager<S>
where
    S: EntityStore + ?Sized,
{
    async fn assign(&self, berth_id: BerthId, vessel_id: VesselId) -> Result<Berth, Error> {
        let berth = self
            .require_both(berth_id, vessel_id)
            .await?
            .ok_or_else(|| both_missing(berth_id, vessel_id))?;

        if !berth.occupancy().is_empty() {
            return Err(Error::forbidden(format!("berth {berth_id} is not empty"))
                .with_details(json!({ "code": "berth_occupied" })));
        }

        let elsewhere = self
            .berths
            .list()
            .await
            .map_err(map_store_error)?
            .into_iter()
            .find(|other| {
                other.id() != berth_id && other.occupancy().is_occupied_by(vessel_id)
            });
        if let Some(other) = elsewhere {
            return Err(Error::forbidden(format!(
                "vessel {vessel_id} is already at berth {}",
                other.id()
            ))
            .with_details(json!({
                "code": "vessel_already_berthed",
                "berthId": other.id().get(),
            })));
        }

        let saved = self
            .write_transition(berth.with_occupancy(Occupancy::Occupied(vessel_id)))
            .await?;
        info!(
            berth_id = %berth_id,
            vessel_id = %vessel_id,
            revision = saved.revision(),
            "vessel assigned to berth"
        );
        Ok(saved)
    }

    async fn release(&self, berth_id: BerthId, vessel_id: VesselId) -> Result<Berth, Error> {
        let not_here = || {
            Error::not_found(format!(
                "no vessel with id {vessel_id} is at the berth with id {berth_id}"
            ))
        };
        let berth = self
            .require_both(berth_id, vessel_id)
            .await?
            .ok_or_else(not_here)?;
        if !berth.occupancy().is_occupied_by(vessel_id) {
            return Err(not_here());
        }

        let saved = self
            .write_transition(berth.with_occupancy(Occupancy::Empty))
            .await?;
        info!(
            berth_id = %berth_id,
            vessel_id = %vessel_id,
            revision = saved.revision(),
            "vessel released from berth"
        );
        Ok(saved)
    }
}

#[cfg(test)]
#[path = "occupancy_tests.rs"]
mod tests;
