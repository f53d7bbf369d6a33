//! Vessel domain services.
//!
//! Implements the vessel driving ports. Deletion runs the occupancy cleanup
//! first so a berth never refers to a vessel this service removed.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::ports::{EntityStore, VesselCommand, VesselDeletion, VesselQuery};
use super::store_errors::map_store_error;
use super::{Error, OccupancyManager, Vessel, VesselDraft, VesselId, VesselRepository};

fn vessel_not_found(vessel_id: VesselId) -> Error {
    Error::not_found(format!("no vessel with id {vessel_id} exists"))
}

/// Vessel service implementing the command and query driving ports.
pub struct VesselService<S: ?Sized> {
    vessels: VesselRepository<S>,
    occupancy: OccupancyManager<S>,
}

impl<S> VesselService<S>
where
    S: EntityStore + ?Sized,
{
    /// Create a service over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            vessels: VesselRepository::new(Arc::clone(&store)),
            occupancy: OccupancyManager::new(store),
        }
    }
}

#[async_trait]
impl<S> VesselCommand for VesselService<S>
where
    S: EntityStore + ?Sized,
{
    async fn create_vessel(&self, draft: VesselDraft) -> Result<Vessel, Error> {
        let vessel = self.vessels.insert(&draft).await.map_err(map_store_error)?;
        info!(vessel_id = %vessel.id(), "vessel created");
        Ok(vessel)
    }

    async fn update_vessel(
        &self,
        vessel_id: VesselId,
        draft: VesselDraft,
    ) -> Result<Vessel, Error> {
        self.vessels
            .replace(vessel_id, &draft)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| vessel_not_found(vessel_id))
    }

    async fn delete_vessel(&self, vessel_id: VesselId) -> Result<VesselDeletion, Error> {
        self.vessels
            .find(vessel_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| vessel_not_found(vessel_id))?;

        let released_berths = self.occupancy.release_by_vessel(vessel_id).await?;

        if !self.vessels.delete(vessel_id).await.map_err(map_store_error)? {
            return Err(vessel_not_found(vessel_id));
        }
        info!(
            vessel_id = %vessel_id,
            released = released_berths.len(),
            "vessel deleted"
        );
        Ok(VesselDeletion {
            vessel_id,
            released_berths,
        })
    }
}

#[async_trait]
impl<S> VesselQuery for VesselService<S>
where
    S: EntityStore + ?Sized,
{
    async fn get_vessel(&self, vessel_id: VesselId) -> Result<Vessel, Error> {
        self.vessels
            .find(vessel_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| vessel_not_found(vessel_id))
    }

    async fn list_vessels(&self) -> Result<Vec<Vessel>, Error> {
        self.vessels.list().await.map_err(map_store_error)
    }
}

#[cfg(test)]
#[path = "vessel_service_tests.rs"]
mod tests;
