//! Driving port for vessel mutations.

use async_trait::async_trait;

use crate::domain::{BerthId, Error, Vessel, VesselDraft, VesselId};

/// Outcome of deleting a vessel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VesselDeletion {
    pub vessel_id: VesselId,
    /// Berths whose occupancy was cleared because this vessel held them.
    pub released_berths: Vec<BerthId>,
}

/// Driving port for vessel write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VesselCommand: Send + Sync {
    /// Persist a new vessel.
    async fn create_vessel(&self, draft: VesselDraft) -> Result<Vessel, Error>;

    /// Replace every attribute of an existing vessel.
    ///
    /// Fails with `not_found` when `vessel_id` does not resolve.
    async fn update_vessel(
        &self,
        vessel_id: VesselId,
        draft: VesselDraft,
    ) -> Result<Vessel, Error>;

    /// Delete a vessel after releasing every berth it occupies.
    ///
    /// If the berth cleanup fails the vessel is left in place and the error
    /// is returned, so no berth is ever left pointing at a deleted vessel by
    /// this operation.
    async fn delete_vessel(&self, vessel_id: VesselId) -> Result<VesselDeletion, Error>;
}
