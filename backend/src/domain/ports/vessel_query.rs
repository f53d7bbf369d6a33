//! Driving port for vessel reads.

use async_trait::async_trait;

use crate::domain::{Error, Vessel, VesselId};

/// Driving port for vessel read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VesselQuery: Send + Sync {
    /// Fetch one vessel; `not_found` when absent.
    async fn get_vessel(&self, vessel_id: VesselId) -> Result<Vessel, Error>;

    /// Every vessel, ordered by identifier.
    async fn list_vessels(&self) -> Result<Vec<Vessel>, Error>;
}
