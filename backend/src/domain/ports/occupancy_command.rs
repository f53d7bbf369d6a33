//! Driving port for the occupancy protocols.
//!
//! ```text
//! assign:  Empty          -> Occupied(vessel)
//! release: Occupied(v)    -> Empty            (only when v == vessel)
//! ```

use async_trait::async_trait;

use crate::domain::{Berth, BerthId, Error, VesselId};

/// Driving port for occupancy transitions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OccupancyCommand: Send + Sync {
    /// Moor `vessel_id` at `berth_id`.
    ///
    /// Errors:
    /// - `not_found` when either the berth or the vessel is missing.
    /// - `forbidden` when the berth is occupied or the vessel is already
    ///   moored elsewhere.
    /// - `conflict` when the berth changed between read and write.
    async fn assign(&self, berth_id: BerthId, vessel_id: VesselId) -> Result<Berth, Error>;

    /// Release `vessel_id` from `berth_id`.
    ///
    /// Fails with `not_found` when either is missing or the berth's occupant
    /// is not `vessel_id`, and with `conflict` on a concurrent modification.
    async fn release(&self, berth_id: BerthId, vessel_id: VesselId) -> Result<Berth, Error>;
}
