//! Driving port for berth mutations outside the occupancy protocol.

use async_trait::async_trait;

use crate::domain::{Berth, BerthDraft, BerthId, Error};

/// Driving port for berth write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BerthCommand: Send + Sync {
    /// Persist a new, empty berth.
    async fn create_berth(&self, draft: BerthDraft) -> Result<Berth, Error>;

    /// Delete a berth. Any occupancy fact it held is discarded; the vessel
    /// itself is untouched.
    async fn delete_berth(&self, berth_id: BerthId) -> Result<(), Error>;
}
