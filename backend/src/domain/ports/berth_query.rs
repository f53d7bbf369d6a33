//! Driving port for berth reads.

use async_trait::async_trait;

use crate::domain::{Berth, BerthId, Error};

/// Driving port for berth read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BerthQuery: Send + Sync {
    /// Fetch one berth; `not_found` when absent.
    async fn get_berth(&self, berth_id: BerthId) -> Result<Berth, Error>;

    /// Every berth, ordered by identifier.
    async fn list_berths(&self) -> Result<Vec<Berth>, Error>;
}
