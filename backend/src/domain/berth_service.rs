//! Berth domain services.
//!
//! Occupancy changes are not handled here; see
//! [`OccupancyManager`](super::OccupancyManager).

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::ports::{BerthCommand, BerthQuery, EntityStore};
use super::store_errors::map_store_error;
use super::{Berth, BerthDraft, BerthId, BerthRepository, Error};

fn berth_not_found(berth_id: BerthId) -> Error {
    Error::not_found(format!("no berth with id {berth_id} exists"))
}

/// Berth service implementing the command and query driving ports.
pub struct BerthService<S: ?Sized> {
    berths: BerthRepository<S>,
}

impl<S> BerthService<S>
where
    S: EntityStore + ?Sized,
{
    /// Create a service over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            berths: BerthRepository::new(store),
        }
    }
}

#[async_trait]
impl<S> BerthCommand for BerthService<S>
where
    S: EntityStore + ?Sized,
{
    async fn create_berth(&self, draft: BerthDraft) -> Result<Berth, Error> {
        let berth = self.berths.insert(draft).await.map_err(map_store_error)?;
        info!(berth_id = %berth.id(), number = %berth.number(), "berth created");
        Ok(berth)
    }

    async fn delete_berth(&self, berth_id: BerthId) -> Result<(), Error> {
        if self.berths.delete(berth_id).await.map_err(map_store_error)? {
            info!(berth_id = %berth_id, "berth deleted");
            Ok(())
        } else {
            Err(berth_not_found(berth_id))
        }
    }
}

#[async_trait]
impl<S> BerthQuery for BerthService<S>
where
    S: EntityStore + ?Sized,
{
    async fn get_berth(&self, berth_id: BerthId) -> Result<Berth, Error> {
        self.berths
            .find(berth_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| berth_not_found(berth_id))
    }

    async fn list_berths(&self) -> Result<Vec<Berth>, Error> {
        self.berths.list().await.map_err(map_store_error)
    }
}

#[cfg(test)]
#[path = "berth_service_tests.rs"]
mod tests;
