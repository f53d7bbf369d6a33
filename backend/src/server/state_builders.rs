//! Builders for the HTTP state from the configured entity store.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use marina::domain::ports::EntityStore;
use marina::inbound::http::state::{HttpState, HttpStatePorts};
use marina::outbound::memory::InMemoryEntityStore;
use marina::outbound::persistence::{DbPool, DieselEntityStore};

use super::ServerConfig;

/// Pick the entity store: PostgreSQL when a pool is configured, otherwise an
/// in-memory store.
fn build_entity_store(db_pool: Option<&DbPool>) -> Arc<dyn EntityStore> {
    match db_pool {
        Some(pool) => {
            info!(store = "postgres", "entity store selected");
            Arc::new(DieselEntityStore::new(pool.clone()))
        }
        None => {
            info!(store = "memory", "entity store selected");
            Arc::new(InMemoryEntityStore::new())
        }
    }
}

/// Build the shared HTTP state over the configured store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let store = build_entity_store(config.db_pool.as_ref());
    web::Data::new(HttpState::new(
        HttpStatePorts::from_store(store),
        config.links.clone(),
    ))
}
