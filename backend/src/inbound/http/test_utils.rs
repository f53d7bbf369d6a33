//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::inbound::http::state::{HttpState, HttpStatePorts, ResourceLinks};
use crate::outbound::memory::InMemoryEntityStore;

/// Base URL used for `self` links in handler tests.
pub const TEST_BASE_URL: &str = "http://marina.test";

/// Build handler state over a fresh in-memory store.
///
/// Every invocation gets its own store, so ids restart at 1.
pub fn test_state() -> web::Data<HttpState> {
    let ports = HttpStatePorts::from_store(Arc::new(InMemoryEntityStore::new()));
    web::Data::new(HttpState::new(ports, ResourceLinks::new(TEST_BASE_URL)))
}
