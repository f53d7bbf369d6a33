//! Marina: vessels, berths, and application-enforced berth occupancy.
//!
//! The crate follows a hexagonal layout. [`domain`] holds the entities, the
//! occupancy protocols and the ports; [`inbound`] adapts HTTP onto the
//! driving ports; [`outbound`] implements the entity store in memory and on
//! PostgreSQL.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
