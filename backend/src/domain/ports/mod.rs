//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`EntityStore`) are implemented by outbound adapters.
//! Driving ports (`*Command`, `*Query`) are implemented by domain services and
//! consumed by the HTTP adapter.

mod macros;
pub(crate) use macros::define_port_error;

mod berth_command;
mod berth_query;
mod entity_store;
mod occupancy_command;
mod vessel_command;
mod vessel_query;

#[cfg(test)]
pub use berth_command::MockBerthCommand;
pub use berth_command::BerthCommand;
#[cfg(test)]
pub use berth_query::MockBerthQuery;
pub use berth_query::BerthQuery;
#[cfg(test)]
pub use entity_store::MockEntityStore;
pub use entity_store::{Collection, Document, EntityStore, EntityStoreError};
#[cfg(test)]
pub use occupancy_command::MockOccupancyCommand;
pub use occupancy_command::OccupancyCommand;
#[cfg(test)]
pub use vessel_command::MockVesselCommand;
pub use vessel_command::{VesselCommand, VesselDeletion};
#[cfg(test)]
pub use vessel_query::MockVesselQuery;
pub use vessel_query::VesselQuery;
