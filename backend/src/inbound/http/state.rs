//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    BerthCommand, BerthQuery, EntityStore, OccupancyCommand, VesselCommand, VesselQuery,
};
use crate::domain::{BerthId, BerthService, OccupancyManager, VesselId, VesselService};

/// Builds the `self` links rendered on every entity.
///
/// # Examples
/// ```
/// use marina::domain::VesselId;
/// use marina::inbound::http::state::ResourceLinks;
///
/// let links = ResourceLinks::new("https://marina.example/");
/// assert_eq!(links.vessel(VesselId::new(3)), "https://marina.example/vessels/3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLinks {
    base_url: String,
}

impl ResourceLinks {
    /// Create links rooted at `base_url`; a trailing slash is ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Absolute URL of a vessel.
    pub fn vessel(&self, id: VesselId) -> String {
        format!("{}/vessels/{id}", self.base_url)
    }

    /// Absolute URL of a berth.
    pub fn berth(&self, id: BerthId) -> String {
        format!("{}/berths/{id}", self.base_url)
    }
}

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub vessels: Arc<dyn VesselCommand>,
    pub vessels_query: Arc<dyn VesselQuery>,
    pub berths: Arc<dyn BerthCommand>,
    pub berths_query: Arc<dyn BerthQuery>,
    pub occupancy: Arc<dyn OccupancyCommand>,
}

impl HttpStatePorts {
    /// Wire the domain services over a single entity store.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: EntityStore + ?Sized + 'static,
    {
        let vessels = Arc::new(VesselService::new(Arc::clone(&store)));
        let berths = Arc::new(BerthService::new(Arc::clone(&store)));
        Self {
            vessels: vessels.clone(),
            vessels_query: vessels,
            berths: berths.clone(),
            berths_query: berths,
            occupancy: Arc::new(OccupancyManager::new(store)),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub vessels: Arc<dyn VesselCommand>,
    pub vessels_query: Arc<dyn VesselQuery>,
    pub berths: Arc<dyn BerthCommand>,
    pub berths_query: Arc<dyn BerthQuery>,
    pub occupancy: Arc<dyn OccupancyCommand>,
    pub links: ResourceLinks,
}

impl HttpState {
    /// Construct state from the port bundle and link builder.
    pub fn new(ports: HttpStatePorts, links: ResourceLinks) -> Self {
        let HttpStatePorts {
            vessels,
            vessels_query,
            berths,
            berths_query,
            occupancy,
        } = ports;
        Self {
            vessels,
            vessels_query,
            berths,
            berths_query,
            occupancy,
            links,
        }
    }
}
