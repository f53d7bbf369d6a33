//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every vessel, berth, occupancy and health endpoint
//! - **Schemas**: request/response bodies plus the [`ErrorSchema`] and
//!   [`ErrorCodeSchema`] wrappers, which describe domain errors without
//!   coupling domain types to utoipa
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::berths::{BerthRequest, BerthResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::vessels::{VesselRequest, VesselResponse};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Marina API",
        description = "Vessels, berths, and the occupancy of berths by vessels.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::index::index,
        crate::inbound::http::vessels::create_vessel,
        crate::inbound::http::vessels::list_vessels,
        crate::inbound::http::vessels::get_vessel,
        crate::inbound::http::vessels::update_vessel,
        crate::inbound::http::vessels::delete_vessel,
        crate::inbound::http::berths::create_berth,
        crate::inbound::http::berths::list_berths,
        crate::inbound::http::berths::get_berth,
        crate::inbound::http::berths::delete_berth,
        crate::inbound::http::berths::assign_vessel,
        crate::inbound::http::berths::release_vessel,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        VesselRequest,
        VesselResponse,
        BerthRequest,
        BerthResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "vessels", description = "Vessel records"),
        (name = "berths", description = "Berths and their occupancy"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
