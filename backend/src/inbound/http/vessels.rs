//! Vessel HTTP handlers.
//!
//! ```text
//! POST   /vessels       {name, type, length}
//! GET    /vessels
//! GET    /vessels/{id}
//! PATCH  /vessels/{id}  {name, type, length}
//! DELETE /vessels/{id}
//! ```
//!
//! Deleting a vessel first releases any berth it occupies.

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{Error, Vessel, VesselDraft, VesselId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::{HttpState, ResourceLinks};
use crate::inbound::http::validation::{
    FieldName, invalid_field_error, parse_path_id, positive_u32, require,
};

/// Request payload for creating or replacing a vessel.
///
/// All three attributes are required in both cases.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct VesselRequest {
    #[schema(example = "Orca")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    #[schema(example = "sailboat")]
    pub kind: Option<String>,
    #[schema(example = 30, minimum = 1)]
    pub length: Option<i64>,
}

/// Vessel representation returned to clients.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct VesselResponse {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "Orca")]
    pub name: String,
    #[serde(rename = "type")]
    #[schema(example = "sailboat")]
    pub kind: String,
    #[schema(example = 30)]
    pub length: u32,
    #[serde(rename = "self")]
    #[schema(example = "http://localhost:8080/vessels/1")]
    pub self_link: String,
}

impl VesselResponse {
    fn render(vessel: &Vessel, links: &ResourceLinks) -> Self {
        Self {
            id: vessel.id().get(),
            name: vessel.name().to_owned(),
            kind: vessel.kind().to_owned(),
            length: vessel.length(),
            self_link: links.vessel(vessel.id()),
        }
    }
}

fn parse_vessel_request(payload: VesselRequest) -> Result<VesselDraft, Error> {
    let name = require(payload.name, FieldName::new("name"))?;
    let kind = require(payload.kind, FieldName::new("type"))?;
    let length = positive_u32(
        require(payload.length, FieldName::new("length"))?,
        FieldName::new("length"),
    )?;
    VesselDraft::new(name, kind, length).map_err(|err| {
        debug!(error = %err, "rejected vessel attributes");
        invalid_field_error(FieldName::new(err.field()), err.to_string())
    })
}

pub(crate) fn parse_vessel_id(raw: &str) -> Result<VesselId, Error> {
    parse_path_id(raw, "vessel").map(VesselId::new)
}

/// Create a vessel.
#[utoipa::path(
    post,
    path = "/vessels",
    request_body = VesselRequest,
    responses(
        (status = 201, description = "Vessel created", body = VesselResponse),
        (status = 400, description = "Missing or invalid attribute", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["vessels"],
    operation_id = "createVessel"
)]
#[post("/vessels")]
pub async fn create_vessel(
    state: web::Data<HttpState>,
    payload: web::Json<VesselRequest>,
) -> ApiResult<HttpResponse> {
    let draft = parse_vessel_request(payload.into_inner())?;
    let vessel = state.vessels.create_vessel(draft).await?;
    let body = VesselResponse::render(&vessel, &state.links);
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, body.self_link.clone()))
        .json(body))
}

/// Fetch one vessel.
#[utoipa::path(
    get,
    path = "/vessels/{vessel_id}",
    params(("vessel_id" = u64, Path, description = "Vessel identifier")),
    responses(
        (status = 200, description = "Vessel", body = VesselResponse),
        (status = 404, description = "No such vessel", body = ErrorSchema)
    ),
    tags = ["vessels"],
    operation_id = "getVessel"
)]
#[get("/vessels/{vessel_id}")]
pub async fn get_vessel(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<VesselResponse>> {
    let vessel_id = parse_vessel_id(&path)?;
    let vessel = state.vessels_query.get_vessel(vessel_id).await?;
    Ok(web::Json(VesselResponse::render(&vessel, &state.links)))
}

/// List every vessel.
#[utoipa::path(
    get,
    path = "/vessels",
    responses((status = 200, description = "All vessels", body = [VesselResponse])),
    tags = ["vessels"],
    operation_id = "listVessels"
)]
#[get("/vessels")]
pub async fn list_vessels(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<VesselResponse>>> {
    let vessels = state.vessels_query.list_vessels().await?;
    Ok(web::Json(
        vessels
            .iter()
            .map(|vessel| VesselResponse::render(vessel, &state.links))
            .collect(),
    ))
}

/// Replace every attribute of a vessel.
#[utoipa::path(
    patch,
    path = "/vessels/{vessel_id}",
    params(("vessel_id" = u64, Path, description = "Vessel identifier")),
    request_body = VesselRequest,
    responses(
        (status = 200, description = "Vessel updated", body = VesselResponse),
        (status = 400, description = "Missing or invalid attribute", body = ErrorSchema),
        (status = 404, description = "No such vessel", body = ErrorSchema)
    ),
    tags = ["vessels"],
    operation_id = "updateVessel"
)]
#[patch("/vessels/{vessel_id}")]
pub async fn update_vessel(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<VesselRequest>,
) -> ApiResult<web::Json<VesselResponse>> {
    let vessel_id = parse_vessel_id(&path)?;
    let draft = parse_vessel_request(payload.into_inner())?;
    let vessel = state.vessels.update_vessel(vessel_id, draft).await?;
    Ok(web::Json(VesselResponse::render(&vessel, &state.links)))
}

/// Delete a vessel, releasing any berth it occupies first.
#[utoipa::path(
    delete,
    path = "/vessels/{vessel_id}",
    params(("vessel_id" = u64, Path, description = "Vessel identifier")),
    responses(
        (status = 204, description = "Vessel deleted"),
        (status = 404, description = "No such vessel", body = ErrorSchema),
        (status = 409, description = "A berth kept changing during cleanup", body = ErrorSchema)
    ),
    tags = ["vessels"],
    operation_id = "deleteVessel"
)]
#[delete("/vessels/{vessel_id}")]
pub async fn delete_vessel(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let vessel_id = parse_vessel_id(&path)?;
    state.vessels.delete_vessel(vessel_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "vessels_tests.rs"]
mod tests;
