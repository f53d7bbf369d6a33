//! Berth HTTP handlers, including occupancy transitions.
//!
//! ```text
//! POST   /berths                         {number}
//! GET    /berths
//! GET    /berths/{berth_id}
//! DELETE /berths/{berth_id}
//! PUT    /berths/{berth_id}/{vessel_id}  assign
//! DELETE /berths/{berth_id}/{vessel_id}  release
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{Berth, BerthDraft, BerthId, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::{HttpState, ResourceLinks};
use crate::inbound::http::validation::{FieldName, invalid_field_error, parse_path_id, require};
use crate::inbound::http::vessels::parse_vessel_id;

/// Request payload for creating a berth.
///
/// `number` is any non-empty JSON scalar; `null`, `false`, `0` and `""` are
/// rejected.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct BerthRequest {
    #[schema(value_type = Object, example = 12)]
    pub number: Option<Value>,
}

/// Berth representation returned to clients.
///
/// `occupant` is the id of the vessel moored at the berth, or `null`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct BerthResponse {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(value_type = Object, example = "A7")]
    pub number: Value,
    #[schema(example = 3, nullable = true)]
    pub occupant: Option<u64>,
    #[serde(rename = "self")]
    #[schema(example = "http://localhost:8080/berths/1")]
    pub self_link: String,
}

impl BerthResponse {
    fn render(berth: &Berth, links: &ResourceLinks) -> Self {
        Self {
            id: berth.id().get(),
            number: berth.number().as_value().clone(),
            occupant: berth.occupancy().occupant().map(|vessel| vessel.get()),
            self_link: links.berth(berth.id()),
        }
    }
}

fn parse_berth_request(payload: BerthRequest) -> Result<BerthDraft, Error> {
    let field = FieldName::new("number");
    let number = require(payload.number, field)?;
    BerthDraft::new(number).map_err(|err| invalid_field_error(field, err.to_string()))
}

fn parse_berth_id(raw: &str) -> Result<BerthId, Error> {
    parse_path_id(raw, "berth").map(BerthId::new)
}

/// Create an empty berth.
#[utoipa::path(
    post,
    path = "/berths",
    request_body = BerthRequest,
    responses(
        (status = 201, description = "Berth created", body = BerthResponse),
        (status = 400, description = "Missing or invalid number", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["berths"],
    operation_id = "createBerth"
)]
#[post("/berths")]
pub async fn create_berth(
    state: web::Data<HttpState>,
    payload: web::Json<BerthRequest>,
) -> ApiResult<HttpResponse> {
    let draft = parse_berth_request(payload.into_inner())?;
    let berth = state.berths.create_berth(draft).await?;
    let body = BerthResponse::render(&berth, &state.links);
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, body.self_link.clone()))
        .json(body))
}

/// Fetch one berth.
#[utoipa::path(
    get,
    path = "/berths/{berth_id}",
    params(("berth_id" = u64, Path, description = "Berth identifier")),
    responses(
        (status = 200, description = "Berth", body = BerthResponse),
        (status = 404, description = "No such berth", body = ErrorSchema)
    ),
    tags = ["berths"],
    operation_id = "getBerth"
)]
#[get("/berths/{berth_id}")]
pub async fn get_berth(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<BerthResponse>> {
    let berth_id = parse_berth_id(&path)?;
    let berth = state.berths_query.get_berth(berth_id).await?;
    Ok(web::Json(BerthResponse::render(&berth, &state.links)))
}

/// List every berth.
#[utoipa::path(
    get,
    path = "/berths",
    responses((status = 200, description = "All berths", body = [BerthResponse])),
    tags = ["berths"],
    operation_id = "listBerths"
)]
#[get("/berths")]
pub async fn list_berths(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<BerthResponse>>> {
    let berths = state.berths_query.list_berths().await?;
    Ok(web::Json(
        berths
            .iter()
            .map(|berth| BerthResponse::render(berth, &state.links))
            .collect(),
    ))
}

/// Delete a berth. An occupying vessel is left in place, unberthed.
#[utoipa::path(
    delete,
    path = "/berths/{berth_id}",
    params(("berth_id" = u64, Path, description = "Berth identifier")),
    responses(
        (status = 204, description = "Berth deleted"),
        (status = 404, description = "No such berth", body = ErrorSchema)
    ),
    tags = ["berths"],
    operation_id = "deleteBerth"
)]
#[delete("/berths/{berth_id}")]
pub async fn delete_berth(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let berth_id = parse_berth_id(&path)?;
    state.berths.delete_berth(berth_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Moor a vessel at an empty berth.
#[utoipa::path(
    put,
    path = "/berths/{berth_id}/{vessel_id}",
    params(
        ("berth_id" = u64, Path, description = "Berth identifier"),
        ("vessel_id" = u64, Path, description = "Vessel identifier")
    ),
    responses(
        (status = 204, description = "Vessel assigned"),
        (status = 403, description = "Berth occupied or vessel already berthed", body = ErrorSchema),
        (status = 404, description = "No such berth or vessel", body = ErrorSchema),
        (status = 409, description = "Berth changed concurrently", body = ErrorSchema)
    ),
    tags = ["berths"],
    operation_id = "assignVessel"
)]
#[put("/berths/{berth_id}/{vessel_id}")]
pub async fn assign_vessel(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (raw_berth, raw_vessel) = path.into_inner();
    let berth_id = parse_berth_id(&raw_berth)?;
    let vessel_id = parse_vessel_id(&raw_vessel)?;
    state.occupancy.assign(berth_id, vessel_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Release a vessel from the berth it occupies.
#[utoipa::path(
    delete,
    path = "/berths/{berth_id}/{vessel_id}",
    params(
        ("berth_id" = u64, Path, description = "Berth identifier"),
        ("vessel_id" = u64, Path, description = "Vessel identifier")
    ),
    responses(
        (status = 204, description = "Vessel released"),
        (status = 404, description = "Vessel is not at this berth", body = ErrorSchema),
        (status = 409, description = "Berth changed concurrently", body = ErrorSchema)
    ),
    tags = ["berths"],
    operation_id = "releaseVessel"
)]
#[delete("/berths/{berth_id}/{vessel_id}")]
pub async fn release_vessel(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (raw_berth, raw_vessel) = path.into_inner();
    let berth_id = parse_berth_id(&raw_berth)?;
    let vessel_id = parse_vessel_id(&raw_vessel)?;
    state.occupancy.release(berth_id, vessel_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "berths_tests.rs"]
mod tests;
