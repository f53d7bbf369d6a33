//! Domain primitives, ports and services.
//!
//! Purpose: model vessels, berths and the occupancy relationship between
//! them, and enforce the referential-integrity invariant ("a berth's
//! occupant, if any, is a vessel that exists") on top of a store that offers
//! no cross-collection constraints.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — transport-agnostic error payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - Vessel, Berth and their drafts — validated entities.
//! - VesselService, BerthService, OccupancyManager — driving port
//!   implementations generic over an [`ports::EntityStore`].

pub mod berth;
mod berth_repository;
mod berth_service;
pub mod error;
mod occupancy;
pub mod ports;
mod store_errors;
pub mod trace_id;
pub mod vessel;
mod vessel_repository;
mod vessel_service;

pub use self::berth::{Berth, BerthDraft, BerthId, BerthNumber, BerthValidationError, Occupancy};
pub(crate) use self::berth_repository::BerthRepository;
pub use self::berth_service::BerthService;
pub use self::error::{Error, ErrorCode};
pub use self::occupancy::OccupancyManager;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::vessel::{Vessel, VesselDraft, VesselId, VesselValidationError};
pub(crate) use self::vessel_repository::VesselRepository;
pub use self::vessel_service::VesselService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use marina::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("berth 1 is not empty"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
