//! Translation of entity store failures into domain errors.

use serde_json::json;
use tracing::error;

use super::Error;
use super::ports::EntityStoreError;

/// Map a driven-port failure onto the domain error taxonomy.
///
/// Transport failures are logged here, at error level, so they are recorded
/// once regardless of which service hit them.
pub(crate) fn map_store_error(err: EntityStoreError) -> Error {
    match err {
        EntityStoreError::Connection { message } => {
            error!(%message, "entity store unavailable");
            Error::service_unavailable(format!("entity store unavailable: {message}"))
        }
        EntityStoreError::Query { message } => {
            error!(%message, "entity store query failed");
            Error::internal(format!("entity store error: {message}"))
        }
        EntityStoreError::RevisionMismatch { expected, actual } => {
            revision_conflict(expected, actual)
        }
    }
}

/// Conflict raised when a conditional write lost a race.
pub(crate) fn revision_conflict(expected: u64, actual: u64) -> Error {
    Error::conflict("the resource was modified concurrently; retry the request").with_details(
        json!({
            "expectedRevision": expected,
            "actualRevision": actual,
            "code": "revision_mismatch",
        }),
    )
}
