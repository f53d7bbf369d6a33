//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;
use serde_json::Value;

use super::schema::entities;

/// Row struct for reading from the entities table.
///
/// `kind` is not selected; every query already filters on it.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = entities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EntityRow {
    pub id: i64,
    pub revision: i64,
    pub data: Value,
}

/// Insertable struct for creating new documents.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = entities)]
pub(crate) struct NewEntityRow<'a> {
    pub kind: &'a str,
    pub id: i64,
    pub revision: i64,
    pub data: Value,
}
