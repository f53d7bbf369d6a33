//! PostgreSQL-backed `EntityStore` implementation using Diesel ORM.
//!
//! Every collection shares the `entities` table. Identifiers come from a
//! per-collection counter row so each collection numbers its documents from
//! 1; the counter bump and the row insert share a transaction. Conditional
//! updates filter on the expected revision and bump it in the same
//! statement; a zero-row result is disambiguated by re-reading.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use serde_json::Value;
use tracing::debug;

use crate::domain::ports::{Collection, Document, EntityStore, EntityStoreError};

use super::models::{EntityRow, NewEntityRow};
use super::pool::{DbPool, PoolError};
use super::schema::{entities, entity_sequences};

/// Diesel-backed implementation of the `EntityStore` port.
#[derive(Clone)]
pub struct DieselEntityStore {
    pool: DbPool,
}

impl DieselEntityStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to entity store errors.
fn map_pool_error(error: PoolError) -> EntityStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            EntityStoreError::connection(message)
        }
    }
}

/// Map Diesel errors to entity store errors.
fn map_diesel_error(error: diesel::result::Error) -> EntityStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => EntityStoreError::query("record not found"),
        DieselError::QueryBuilderError(_) => EntityStoreError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            EntityStoreError::connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => EntityStoreError::query("database error"),
        _ => EntityStoreError::query("database error"),
    }
}

fn column_to_u64(value: i64, column: &str) -> Result<u64, EntityStoreError> {
    u64::try_from(value)
        .map_err(|_| EntityStoreError::query(format!("negative {column} in entities row")))
}

fn row_to_document(row: EntityRow) -> Result<Document, EntityStoreError> {
    Ok(Document {
        id: column_to_u64(row.id, "id")?,
        revision: column_to_u64(row.revision, "revision")?,
        data: row.data,
    })
}

/// Identifiers above `i64::MAX` cannot exist in the table.
fn db_id(id: u64) -> Option<i64> {
    i64::try_from(id).ok()
}

#[async_trait]
impl EntityStore for DieselEntityStore {
    async fn insert(
        &self,
        collection: Collection,
        data: Value,
    ) -> Result<Document, EntityStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let kind = collection.as_str();

        // The counter bump rolls back with a failed row insert.
        let row = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let id: i64 = diesel::update(entity_sequences::table.find(kind))
                        .set(entity_sequences::last_id.eq(entity_sequences::last_id + 1))
                        .returning(entity_sequences::last_id)
                        .get_result(conn)
                        .await?;

                    diesel::insert_into(entities::table)
                        .values(NewEntityRow {
                            kind,
                            id,
                            revision: 1,
                            data,
                        })
                        .returning(EntityRow::as_returning())
                        .get_result(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        row_to_document(row)
    }

    async fn get(
        &self,
        collection: Collection,
        id: u64,
    ) -> Result<Option<Document>, EntityStoreError> {
        let Some(id) = db_id(id) else {
            return Ok(None);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        entities::table
            .find((collection.as_str(), id))
            .select(EntityRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_document)
            .transpose()
    }

    async fn scan(&self, collection: Collection) -> Result<Vec<Document>, EntityStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<EntityRow> = entities::table
            .filter(entities::kind.eq(collection.as_str()))
            .order(entities::id.asc())
            .select(EntityRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_document).collect()
    }

    async fn update(
        &self,
        collection: Collection,
        id: u64,
        data: Value,
        expected_revision: Option<u64>,
    ) -> Result<Option<Document>, EntityStoreError> {
        let Some(db_id) = db_id(id) else {
            return Ok(None);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let kind = collection.as_str();
        let changes = (
            entities::data.eq(data),
            entities::revision.eq(entities::revision + 1),
        );

        let Some(expected) = expected_revision else {
            return diesel::update(entities::table.find((kind, db_id)))
                .set(changes)
                .returning(EntityRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?
                .map(row_to_document)
                .transpose();
        };

        // A revision beyond i64 never matches a stored row.
        let expected_db = i64::try_from(expected).unwrap_or(-1);
        let updated: Option<EntityRow> = diesel::update(
            entities::table
                .find((kind, db_id))
                .filter(entities::revision.eq(expected_db)),
        )
        .set(changes)
        .returning(EntityRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
        if let Some(row) = updated {
            return row_to_document(row).map(Some);
        }

        let current: Option<i64> = entities::table
            .find((kind, db_id))
            .select(entities::revision)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        match current {
            Some(actual) => Err(EntityStoreError::revision_mismatch(
                expected,
                column_to_u64(actual, "revision")?,
            )),
            None => Ok(None),
        }
    }

    async fn delete(&self, collection: Collection, id: u64) -> Result<bool, EntityStoreError> {
        let Some(id) = db_id(id) else {
            return Ok(false);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(entities::table.find((collection.as_str(), id)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn rows_convert_to_documents() {
        let row = EntityRow {
            id: 3,
            revision: 2,
            data: json!({ "number": 7, "occupant": null }),
        };
        let document = row_to_document(row).expect("valid row");
        assert_eq!((document.id, document.revision), (3, 2));
    }

    #[rstest]
    fn negative_columns_are_query_errors() {
        let row = EntityRow {
            id: -1,
            revision: 1,
            data: Value::Null,
        };
        assert!(matches!(
            row_to_document(row),
            Err(EntityStoreError::Query { .. })
        ));
    }

    #[rstest]
    #[case(1, Some(1))]
    #[case(u64::MAX, None)]
    fn out_of_range_ids_do_not_resolve(#[case] id: u64, #[case] expected: Option<i64>) {
        assert_eq!(db_id(id), expected);
    }

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, EntityStoreError::connection("timed out"));
    }

    #[rstest]
    fn closed_connections_map_to_connection_errors() {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        let err = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("closed".to_owned()),
        ));
        assert!(matches!(err, EntityStoreError::Connection { .. }));
        assert!(matches!(
            map_diesel_error(DieselError::NotFound),
            EntityStoreError::Query { .. }
        ));
    }
}
