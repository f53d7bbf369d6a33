//! Driven port for the document-oriented entity store.
//!
//! The store keys documents by collection and a store-generated integer id.
//! It offers point lookup, full scan, insert, whole-document update and
//! delete, and nothing else: no secondary indexes and no transaction spanning
//! more than one document. Every document carries a revision that increases
//! on each write, which is the only concurrency primitive available.

use async_trait::async_trait;
use serde_json::Value;

use super::define_port_error;

define_port_error! {
    /// Errors raised by entity store adapters.
    pub enum EntityStoreError {
        /// Store connection could not be established.
        Connection { message: String } => "entity store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "entity store query failed: {message}",
        /// A conditional update observed a different revision.
        RevisionMismatch { expected: u64, actual: u64 } =>
            "revision mismatch: expected {expected}, found {actual}",
    }
}

/// Collections held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Vessel documents.
    Vessels,
    /// Berth documents, including their occupant.
    Berths,
}

impl Collection {
    /// Stable collection name used as the storage key prefix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vessels => "vessels",
            Self::Berths => "berths",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored document: identifier, revision and opaque JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Identifier, unique within the collection and never reused.
    pub id: u64,
    /// Starts at 1 and grows by one on every update.
    pub revision: u64,
    /// Caller-owned JSON body.
    pub data: Value,
}

/// Port for document persistence.
///
/// # Revision semantics
///
/// - Inserted documents start at revision 1.
/// - Every successful update increments the revision by one.
/// - `update` with `expected_revision: Some(n)` succeeds only when the stored
///   revision is `n`; otherwise it fails with
///   [`EntityStoreError::RevisionMismatch`]. `None` overwrites
///   unconditionally.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Insert a document and return it with its generated id.
    async fn insert(
        &self,
        collection: Collection,
        data: Value,
    ) -> Result<Document, EntityStoreError>;

    /// Fetch a document by id.
    async fn get(
        &self,
        collection: Collection,
        id: u64,
    ) -> Result<Option<Document>, EntityStoreError>;

    /// Read every document of a collection, ordered by id.
    async fn scan(&self, collection: Collection) -> Result<Vec<Document>, EntityStoreError>;

    /// Replace a document's body.
    ///
    /// Returns `Ok(None)` when no document has that id.
    async fn update(
        &self,
        collection: Collection,
        id: u64,
        data: Value,
        expected_revision: Option<u64>,
    ) -> Result<Option<Document>, EntityStoreError>;

    /// Delete a document; returns whether one was removed.
    async fn delete(&self, collection: Collection, id: u64) -> Result<bool, EntityStoreError>;
}
