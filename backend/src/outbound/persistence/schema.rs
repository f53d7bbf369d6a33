//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. When
//! migrations change the schema, update this file to reflect those changes;
//! `diesel print-schema` can generate it from a live database.

diesel::table! {
    /// Documents of every collection.
    ///
    /// Keyed by `(kind, id)`. There are deliberately no foreign keys: the
    /// relationship between berths and vessels lives inside `data` and is
    /// maintained by the domain.
    entities (kind, id) {
        /// Collection name, e.g. `vessels`.
        kind -> Text,
        /// Identifier allocated from `entity_sequences`.
        id -> Int8,
        /// Optimistic concurrency token; starts at 1.
        revision -> Int8,
        /// Document body.
        data -> Jsonb,
    }
}

diesel::table! {
    /// Per-collection identifier counters.
    entity_sequences (kind) {
        kind -> Text,
        last_id -> Int8,
    }
}

diesel::allow_tables_to_appear_in_same_query!(entities, entity_sequences);
