//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: process-local `EntityStore`, used when no database is
//!   configured and throughout the test suites
//! - **persistence**: PostgreSQL-backed `EntityStore` using Diesel ORM
//!
//! Adapters are thin translators between domain documents and their storage
//! representation. They contain no business logic.

pub mod memory;
pub mod persistence;
