//! Storage accessor: records, schema and the per-request SQLite session.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and validated inserts
//! - `schema.rs`: SQL DDL applied at startup (idempotent)
//! - `sqlite.rs`: `Store` (connect options) and `Session` (one connection per request)

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Collection, CollectionDetail, CollectionStats, Issue, NewCollection, NewIssue};
pub use schema::SQLITE_INIT;
pub use sqlite::{Session, Store};
