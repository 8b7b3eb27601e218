//! Database module: models, schema and the SQLite-backed store.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: `GroceryStore`, all persistence operations over one pool

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{GroceryList, GroceryListItem};
pub use schema::SQLITE_INIT;
pub use sqlite::{GroceryStore, SqlitePool};
