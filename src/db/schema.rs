//! SQL DDL for initializing the grocery store.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT on both tables
/// - `purchased` BOOLEAN (stored as INTEGER 0/1)
/// - `grocery_list_id` referencing the owning list; the cascade on list
///   deletion is performed by the store inside a transaction, not by the
///   schema
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS grocery_lists (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS grocery_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    purchased INTEGER NOT NULL DEFAULT 0,
    grocery_list_id INTEGER NOT NULL REFERENCES grocery_lists(id)
);

CREATE INDEX IF NOT EXISTS idx_grocery_items_list_id ON grocery_items(grocery_list_id);
"#;
