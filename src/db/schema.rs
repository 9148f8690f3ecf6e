//! SQL DDL for the shelf database.

/// SQLite schema:
/// - `collections`: one row per series/volume, `title` NOT NULL
/// - `issues`: owned by a collection, removed with it through `ON DELETE CASCADE`
/// - `is_owned` stored as INTEGER 0/1
///
/// Cascades only fire while `PRAGMA foreign_keys` is on; the store enables it on every connection.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS collections (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    volume TEXT NULL,
    publication_years TEXT NULL,
    cover_image_url TEXT NULL
);

CREATE TABLE IF NOT EXISTS issues (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    collection_id INTEGER NOT NULL,
    issue_number TEXT NOT NULL,
    is_owned INTEGER NOT NULL DEFAULT 0,
    title TEXT NULL,
    cover_image_url TEXT NULL,
    release_date TEXT NULL,
    FOREIGN KEY (collection_id) REFERENCES collections (id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_issues_collection_id ON issues(collection_id);
"#;
