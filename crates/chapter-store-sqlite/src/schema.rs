//! SQL schema for the chapter SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per document. `seq` preserves insertion order, which is the
-- store-native order handed back by list queries.
CREATE TABLE IF NOT EXISTS documents (
    seq         INTEGER PRIMARY KEY AUTOINCREMENT,
    id          TEXT NOT NULL UNIQUE,
    collection  TEXT NOT NULL,   -- 'events' | 'news' | 'team-members'
    body        TEXT NOT NULL,   -- JSON object, without the id
    created_at  TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

CREATE INDEX IF NOT EXISTS documents_collection_idx ON documents(collection, seq);

PRAGMA user_version = 1;
";
