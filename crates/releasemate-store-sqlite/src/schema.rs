//! SQL schema for the ReleaseMate SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS projects (
    project_id  TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    client_name TEXT NOT NULL DEFAULT '',
    location    TEXT NOT NULL DEFAULT '',
    shoot_date  TEXT NOT NULL,          -- YYYY-MM-DD
    legal_text  TEXT NOT NULL,
    created_at  TEXT NOT NULL           -- RFC 3339 UTC
);

-- Releases are strictly append-only.
-- Rows leave only when their project is deleted.
CREATE TABLE IF NOT EXISTS releases (
    release_id     TEXT PRIMARY KEY,
    project_id     TEXT NOT NULL REFERENCES projects(project_id) ON DELETE CASCADE,
    model_name     TEXT NOT NULL,
    is_minor       INTEGER NOT NULL,
    execution_date TEXT NOT NULL,       -- YYYY-MM-DD
    created_at     TEXT NOT NULL,       -- RFC 3339 UTC
    record_json    TEXT NOT NULL        -- full ReleaseRecord
);

CREATE TRIGGER IF NOT EXISTS releases_append_only
BEFORE UPDATE ON releases
BEGIN
    SELECT RAISE(ABORT, 'releases are append-only');
END;

CREATE INDEX IF NOT EXISTS releases_project_idx ON releases(project_id);
CREATE INDEX IF NOT EXISTS projects_created_idx ON projects(created_at);

PRAGMA user_version = 1;
";
