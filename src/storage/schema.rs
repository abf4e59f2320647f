//! Database schema definitions
//!
//! This module contains the SQL schema for the audit database.

/// SQL schema for the database
///
/// List and map fields of an audit are stored as JSON text.
pub const SCHEMA_SQL: &str = r#"
-- One row per completed audit
CREATE TABLE IF NOT EXISTS audits (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER,
    public_id TEXT NOT NULL UNIQUE,
    url TEXT NOT NULL,
    score INTEGER NOT NULL,
    title TEXT NOT NULL,
    meta_description TEXT NOT NULL,
    h1 TEXT NOT NULL,
    h1_count INTEGER NOT NULL DEFAULT 0,
    h2s TEXT NOT NULL,
    images TEXT NOT NULL,
    links TEXT NOT NULL,
    load_time INTEGER NOT NULL,
    performance_score INTEGER NOT NULL,
    keyword_density TEXT NOT NULL,
    recommendations TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_audits_user_created ON audits(user_id, created_at);
CREATE INDEX IF NOT EXISTS idx_audits_url ON audits(url);
"#;

/// Initializes the database schema
///
/// Safe to call on an existing database; every statement is `IF NOT EXISTS`.
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
