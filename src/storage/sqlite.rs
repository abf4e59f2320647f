//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the AuditStore trait.

use crate::audit::AuditResult;
use crate::storage::generate_public_id;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{AuditStore, StorageError, StorageResult};
use crate::storage::StoredAudit;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

const AUDIT_COLUMNS: &str = "id, user_id, public_id, url, score, title, meta_description, h1,
     h1_count, h2s, images, links, load_time, performance_score, keyword_density,
     recommendations, created_at";

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = init_database(path)?;
        Ok(Self { conn })
    }

    /// Creates an in-memory database
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Persists an audit with an explicit creation time
    pub fn save_audit_at(
        &mut self,
        user_id: Option<i64>,
        audit: &AuditResult,
        created_at: DateTime<Utc>,
    ) -> StorageResult<StoredAudit> {
        let salt = self.count_audits()?;
        let h1_count: i64 = to_column("h1_count", audit.h1_count)?;
        let load_time: i64 = to_column("load_time", audit.load_time)?;
        let public_id = generate_public_id(&audit.url, &created_at, salt);
        let created_at = format_timestamp(&created_at);

        self.conn.execute(
            "INSERT INTO audits (user_id, public_id, url, score, title, meta_description, h1,
             h1_count, h2s, images, links, load_time, performance_score, keyword_density,
             recommendations, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
            params![
                user_id,
                public_id,
                audit.url,
                audit.score,
                audit.title,
                audit.meta_description,
                audit.h1,
                h1_count,
                serde_json::to_string(&audit.h2s)?,
                serde_json::to_string(&audit.images)?,
                serde_json::to_string(&audit.links)?,
                load_time,
                audit.performance_score,
                serde_json::to_string(&audit.keyword_density)?,
                serde_json::to_string(&audit.recommendations)?,
                created_at,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        tracing::debug!("Stored audit {} ({}) for {}", id, public_id, audit.url);

        Ok(StoredAudit {
            id,
            user_id,
            public_id,
            created_at,
            audit: audit.clone(),
        })
    }

    fn query_audits(
        &self,
        clause: &str,
        params: impl rusqlite::Params,
    ) -> StorageResult<Vec<StoredAudit>> {
        let sql = format!("SELECT {} FROM audits {}", AUDIT_COLUMNS, clause);
        let mut stmt = self.conn.prepare(&sql)?;

        let raw = stmt
            .query_map(params, RawAudit::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        raw.into_iter().map(RawAudit::into_stored).collect()
    }

    fn query_one(
        &self,
        clause: &str,
        params: impl rusqlite::Params,
    ) -> StorageResult<Option<StoredAudit>> {
        let sql = format!("SELECT {} FROM audits {}", AUDIT_COLUMNS, clause);
        let mut stmt = self.conn.prepare(&sql)?;

        let raw = stmt.query_row(params, RawAudit::from_row).optional()?;
        raw.map(RawAudit::into_stored).transpose()
    }
}

impl AuditStore for SqliteStorage {
    fn save_audit(
        &mut self,
        user_id: Option<i64>,
        audit: &AuditResult,
    ) -> StorageResult<StoredAudit> {
        self.save_audit_at(user_id, audit, Utc::now())
    }

    fn get_audit(&self, id: i64) -> StorageResult<Option<StoredAudit>> {
        self.query_one("WHERE id = ?1", params![id])
    }

    fn get_audit_by_public_id(&self, public_id: &str) -> StorageResult<Option<StoredAudit>> {
        self.query_one("WHERE public_id = ?1", params![public_id])
    }

    fn list_audits(&self) -> StorageResult<Vec<StoredAudit>> {
        self.query_audits("ORDER BY created_at DESC, id DESC", params![])
    }

    fn list_audits_for_user(&self, user_id: i64) -> StorageResult<Vec<StoredAudit>> {
        self.query_audits(
            "WHERE user_id = ?1 ORDER BY created_at DESC, id DESC",
            params![user_id],
        )
    }

    fn count_audits_since(&self, user_id: i64, since: DateTime<Utc>) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM audits WHERE user_id = ?1 AND created_at >= ?2",
            params![user_id, format_timestamp(&since)],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn count_audits(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM audits", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

/// Fixed-width UTC timestamps so string order matches time order
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A row as read from SQLite, JSON columns still encoded
struct RawAudit {
    id: i64,
    user_id: Option<i64>,
    public_id: String,
    url: String,
    score: u32,
    title: String,
    meta_description: String,
    h1: String,
    h1_count: i64,
    h2s: String,
    images: String,
    links: String,
    load_time: i64,
    performance_score: u32,
    keyword_density: String,
    recommendations: String,
    created_at: String,
}

impl RawAudit {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            public_id: row.get(2)?,
            url: row.get(3)?,
            score: row.get(4)?,
            title: row.get(5)?,
            meta_description: row.get(6)?,
            h1: row.get(7)?,
            h1_count: row.get(8)?,
            h2s: row.get(9)?,
            images: row.get(10)?,
            links: row.get(11)?,
            load_time: row.get(12)?,
            performance_score: row.get(13)?,
            keyword_density: row.get(14)?,
            recommendations: row.get(15)?,
            created_at: row.get(16)?,
        })
    }

    fn into_stored(self) -> StorageResult<StoredAudit> {
        let audit = AuditResult {
            url: self.url,
            score: self.score,
            title: self.title,
            meta_description: self.meta_description,
            h1: self.h1,
            h1_count: to_column("h1_count", self.h1_count)?,
            h2s: serde_json::from_str(&self.h2s)?,
            images: serde_json::from_str(&self.images)?,
            links: serde_json::from_str(&self.links)?,
            load_time: to_column("load_time", self.load_time)?,
            performance_score: self.performance_score,
            keyword_density: serde_json::from_str(&self.keyword_density)?,
            recommendations: serde_json::from_str(&self.recommendations)?,
        };

        Ok(StoredAudit {
            id: self.id,
            user_id: self.user_id,
            public_id: self.public_id,
            created_at: self.created_at,
            audit,
        })
    }
}

/// Converts between a field and its integer column without wrapping
fn to_column<T, U>(column: &'static str, value: T) -> StorageResult<U>
where
    T: Copy + ToString,
    U: TryFrom<T>,
{
    U::try_from(value).map_err(|_| StorageError::OutOfRange {
        column,
        value: value.to_string(),
    })
}

/// Opens or creates a database file with the audit schema
pub fn init_database(path: &Path) -> Result<Connection, rusqlite::Error> {
    let conn = Connection::open(path)?;

    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
    ",
    )?;

    initialize_schema(&conn)?;

    Ok(conn)
}
