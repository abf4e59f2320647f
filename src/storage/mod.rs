//! Storage module for persisting audits
//!
//! This module handles all database operations for audits, including:
//! - SQLite database initialization and schema management
//! - Saving and loading audits, by row ID or share token
//! - Per-user daily quota accounting

mod schema;
mod sqlite;
mod traits;

pub use sqlite::{init_database, SqliteStorage};
pub use traits::{AuditStore, StorageError, StorageResult};

use crate::audit::AuditResult;
use crate::AuditError;
use chrono::{DateTime, TimeZone, Utc};
use sha2::{Digest, Sha256};
use std::path::Path;

/// Initializes or opens a storage database
pub fn open_storage(path: &Path) -> Result<SqliteStorage, AuditError> {
    Ok(SqliteStorage::new(path)?)
}

/// An audit as persisted in the database
#[derive(Debug, Clone, PartialEq)]
pub struct StoredAudit {
    pub id: i64,
    pub user_id: Option<i64>,
    /// Token for sharing the audit without exposing row IDs
    pub public_id: String,
    /// RFC 3339 timestamp, UTC
    pub created_at: String,
    pub audit: AuditResult,
}

/// Derives a share token from the audit URL, timestamp and a salt
///
/// 16 hex characters of a SHA-256 digest.
pub fn generate_public_id(url: &str, created_at: &DateTime<Utc>, salt: u64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    hasher.update(created_at.to_rfc3339().as_bytes());
    hasher.update(created_at.timestamp_subsec_nanos().to_le_bytes());
    hasher.update(salt.to_le_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..16].to_string()
}

/// Start of the UTC day containing `now`
pub fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|midnight| Utc.from_utc_datetime(&midnight))
        .unwrap_or(now)
}

/// Checks a user's daily audit quota
///
/// Anonymous callers are not limited.
///
/// # Returns
///
/// * `Ok(())` - The user may run another audit
/// * `Err(AuditError::QuotaExceeded)` - The user already ran `limit` audits today
pub fn check_quota(
    store: &dyn AuditStore,
    user_id: Option<i64>,
    limit: u32,
    now: DateTime<Utc>,
) -> Result<(), AuditError> {
    let Some(user_id) = user_id else {
        return Ok(());
    };

    let used = store.count_audits_since(user_id, start_of_day(now))?;
    tracing::debug!("User {} has run {}/{} audits today", user_id, used, limit);

    if used >= u64::from(limit) {
        return Err(AuditError::QuotaExceeded { user_id, limit });
    }

    Ok(())
}
