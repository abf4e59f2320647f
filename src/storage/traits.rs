//! Storage traits and error types
//!
//! This module defines the trait interface for audit storage backends and
//! associated error types.

use crate::audit::AuditResult;
use crate::storage::StoredAudit;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Value {value} of column '{column}' does not fit its storage type")]
    OutOfRange { column: &'static str, value: String },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for audit storage backends
///
/// The analyzer never touches storage itself; callers hand finished audits
/// to an implementation of this trait.
pub trait AuditStore {
    /// Persists an audit and returns the stored record
    ///
    /// # Arguments
    ///
    /// * `user_id` - The caller identity, if any
    /// * `audit` - The finished audit
    fn save_audit(&mut self, user_id: Option<i64>, audit: &AuditResult)
        -> StorageResult<StoredAudit>;

    /// Gets an audit by its row ID
    fn get_audit(&self, id: i64) -> StorageResult<Option<StoredAudit>>;

    /// Gets an audit by its share token
    fn get_audit_by_public_id(&self, public_id: &str) -> StorageResult<Option<StoredAudit>>;

    /// Lists all audits, newest first
    fn list_audits(&self) -> StorageResult<Vec<StoredAudit>>;

    /// Lists one user's audits, newest first
    fn list_audits_for_user(&self, user_id: i64) -> StorageResult<Vec<StoredAudit>>;

    /// Counts audits a user ran at or after `since`
    fn count_audits_since(&self, user_id: i64, since: DateTime<Utc>) -> StorageResult<u64>;

    /// Gets total audit count
    fn count_audits(&self) -> StorageResult<u64>;
}
