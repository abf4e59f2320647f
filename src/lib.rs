//! SEO Auditor: single-page technical SEO audits
//!
//! This crate fetches a web page, extracts the on-page SEO signals (title,
//! meta description, headings, images, links), computes keyword density,
//! scores the page and persists the resulting audit.

pub mod analyzer;
pub mod audit;
pub mod config;
pub mod output;
pub mod storage;

use thiserror::Error;

/// Main error type for auditor operations
#[derive(Debug, Error)]
pub enum AuditError {
    #[error(transparent)]
    Analyze(#[from] AnalyzeError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid audit target '{url}': {reason}")]
    InvalidTarget { url: String, reason: String },

    #[error("Daily audit quota of {limit} reached for user {user_id}")]
    QuotaExceeded { user_id: i64, limit: u32 },

    #[error("Audit not found: {0}")]
    NotFound(i64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure kinds of a single page analysis
///
/// Every analysis either produces a complete audit or fails with exactly
/// one of these kinds. None of them is retried by the analyzer.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The origin answered 403 or 429: it blocks automated fetches
    #[error("Bot protection detected at {url} (HTTP {status})")]
    BotProtectionDetected { url: String, status: u16 },

    /// The host could not be resolved
    #[error("Invalid URL or unresolvable host: {url}")]
    InvalidUrl { url: String },

    /// Any other fetch or parse failure
    #[error("Failed to analyze {url}: {message}")]
    AnalysisFailed { url: String, message: String },
}

impl AnalyzeError {
    /// Short machine-readable name of the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BotProtectionDetected { .. } => "BotProtectionDetected",
            Self::InvalidUrl { .. } => "InvalidUrl",
            Self::AnalysisFailed { .. } => "AnalysisFailed",
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for auditor operations
pub type Result<T> = std::result::Result<T, AuditError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for a single analysis
pub type AnalyzeResult<T> = std::result::Result<T, AnalyzeError>;

// Re-export commonly used types
pub use analyzer::Analyzer;
pub use audit::{AuditResult, ImageInfo, KeywordDensity, LinkInfo, LinkType};
pub use config::Config;
pub use storage::{AuditStore, SqliteStorage, StoredAudit};
