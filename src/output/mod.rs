//! Output module for presenting audits
//!
//! This module handles:
//! - Rendering audits as markdown reports
//! - Aggregating statistics over the stored audit history

mod markdown;
pub mod stats;

pub use markdown::{format_markdown_report, format_stored_report, write_markdown_report};
pub use stats::{compute_statistics, load_statistics, print_statistics, AuditStatistics};
