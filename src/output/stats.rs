//! Statistics over stored audits
//!
//! This module aggregates the audit history for the dashboard-style
//! `stats` command.

use crate::storage::{AuditStore, StoredAudit};
use crate::AuditError;
use std::collections::HashMap;

/// Number of recurring recommendations reported
const TOP_RECOMMENDATIONS: usize = 5;

/// Aggregate view of the audit history
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditStatistics {
    /// Total number of stored audits
    pub total_audits: u64,

    /// Number of distinct audited URLs
    pub unique_urls: u64,

    /// Mean SEO score, 0 when there are no audits
    pub average_score: f64,

    /// Mean performance score
    pub average_performance: f64,

    /// Mean load time in milliseconds
    pub average_load_time: f64,

    /// Most frequent recommendations with their counts
    pub top_recommendations: Vec<(String, u64)>,
}

/// Loads statistics from storage
pub fn load_statistics(storage: &dyn AuditStore) -> Result<AuditStatistics, AuditError> {
    let audits = storage.list_audits()?;
    Ok(compute_statistics(&audits))
}

/// Computes statistics over a set of audits
pub fn compute_statistics(audits: &[StoredAudit]) -> AuditStatistics {
    if audits.is_empty() {
        return AuditStatistics::default();
    }

    let n = audits.len() as f64;
    let mean = |f: fn(&StoredAudit) -> f64| audits.iter().map(f).sum::<f64>() / n;

    let mut urls: Vec<&str> = audits.iter().map(|s| s.audit.url.as_str()).collect();
    urls.sort_unstable();
    urls.dedup();

    let mut rec_counts: HashMap<&str, u64> = HashMap::new();
    for stored in audits {
        for rec in &stored.audit.recommendations {
            *rec_counts.entry(rec.as_str()).or_insert(0) += 1;
        }
    }

    let mut top: Vec<(String, u64)> = rec_counts
        .into_iter()
        .map(|(rec, count)| (rec.to_string(), count))
        .collect();
    top.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    top.truncate(TOP_RECOMMENDATIONS);

    AuditStatistics {
        total_audits: audits.len() as u64,
        unique_urls: urls.len() as u64,
        average_score: mean(|s| f64::from(s.audit.score)),
        average_performance: mean(|s| f64::from(s.audit.performance_score)),
        average_load_time: mean(|s| s.audit.load_time as f64),
        top_recommendations: top,
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &AuditStatistics) {
    println!("=== Audit Statistics ===\n");

    println!("Overview:");
    println!("  Total audits: {}", stats.total_audits);
    println!("  Unique URLs: {}", stats.unique_urls);
    println!();

    if stats.total_audits == 0 {
        println!("No audits recorded yet.");
        return;
    }

    println!("Averages:");
    println!("  SEO score: {:.1}", stats.average_score);
    println!("  Performance score: {:.1}", stats.average_performance);
    println!("  Load time: {:.0}ms", stats.average_load_time);
    println!();

    if !stats.top_recommendations.is_empty() {
        println!("Most Common Issues:");
        for (rec, count) in &stats.top_recommendations {
            let percentage = (*count as f64 / stats.total_audits as f64) * 100.0;
            println!("  {} ({} audits, {:.1}%)", rec, count, percentage);
        }
    }
}
