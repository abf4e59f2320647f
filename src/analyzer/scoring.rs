//! Recommendations and scores
//!
//! All thresholds are fixed; a page starts at 100 and each failed check
//! deducts independently.

use crate::analyzer::parser::PageSignals;

pub const TITLE_MIN_CHARS: usize = 30;
pub const TITLE_MAX_CHARS: usize = 60;
pub const META_MIN_CHARS: usize = 50;
pub const META_MAX_CHARS: usize = 160;

/// Load time above which a recommendation is emitted
pub const SLOW_LOAD_MS: u64 = 2000;

const TITLE_PENALTY: i64 = 15;
const META_PENALTY: i64 = 15;
const H1_PENALTY: i64 = 15;
const H2_PENALTY: i64 = 5;
const ALT_PENALTY_PER_IMAGE: i64 = 2;
const ALT_PENALTY_CAP: i64 = 10;
const LOAD_PENALTY_STEPS: [(u64, i64); 2] = [(1000, 10), (3000, 10)];

/// Number of images without alt text
fn missing_alt(signals: &PageSignals) -> usize {
    signals.images.iter().filter(|img| !img.has_alt).count()
}

/// Builds the recommendation list, in check order
///
/// Each check contributes at most one line.
pub fn recommendations(signals: &PageSignals, load_time_ms: u64) -> Vec<String> {
    let mut recs = Vec::new();

    let title_len = signals.title.chars().count();
    if title_len == 0 {
        recs.push("Missing Title Tag".to_string());
    } else if !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&title_len) {
        recs.push("Title length should be 30-60 chars".to_string());
    }

    let meta_len = signals.meta_description.chars().count();
    if meta_len == 0 {
        recs.push("Missing Meta Description".to_string());
    } else if !(META_MIN_CHARS..=META_MAX_CHARS).contains(&meta_len) {
        recs.push("Meta Description should be 50-160 chars".to_string());
    }

    match signals.h1_count {
        0 => recs.push("Missing H1 Tag".to_string()),
        1 => {}
        _ => recs.push("Multiple H1 Tags found (should be exactly one)".to_string()),
    }

    if signals.h2s.is_empty() {
        recs.push("No H2 Tags found - improve structure".to_string());
    }

    let missing = missing_alt(signals);
    if missing > 0 {
        recs.push(format!("{} images missing Alt Text", missing));
    }

    if load_time_ms > SLOW_LOAD_MS {
        recs.push(format!("Slow load time detected ({}ms)", load_time_ms));
    }

    recs
}

/// Overall SEO score in [0, 100]
pub fn seo_score(signals: &PageSignals, load_time_ms: u64) -> u32 {
    let mut score: i64 = 100;

    if signals.title.is_empty() {
        score -= TITLE_PENALTY;
    }
    if signals.meta_description.is_empty() {
        score -= META_PENALTY;
    }
    if signals.h1_count != 1 {
        score -= H1_PENALTY;
    }
    if signals.h2s.is_empty() {
        score -= H2_PENALTY;
    }

    let missing = i64::try_from(missing_alt(signals)).unwrap_or(i64::MAX);
    score -= missing.saturating_mul(ALT_PENALTY_PER_IMAGE).min(ALT_PENALTY_CAP);

    for (threshold, penalty) in LOAD_PENALTY_STEPS {
        if load_time_ms > threshold {
            score -= penalty;
        }
    }

    score.clamp(0, 100) as u32
}

/// Latency-only speed proxy: one point lost per 50ms, floored at zero
pub fn performance_score(load_time_ms: u64) -> u32 {
    100u64.saturating_sub(load_time_ms / 50) as u32
}
