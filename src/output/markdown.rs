//! Markdown audit reports
//!
//! This module renders a single audit as a human-readable markdown report,
//! covering the scores, on-page signals, images, links, keywords and
//! recommendations.

use crate::audit::AuditResult;
use crate::storage::StoredAudit;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown report for a stored audit
///
/// # Arguments
///
/// * `stored` - The stored audit
/// * `output_path` - Path where the markdown file should be written
pub fn write_markdown_report(stored: &StoredAudit, output_path: &Path) -> crate::Result<()> {
    let markdown = format_stored_report(stored);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a stored audit, including its identifiers, as markdown
pub fn format_stored_report(stored: &StoredAudit) -> String {
    let mut md = format_markdown_report(&stored.audit);

    md.push_str("## Record\n\n");
    md.push_str(&format!("- **Audit ID**: {}\n", stored.id));
    md.push_str(&format!("- **Share ID**: {}\n", stored.public_id));
    md.push_str(&format!("- **Created**: {}\n", stored.created_at));
    if let Some(user_id) = stored.user_id {
        md.push_str(&format!("- **User**: {}\n", user_id));
    }

    md
}

/// Formats an audit as markdown
pub fn format_markdown_report(audit: &AuditResult) -> String {
    let mut md = String::new();

    md.push_str(&format!("# SEO Audit: {}\n\n", audit.url));

    // Scores
    md.push_str("## Scores\n\n");
    md.push_str(&format!("- **SEO Score**: {}/100\n", audit.score));
    md.push_str(&format!(
        "- **Performance Score**: {}/100\n",
        audit.performance_score
    ));
    md.push_str(&format!("- **Load Time**: {}ms\n\n", audit.load_time));

    // On-page signals
    md.push_str("## On-Page Signals\n\n");
    md.push_str(&format!("- **Title**: {}\n", or_none(&audit.title)));
    md.push_str(&format!(
        "- **Meta Description**: {}\n",
        or_none(&audit.meta_description)
    ));
    md.push_str(&format!("- **H1**: {}\n", or_none(&audit.h1)));
    if audit.h2s.is_empty() {
        md.push_str("- **H2s**: _none_\n\n");
    } else {
        md.push_str(&format!("- **H2s** ({}):\n", audit.h2s.len()));
        for h2 in &audit.h2s {
            md.push_str(&format!("  - {}\n", h2.trim()));
        }
        md.push('\n');
    }

    // Images
    md.push_str("## Images\n\n");
    md.push_str(&format!(
        "{} images, {} missing alt text\n\n",
        audit.images.len(),
        audit.missing_alt_count()
    ));
    let missing: Vec<_> = audit.images.iter().filter(|img| !img.has_alt).collect();
    if !missing.is_empty() {
        md.push_str("| Image without alt |\n");
        md.push_str("|-------------------|\n");
        for img in missing {
            md.push_str(&format!("| {} |\n", or_none(&img.src)));
        }
        md.push('\n');
    }

    // Links
    md.push_str("## Links\n\n");
    md.push_str(&format!(
        "- **Internal**: {}\n- **External**: {}\n\n",
        audit.internal_link_count(),
        audit.external_link_count()
    ));

    // Keywords
    if !audit.keyword_density.is_empty() {
        md.push_str("## Keyword Density\n\n");
        md.push_str("| Keyword | Density |\n");
        md.push_str("|---------|---------|\n");
        for (word, pct) in audit.keyword_density.iter() {
            md.push_str(&format!("| {} | {:.2}% |\n", word, pct));
        }
        md.push('\n');
    }

    // Recommendations
    md.push_str("## Recommendations\n\n");
    if audit.recommendations.is_empty() {
        md.push_str("No issues found.\n\n");
    } else {
        for (i, rec) in audit.recommendations.iter().enumerate() {
            md.push_str(&format!("{}. {}\n", i + 1, rec));
        }
        md.push('\n');
    }

    md
}

fn or_none(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        "_missing_"
    } else {
        trimmed
    }
}
