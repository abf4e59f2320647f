//! Page analyzer
//!
//! This module contains the audit pipeline for a single URL:
//! - HTTP fetching with load-time measurement and error classification
//! - HTML parsing and SEO signal extraction
//! - Keyword density over the visible body text
//! - Recommendations, SEO score and performance score
//!
//! Each call to [`Analyzer::analyze`] is independent. The analyzer holds no
//! mutable state, so one instance can serve many concurrent audits.

mod fetcher;
mod keywords;
mod parser;
mod scoring;

pub use fetcher::{build_http_client, fetch_page, FetchedPage};
pub use keywords::{keyword_density, MAX_KEYWORDS};
pub use parser::{classify_link, extract_signals, PageSignals};
pub use scoring::{performance_score, recommendations, seo_score};

use crate::audit::AuditResult;
use crate::config::Config;
use crate::AnalyzeError;
use reqwest::Client;
use url::Url;

/// Fetches and audits pages
#[derive(Debug, Clone)]
pub struct Analyzer {
    client: Client,
}

impl Analyzer {
    /// Creates an analyzer using the user agent and timeouts from `config`
    pub fn new(config: &Config) -> crate::Result<Self> {
        let client = build_http_client(&config.user_agent, &config.fetcher)?;
        Ok(Self { client })
    }

    /// Creates an analyzer around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Runs a full audit of `url`
    ///
    /// The URL is expected to be an absolute http(s) URL already validated
    /// by the caller. Either a complete audit or one classified error is
    /// returned.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use seo_auditor::Analyzer;
    /// use reqwest::Client;
    ///
    /// # async fn example() -> Result<(), seo_auditor::AnalyzeError> {
    /// let analyzer = Analyzer::with_client(Client::new());
    /// let audit = analyzer.analyze("https://example.com/").await?;
    /// println!("{} scored {}", audit.url, audit.score);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn analyze(&self, url: &str) -> Result<AuditResult, AnalyzeError> {
        tracing::debug!("Auditing {}", url);
        let page = fetch_page(&self.client, url).await?;
        let audit = analyze_html(url, &page.body, page.load_time_ms)?;

        tracing::info!(
            "Audited {}: score {}, performance {}, {} recommendations",
            url,
            audit.score,
            audit.performance_score,
            audit.recommendations.len()
        );

        Ok(audit)
    }
}

/// Audits markup that has already been fetched
///
/// Used directly when a site blocks the bot and the HTML is supplied by
/// hand. `load_time_ms` is reported as-is and feeds the timing checks.
pub fn analyze_html(url: &str, html: &str, load_time_ms: u64) -> Result<AuditResult, AnalyzeError> {
    let hostname = request_hostname(url)?;
    let signals = extract_signals(html, &hostname);

    let recommendations = recommendations(&signals, load_time_ms);
    let score = seo_score(&signals, load_time_ms);
    let keyword_density = keyword_density(&signals.body_text);

    Ok(AuditResult {
        url: url.to_string(),
        score,
        title: signals.title,
        meta_description: signals.meta_description,
        h1: signals.h1,
        h1_count: signals.h1_count,
        h2s: signals.h2s,
        images: signals.images,
        links: signals.links,
        load_time: load_time_ms,
        performance_score: performance_score(load_time_ms),
        keyword_density,
        recommendations,
    })
}

/// Host of the audited URL, used to tell internal links from external ones
fn request_hostname(url: &str) -> Result<String, AnalyzeError> {
    let parsed = Url::parse(url).map_err(|e| AnalyzeError::AnalysisFailed {
        url: url.to_string(),
        message: format!("URL parse error: {}", e),
    })?;

    parsed
        .host_str()
        .map(str::to_string)
        .ok_or_else(|| AnalyzeError::AnalysisFailed {
            url: url.to_string(),
            message: "URL has no host".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::LinkType;

    const IDEAL_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
<title>Rust Crab Care: The Complete Owner Guide</title>
<meta name="description" content="Everything you need to know about keeping a healthy crab, from feeding to housing.">
</head>
<body>
<h1>Crab Care Guide</h1>
<h2>Feeding</h2>
<p>Crabs enjoy varied food. Feed crabs daily.</p>
<h2>Housing</h2>
<img src="/crab.jpg" alt="A happy crab">
<a href="/contact">Contact</a>
<a href="https://other.com/crabs">More crabs</a>
</body>
</html>"#;

    #[test]
    fn test_ideal_page_scores_full_marks() {
        let audit = analyze_html("https://example.com/", IDEAL_PAGE, 300).unwrap();

        assert_eq!(audit.score, 100);
        assert!(audit.recommendations.is_empty());
        assert_eq!(audit.performance_score, 94);
        assert_eq!(audit.load_time, 300);
        assert_eq!(audit.title, "Rust Crab Care: The Complete Owner Guide");
        assert_eq!(audit.h1, "Crab Care Guide");
        assert_eq!(audit.h1_count, 1);
        assert_eq!(audit.h2s, vec!["Feeding", "Housing"]);
        assert_eq!(audit.images.len(), 1);
        assert_eq!(audit.links[0].link_type, LinkType::Internal);
        assert_eq!(audit.links[1].link_type, LinkType::External);
    }

    #[test]
    fn test_worst_case_page() {
        let html = r#"<html><body>
            <h2>One</h2><h2>Two</h2>
            <img src="/a.png"><img src="/b.png"><img src="/c.png">
            </body></html>"#;
        let audit = analyze_html("https://example.com/", html, 4500).unwrap();

        assert_eq!(
            audit.recommendations,
            vec![
                "Missing Title Tag",
                "Missing Meta Description",
                "Missing H1 Tag",
                "3 images missing Alt Text",
                "Slow load time detected (4500ms)",
            ]
        );
        assert_eq!(audit.score, 29);
        assert_eq!(audit.performance_score, 10);
    }

    #[test]
    fn test_keyword_density_from_body() {
        let audit = analyze_html("https://example.com/", IDEAL_PAGE, 0).unwrap();

        assert!(audit.keyword_density.len() <= MAX_KEYWORDS);
        // "crabs" appears three times, more than any other word
        assert_eq!(audit.keyword_density.words()[0], "crabs");
        // Title text lives in <head> and must not count
        assert!(audit.keyword_density.get("owner").is_none());
    }

    #[test]
    fn test_inline_markup_does_not_split_keywords() {
        let html = "<html><body><p>un<em>believ</em>able unbelievable</p></body></html>";
        let audit = analyze_html("https://example.com/", html, 0).unwrap();

        assert_eq!(audit.keyword_density.words(), vec!["unbelievable"]);
        assert_eq!(audit.keyword_density.get("unbelievable"), Some(100.0));
    }

    #[test]
    fn test_deterministic_for_same_html() {
        let first = analyze_html("https://example.com/", IDEAL_PAGE, 500).unwrap();
        let second = analyze_html("https://example.com/", IDEAL_PAGE, 500).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_url_fails_without_partial_result() {
        let result = analyze_html("not a url", IDEAL_PAGE, 0);
        assert!(matches!(
            result,
            Err(AnalyzeError::AnalysisFailed { .. })
        ));
    }

    #[test]
    fn test_analyzer_builds_from_config() {
        let config: Config = crate::config::parse_config(
            r#"
[user-agent]
bot-name = "SEOBot"
bot-version = "1.0"
contact-url = "https://example.com/bot"

[output]
database-path = "./audits.db"
"#,
        )
        .unwrap();
        assert!(Analyzer::new(&config).is_ok());
    }

    #[test]
    fn test_unencodable_user_agent_is_client_error() {
        let mut config: Config = crate::config::parse_config(
            r#"
[user-agent]
bot-name = "SEOBot"
bot-version = "1.0"
contact-url = "https://example.com/bot"

[output]
database-path = "./audits.db"
"#,
        )
        .unwrap();
        config.user_agent.bot_name = "Bad\nBot".to_string();

        let result = Analyzer::new(&config);
        assert!(matches!(result, Err(crate::AuditError::Reqwest(_))));
    }
}
