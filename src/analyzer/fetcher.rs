//! HTTP fetcher for audit targets
//!
//! This module handles the single outbound request of an audit:
//! - Building the HTTP client with the bot user agent and bounded timeouts
//! - Timing the request from send until the full body is received
//! - Classifying failures into the fixed audit error kinds

use crate::config::{FetcherConfig, UserAgentConfig};
use crate::AnalyzeError;
use reqwest::{Client, StatusCode};
use std::error::Error as StdError;
use std::time::{Duration, Instant};

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after the client's default redirect handling
    pub final_url: String,
    /// Page body content
    pub body: String,
    /// Milliseconds from request start until the body was received
    pub load_time_ms: u64,
}

/// Builds an HTTP client with proper configuration
///
/// The client keeps reqwest's default redirect policy. Timeouts come from
/// the `[fetcher]` section so an unresponsive host cannot hang an audit.
///
/// # Example
///
/// ```no_run
/// use seo_auditor::analyzer::build_http_client;
/// use seo_auditor::config::{FetcherConfig, UserAgentConfig};
///
/// let client = build_http_client(&UserAgentConfig::default(), &FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    fetcher: &FetcherConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(fetcher.timeout_secs))
        .connect_timeout(Duration::from_secs(fetcher.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page and measures its load time
///
/// # Error Classification
///
/// | Condition | Error |
/// |-----------|-------|
/// | HTTP 403 / 429 | `BotProtectionDetected` |
/// | DNS resolution failure | `InvalidUrl` |
/// | Any other status >= 400, timeout, refused connection, body read error | `AnalysisFailed` |
///
/// Nothing is retried.
pub async fn fetch_page(client: &Client, url: &str) -> Result<FetchedPage, AnalyzeError> {
    let start = Instant::now();

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| classify_request_error(url, &e))?;

    let status = response.status();
    let final_url = response.url().to_string();

    if is_bot_protection(status) {
        tracing::warn!("Bot protection at {} (HTTP {})", url, status.as_u16());
        return Err(AnalyzeError::BotProtectionDetected {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    if status.is_client_error() || status.is_server_error() {
        tracing::warn!("Unexpected status from {}: {}", url, status);
        return Err(AnalyzeError::AnalysisFailed {
            url: url.to_string(),
            message: format!("HTTP status {}", status),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| classify_request_error(url, &e))?;

    let load_time_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    tracing::debug!(
        "Fetched {} (HTTP {}, {} bytes, {}ms, final URL {})",
        url,
        status.as_u16(),
        body.len(),
        load_time_ms,
        final_url
    );

    Ok(FetchedPage {
        final_url,
        body,
        load_time_ms,
    })
}

/// Returns true for the statuses sites use to turn bots away
fn is_bot_protection(status: StatusCode) -> bool {
    status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS
}

/// Maps a transport-level reqwest error to an audit error kind
fn classify_request_error(url: &str, error: &reqwest::Error) -> AnalyzeError {
    if let Some(status) = error.status() {
        if is_bot_protection(status) {
            return AnalyzeError::BotProtectionDetected {
                url: url.to_string(),
                status: status.as_u16(),
            };
        }
    }

    if is_dns_error(error) {
        tracing::warn!("Could not resolve host for {}", url);
        return AnalyzeError::InvalidUrl {
            url: url.to_string(),
        };
    }

    let message = if error.is_timeout() {
        "Request timeout".to_string()
    } else if error.is_connect() {
        format!("Connection failed: {}", error_chain(error))
    } else {
        error_chain(error)
    };

    tracing::warn!("Fetch of {} failed: {}", url, message);
    AnalyzeError::AnalysisFailed {
        url: url.to_string(),
        message,
    }
}

/// Walks the error source chain looking for a resolver failure
///
/// reqwest reports DNS failures as connect errors; only the wrapped
/// resolver error says what actually went wrong.
fn is_dns_error(error: &reqwest::Error) -> bool {
    let mut current: Option<&(dyn StdError + 'static)> = Some(error);
    while let Some(err) = current {
        let message = err.to_string().to_lowercase();
        if message.contains("dns error")
            || message.contains("failed to lookup address")
            || message.contains("name or service not known")
            || message.contains("no such host")
            || message.contains("nodename nor servname")
        {
            return true;
        }
        current = err.source();
    }
    false
}

/// Flattens an error and its sources into one diagnostic line
fn error_chain(error: &reqwest::Error) -> String {
    let mut parts = vec![error.to_string()];
    let mut current = error.source();
    while let Some(err) = current {
        parts.push(err.to_string());
        current = err.source();
    }
    parts.join(": ")
}
