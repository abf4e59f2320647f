//! Audit data model
//!
//! This module defines the result of a single page audit. An `AuditResult`
//! is computed once per analysis and never mutated afterwards; it is handed
//! as-is to storage and to whatever renders it.

mod keywords;

pub use keywords::KeywordDensity;

use serde::{Deserialize, Serialize};
use std::fmt;

/// The complete technical audit of one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    /// The audited URL, as given by the caller
    pub url: String,

    /// Overall SEO score in [0, 100]
    pub score: u32,

    /// Text of the first `<title>` element (may be empty)
    pub title: String,

    /// `content` of `<meta name="description">` (may be empty)
    pub meta_description: String,

    /// Text of the first `<h1>` element (may be empty)
    pub h1: String,

    /// Number of `<h1>` elements; scoring input only, never serialized
    #[serde(skip_serializing, default)]
    pub h1_count: usize,

    /// Text of every `<h2>` element, in document order
    pub h2s: Vec<String>,

    /// Every `<img>` element, in document order
    pub images: Vec<ImageInfo>,

    /// Every `<a>` element, in document order
    pub links: Vec<LinkInfo>,

    /// Milliseconds from request start until the body was received
    pub load_time: u64,

    /// Crude latency-based speed score
    pub performance_score: u32,

    /// Top ten body-text words by frequency
    pub keyword_density: KeywordDensity,

    /// Issues found, in check order
    pub recommendations: Vec<String>,
}

impl AuditResult {
    /// Number of images without a non-empty alt attribute
    pub fn missing_alt_count(&self) -> usize {
        self.images.iter().filter(|img| !img.has_alt).count()
    }

    /// Number of links classified as internal
    pub fn internal_link_count(&self) -> usize {
        self.links
            .iter()
            .filter(|link| link.link_type == LinkType::Internal)
            .count()
    }

    /// Number of links classified as external
    pub fn external_link_count(&self) -> usize {
        self.links.len() - self.internal_link_count()
    }
}

/// An `<img>` element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInfo {
    pub src: String,
    pub alt: String,
    pub has_alt: bool,
}

/// An `<a>` element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkInfo {
    pub href: String,
    pub text: String,
    #[serde(rename = "type")]
    pub link_type: LinkType,
}

/// Whether a link points at the audited site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Internal,
    External,
}

impl LinkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::External => "external",
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_audit() -> AuditResult {
        AuditResult {
            url: "https://example.com/".to_string(),
            score: 85,
            title: "Example Domain".to_string(),
            meta_description: String::new(),
            h1: "Example Domain".to_string(),
            h1_count: 1,
            h2s: vec!["More Information".to_string()],
            images: vec![
                ImageInfo {
                    src: "/logo.png".to_string(),
                    alt: "Logo".to_string(),
                    has_alt: true,
                },
                ImageInfo {
                    src: "/banner.png".to_string(),
                    alt: String::new(),
                    has_alt: false,
                },
            ],
            links: vec![
                LinkInfo {
                    href: "/about".to_string(),
                    text: "About".to_string(),
                    link_type: LinkType::Internal,
                },
                LinkInfo {
                    href: "https://other.com".to_string(),
                    text: "Other".to_string(),
                    link_type: LinkType::External,
                },
            ],
            load_time: 420,
            performance_score: 92,
            keyword_density: KeywordDensity::from_entries(vec![
                ("domain".to_string(), 5.5),
                ("example".to_string(), 4.2),
            ]),
            recommendations: vec!["Missing Meta Description".to_string()],
        }
    }

    #[test]
    fn test_counts() {
        let audit = sample_audit();
        assert_eq!(audit.missing_alt_count(), 1);
        assert_eq!(audit.internal_link_count(), 1);
        assert_eq!(audit.external_link_count(), 1);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(sample_audit()).unwrap();

        assert_eq!(json["metaDescription"], "");
        assert_eq!(json["loadTime"], 420);
        assert_eq!(json["performanceScore"], 92);
        assert_eq!(json["images"][0]["hasAlt"], true);
        assert_eq!(json["links"][0]["type"], "internal");
        assert_eq!(json["links"][1]["type"], "external");
        assert_eq!(json["keywordDensity"]["domain"], 5.5);
    }

    #[test]
    fn test_h1_count_not_serialized() {
        let json = serde_json::to_value(sample_audit()).unwrap();
        assert!(json.get("h1Count").is_none());
        assert!(json.get("h1_count").is_none());
    }

    #[test]
    fn test_link_type_display() {
        assert_eq!(LinkType::Internal.to_string(), "internal");
        assert_eq!(LinkType::External.to_string(), "external");
    }
}
