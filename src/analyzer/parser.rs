//! HTML signal extraction
//!
//! This module parses page markup and pulls out the on-page SEO signals:
//! - Title and meta description
//! - Heading structure (h1 count and text, h2 texts)
//! - Images with their alt text
//! - Links, classified as internal or external
//! - Visible body text for keyword analysis

use crate::audit::{ImageInfo, LinkInfo, LinkType};
use scraper::{ElementRef, Html, Node, Selector};

/// Signals extracted from a single HTML document
#[derive(Debug, Clone, Default)]
pub struct PageSignals {
    pub title: String,
    pub meta_description: String,
    pub h1: String,
    pub h1_count: usize,
    pub h2s: Vec<String>,
    pub images: Vec<ImageInfo>,
    pub links: Vec<LinkInfo>,
    /// Visible body text nodes concatenated in document order
    pub body_text: String,
}

/// Elements whose text never renders
const HIDDEN_TEXT_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Parses HTML content and extracts the SEO signals
///
/// The html5ever-based parser accepts any input, so this never fails.
/// `hostname` is the host of the audited URL, used for link classification.
///
/// # Example
///
/// ```
/// use seo_auditor::analyzer::extract_signals;
///
/// let html = r#"<html><head><title>Test</title></head><body><h1>Hi</h1><a href="/x">X</a></body></html>"#;
/// let signals = extract_signals(html, "example.com");
/// assert_eq!(signals.title, "Test");
/// assert_eq!(signals.h1_count, 1);
/// assert_eq!(signals.links.len(), 1);
/// ```
pub fn extract_signals(html: &str, hostname: &str) -> PageSignals {
    let document = Html::parse_document(html);

    let title = first_text(&document, "title");
    let meta_description = extract_meta_description(&document);
    let h1s = all_texts(&document, "h1");
    let h2s = all_texts(&document, "h2");
    let images = extract_images(&document);
    let links = extract_links(&document, hostname);
    let body_text = extract_body_text(&document);

    tracing::debug!(
        "Extracted {} h1, {} h2, {} images, {} links",
        h1s.len(),
        h2s.len(),
        images.len(),
        links.len()
    );

    PageSignals {
        title,
        meta_description,
        h1: h1s.first().cloned().unwrap_or_default(),
        h1_count: h1s.len(),
        h2s,
        images,
        links,
        body_text,
    }
}

/// Classifies a link href relative to the audited host
///
/// Internal when the href is root-relative or mentions the hostname
/// anywhere. The substring test is coarse:
/// `https://example.com.evil.com/` counts as internal to `example.com`.
pub fn classify_link(href: &str, hostname: &str) -> LinkType {
    if href.starts_with('/') || href.contains(hostname) {
        LinkType::Internal
    } else {
        LinkType::External
    }
}

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// Text of the first element matching `css`, or empty
fn first_text(document: &Html, css: &str) -> String {
    selector(css)
        .and_then(|sel| document.select(&sel).next().map(element_text))
        .unwrap_or_default()
}

/// Text of every element matching `css`, in document order
fn all_texts(document: &Html, css: &str) -> Vec<String> {
    match selector(css) {
        Some(sel) => document.select(&sel).map(element_text).collect(),
        None => Vec::new(),
    }
}

/// `content` of the first `<meta name="description">`; the name match is case-sensitive
fn extract_meta_description(document: &Html) -> String {
    let Some(meta_selector) = selector("meta[name]") else {
        return String::new();
    };

    document
        .select(&meta_selector)
        .find(|element| element.value().attr("name") == Some("description"))
        .and_then(|element| element.value().attr("content"))
        .unwrap_or_default()
        .to_string()
}

fn extract_images(document: &Html) -> Vec<ImageInfo> {
    let Some(img_selector) = selector("img") else {
        return Vec::new();
    };

    document
        .select(&img_selector)
        .map(|element| {
            let src = element.value().attr("src").unwrap_or_default();
            let alt = element.value().attr("alt").unwrap_or_default();
            ImageInfo {
                src: src.to_string(),
                alt: alt.to_string(),
                has_alt: !alt.is_empty(),
            }
        })
        .collect()
}

fn extract_links(document: &Html, hostname: &str) -> Vec<LinkInfo> {
    let Some(a_selector) = selector("a") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .map(|element| {
            let href = element.value().attr("href").unwrap_or_default();
            LinkInfo {
                href: href.to_string(),
                text: element_text(element).trim().to_string(),
                link_type: classify_link(href, hostname),
            }
        })
        .collect()
}

/// Concatenates the visible text nodes under `<body>`
///
/// No separator is inserted, so inline markup inside a word keeps it whole.
/// Words in sibling blocks stay apart only through the whitespace between them.
fn extract_body_text(document: &Html) -> String {
    let Some(body_selector) = selector("body") else {
        return String::new();
    };

    let mut text_content = String::new();
    for body in document.select(&body_selector) {
        for node in body.descendants() {
            let Node::Text(text) = node.value() else {
                continue;
            };

            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .map_or(false, |el| HIDDEN_TEXT_ELEMENTS.contains(&el.name()))
            });

            if !hidden {
                text_content.push_str(text);
            }
        }
    }

    text_content
}
