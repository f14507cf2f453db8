use std::collections::HashSet;

use scraper::{Html, Selector};

const DEFAULT_PATH_MARKER: &str = "/products/";

/// Pulls detail-page links out of a listing page.
///
/// Anchors whose `href` contains the path marker are collected as raw
/// attribute values, deduplicated, first occurrence first. Malformed input
/// parses best-effort and simply yields fewer (or zero) matches.
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    path_marker: String,
}

impl LinkExtractor {
    pub fn new() -> Self {
        Self::with_path_marker(DEFAULT_PATH_MARKER)
    }

    /// Uses a different detail-page path convention than `/products/`.
    pub fn with_path_marker(path_marker: impl Into<String>) -> Self {
        Self {
            path_marker: path_marker.into(),
        }
    }

    pub fn path_marker(&self) -> &str {
        &self.path_marker
    }

    /// Returns the deduplicated matching hrefs in document order.
    pub fn extract(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        let Ok(anchor) = Selector::parse("a") else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        let mut links = Vec::new();
        for element in document.select(&anchor) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            if !href.contains(&self.path_marker) {
                continue;
            }
            if seen.insert(href.to_string()) {
                links.push(href.to_string());
            }
        }
        links
    }
}

impl Default for LinkExtractor {
    fn default() -> Self {
        Self::new()
    }
}
