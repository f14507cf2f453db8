use scraper::{ElementRef, Html, Selector};

use crate::record::{ImageRef, Record};

const TITLE_SELECTOR: &str = ".title_product";
const BROAD_IMAGE_SELECTOR: &str = ".image-element__wrap img";
const GALLERY_CELL_SELECTOR: &str = ".product_gallery .gallery-cell";
const LAZY_SRC_ATTR: &str = "data-src";
const LAZY_PLACEHOLDER: &str = "px";
const DEFAULT_ASSET_KEYWORD: &str = "mockup";
const UNKNOWN_NAME: &str = "Unknown";

/// How gallery images are collected from a detail page.
///
/// Both strategies shipped at different points in the template family's
/// life; which one fits is a per-run configuration choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionPolicy {
    /// Every image in the gallery wrapper, lazy-load source preferred,
    /// no content filter.
    Broad,
    /// Gallery cells only, lazy-load source required and checked against
    /// the asset keyword.
    #[default]
    Filtered,
}

/// Builds a [`Record`] from a detail page.
///
/// Extraction is total: missing structure degrades to the `"Unknown"` name
/// or an empty image set, never an error. Zero-image records are valid.
#[derive(Debug, Clone)]
pub struct RecordExtractor {
    policy: ExtractionPolicy,
    asset_keyword: String,
}

impl RecordExtractor {
    pub fn new(policy: ExtractionPolicy) -> Self {
        Self::with_asset_keyword(policy, DEFAULT_ASSET_KEYWORD)
    }

    /// Uses a different inclusion keyword for the filtered policy.
    pub fn with_asset_keyword(policy: ExtractionPolicy, keyword: impl Into<String>) -> Self {
        Self {
            policy,
            asset_keyword: keyword.into(),
        }
    }

    pub fn policy(&self) -> ExtractionPolicy {
        self.policy
    }

    pub fn extract(&self, html: &str, source_url: &str) -> Record {
        let document = Html::parse_document(html);
        let images = match self.policy {
            ExtractionPolicy::Broad => broad_images(&document),
            ExtractionPolicy::Filtered => filtered_images(&document, &self.asset_keyword),
        };
        Record {
            name: extract_name(&document),
            url: source_url.to_string(),
            images,
        }
    }
}

impl Default for RecordExtractor {
    fn default() -> Self {
        Self::new(ExtractionPolicy::default())
    }
}

fn extract_name(document: &Html) -> String {
    Selector::parse(TITLE_SELECTOR)
        .ok()
        .as_ref()
        .and_then(|sel| document.select(sel).next())
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_NAME.to_string())
}

/// Broad policy: the lazy-load value wins over the eager `src`; anything
/// non-empty is kept.
fn broad_images(document: &Html) -> Vec<ImageRef> {
    let Ok(selector) = Selector::parse(BROAD_IMAGE_SELECTOR) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|img| {
            let src = img
                .value()
                .attr(LAZY_SRC_ATTR)
                .or_else(|| img.value().attr("src"))?;
            if src.is_empty() {
                return None;
            }
            Some(ImageRef {
                src: src.to_string(),
                alt: attr_owned(img, "alt"),
                title: None,
            })
        })
        .collect()
}

/// Filtered policy: one image per gallery cell, lazy-load value required,
/// placeholder values rejected, and the source must contain the asset
/// keyword before an `ImageRef` is built.
fn filtered_images(document: &Html, keyword: &str) -> Vec<ImageRef> {
    let Ok(cell_selector) = Selector::parse(GALLERY_CELL_SELECTOR) else {
        return Vec::new();
    };
    let Ok(img_selector) = Selector::parse("img") else {
        return Vec::new();
    };

    document
        .select(&cell_selector)
        .filter_map(|cell| {
            let img = cell.select(&img_selector).next()?;
            let src = img.value().attr(LAZY_SRC_ATTR)?;
            if src.is_empty() || src == LAZY_PLACEHOLDER || !src.contains(keyword) {
                return None;
            }
            Some(ImageRef {
                src: src.to_string(),
                alt: attr_owned(img, "alt"),
                title: attr_owned(cell, "data-title"),
            })
        })
        .collect()
}

fn attr_owned(element: ElementRef, name: &str) -> Option<String> {
    element.value().attr(name).map(str::to_string)
}
