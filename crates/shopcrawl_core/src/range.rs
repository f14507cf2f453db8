use std::ops::RangeInclusive;

use thiserror::Error;

/// Placeholder substituted with the page cursor in listing URL templates.
pub const PAGE_PLACEHOLDER: &str = "{page}";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("start page {start} is after end page {end}")]
    StartAfterEnd { start: u32, end: u32 },
    #[error("url template {template:?} does not contain the {PAGE_PLACEHOLDER} placeholder")]
    MissingPlaceholder { template: String },
}

/// An inclusive page range over a listing URL template.
///
/// Validated at construction; a `PageRange` in hand is always crawlable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRange {
    url_template: String,
    start_page: u32,
    end_page: u32,
}

impl PageRange {
    /// Validates and builds a range. Rejects `start > end` and templates
    /// without the page placeholder before any fetch happens.
    pub fn new(
        url_template: impl Into<String>,
        start_page: u32,
        end_page: u32,
    ) -> Result<Self, RangeError> {
        let url_template = url_template.into();
        if start_page > end_page {
            return Err(RangeError::StartAfterEnd {
                start: start_page,
                end: end_page,
            });
        }
        if !url_template.contains(PAGE_PLACEHOLDER) {
            return Err(RangeError::MissingPlaceholder {
                template: url_template,
            });
        }
        Ok(Self {
            url_template,
            start_page,
            end_page,
        })
    }

    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    pub fn start_page(&self) -> u32 {
        self.start_page
    }

    pub fn end_page(&self) -> u32 {
        self.end_page
    }

    /// The listing URL for one page of the range.
    pub fn page_url(&self, page: u32) -> String {
        self.url_template
            .replace(PAGE_PLACEHOLDER, &page.to_string())
    }

    /// Pages in crawl order.
    pub fn pages(&self) -> RangeInclusive<u32> {
        self.start_page..=self.end_page
    }

    pub fn page_count(&self) -> u32 {
        self.end_page - self.start_page + 1
    }
}
