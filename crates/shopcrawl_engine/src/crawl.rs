use std::sync::Arc;

use shopcrawl_core::{LinkExtractor, PageRange, RecordExtractor};
use url::Url;

use crate::control::{Checkpoint, RunHandle};
use crate::fetch::Fetcher;
use crate::types::{CrawlEvent, CrawlOutcome, LogLine};

/// Receives crawl progress as it happens.
pub trait CrawlSink: Send + Sync {
    fn emit(&self, event: CrawlEvent);
}

/// Forwards events into a tokio channel for whoever drains it.
pub struct ChannelCrawlSink {
    tx: tokio::sync::mpsc::UnboundedSender<CrawlEvent>,
}

impl ChannelCrawlSink {
    pub fn new(tx: tokio::sync::mpsc::UnboundedSender<CrawlEvent>) -> Self {
        Self { tx }
    }
}

impl CrawlSink for ChannelCrawlSink {
    fn emit(&self, event: CrawlEvent) {
        let _ = self.tx.send(event);
    }
}

/// Walks a range of listing pages, discovers product detail pages, and
/// extracts one record per detail page.
pub struct Crawler {
    fetcher: Arc<dyn Fetcher>,
    links: LinkExtractor,
    records: RecordExtractor,
}

impl Crawler {
    pub fn new(fetcher: Arc<dyn Fetcher>, links: LinkExtractor, records: RecordExtractor) -> Self {
        Self {
            fetcher,
            links,
            records,
        }
    }

    /// Runs the crawl to completion, or until `handle` stops it.
    ///
    /// Listing pages are visited in ascending order and each page's
    /// detail links in document order, deduplicated within the page. A
    /// link repeated on a later page is fetched again. A failed listing
    /// fetch skips that page; a failed detail fetch skips that record;
    /// neither ends the run. Pause and stop take effect between fetches.
    pub async fn run(
        &self,
        range: &PageRange,
        handle: &RunHandle,
        sink: &dyn CrawlSink,
    ) -> CrawlOutcome {
        let mut signals = handle.signals();
        let mut records = Vec::new();
        let mut pages_fetched = 0u32;
        let mut stopped = false;

        sink.emit(CrawlEvent::Log(LogLine::now(format!(
            "Starting crawl: pages {} to {}",
            range.start_page(),
            range.end_page(),
        ))));

        'pages: for page in range.pages() {
            if signals.checkpoint().await == Checkpoint::Stop {
                stopped = true;
                break 'pages;
            }

            let page_url = range.page_url(page);
            sink.emit(CrawlEvent::Log(LogLine::now(format!(
                "Crawling page {page}: {page_url}"
            ))));
            pages_fetched += 1;

            let listing = match self.fetcher.fetch(&page_url).await {
                Ok(output) => output,
                Err(err) => {
                    sink.emit(CrawlEvent::Log(LogLine::now(format!(
                        "Page {page} failed: {err}"
                    ))));
                    continue 'pages;
                }
            };

            let mut detail_urls = Vec::new();
            for href in self.links.extract(&listing.html) {
                match resolve_detail_url(&page_url, &href) {
                    Some(detail_url) => detail_urls.push(detail_url),
                    None => {
                        sink.emit(CrawlEvent::Log(LogLine::now(format!(
                            "Skipping unresolvable link {href}"
                        ))));
                    }
                }
            }
            sink.emit(CrawlEvent::Log(LogLine::now(format!(
                "Found {} product links on page {page}",
                detail_urls.len(),
            ))));

            for detail_url in detail_urls {
                if signals.checkpoint().await == Checkpoint::Stop {
                    stopped = true;
                    break 'pages;
                }

                match self.fetcher.fetch(&detail_url).await {
                    Ok(output) => {
                        let record = self.records.extract(&output.html, &detail_url);
                        sink.emit(CrawlEvent::Log(LogLine::now(format!(
                            "Scraped: {} ({} images)",
                            record.name,
                            record.images.len(),
                        ))));
                        sink.emit(CrawlEvent::RecordDiscovered(record.clone()));
                        records.push(record);
                    }
                    Err(err) => {
                        sink.emit(CrawlEvent::Log(LogLine::now(format!(
                            "Skipping {detail_url}: {err}"
                        ))));
                    }
                }
            }
        }

        let closing = if stopped { "stopped" } else { "finished" };
        sink.emit(CrawlEvent::Log(LogLine::now(format!(
            "Crawl {closing}: {} products from {pages_fetched} pages",
            records.len(),
        ))));

        CrawlOutcome {
            records,
            pages_fetched,
            stopped,
        }
    }
}

/// Detail hrefs come both absolute and site-relative; relative ones
/// resolve against the listing page they appeared on.
fn resolve_detail_url(listing_url: &str, href: &str) -> Option<String> {
    if let Ok(absolute) = Url::parse(href) {
        return Some(absolute.to_string());
    }
    let base = Url::parse(listing_url).ok()?;
    base.join(href).ok().map(|url| url.to_string())
}
