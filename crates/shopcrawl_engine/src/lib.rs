//! Shopcrawl engine: page fetching, crawl orchestration, and run control.
mod control;
mod crawl;
mod decode;
mod fetch;
mod persist;
mod types;

pub use control::RunHandle;
pub use crawl::{ChannelCrawlSink, CrawlSink, Crawler};
pub use decode::{decode_html, DecodeError, DecodedHtml};
pub use fetch::{FetchSettings, Fetcher, HttpFetcher, Transport, DEFAULT_USER_AGENT};
pub use persist::{ExportWriter, PersistError, CSV_FILENAME, JSON_FILENAME};
pub use types::{
    CrawlEvent, CrawlOutcome, FailureKind, FetchError, FetchMetadata, FetchOutput, LogLine,
};
