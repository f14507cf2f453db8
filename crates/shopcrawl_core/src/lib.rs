//! Shopcrawl core: product data model, extraction, and export encodings.
mod export;
mod extract;
mod links;
mod range;
mod record;

pub use export::{to_csv, to_json, CsvLayout, ExportError, IMAGE_DELIMITER};
pub use extract::{ExtractionPolicy, RecordExtractor};
pub use links::LinkExtractor;
pub use range::{PageRange, RangeError, PAGE_PLACEHOLDER};
pub use record::{ImageRef, Record};
