use serde::{Deserialize, Serialize};

/// One image belonging to a product record.
///
/// `src` is never empty; refs that would fail the active extraction policy
/// are not constructed in the first place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub src: String,
    pub alt: Option<String>,
    pub title: Option<String>,
}

/// The structured representation of one detail page.
///
/// Records are immutable once appended to a run's collection; the collection
/// is append-only and written solely by the crawl loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub url: String,
    pub images: Vec<ImageRef>,
}
