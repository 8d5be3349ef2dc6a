//! Data models for fetched pages and emitted corpus records.
//!
//! This module defines the core data structures used throughout the harvester:
//! - [`FetchResult`]: Raw HTTP response data for one page
//! - [`CorpusRecord`]: One emitted unit of corpus output
//! - [`Genre`]: Record classification written into the `# Genre:` header
//!
//! All timestamp-like fields are opaque strings: the harvester never parses
//! or normalizes dates, it copies whichever source value won the fallback.

use std::collections::HashMap;
use std::fmt;

/// Raw result of fetching a single page.
///
/// Owned transiently by the crawl loop for one URL and dropped once the
/// corpus record (if any) has been written.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// HTTP status code. Anything other than 200 causes the URL to be skipped.
    pub status: u16,
    /// Raw response body. Decoded as UTF-8 by the caller; a decode failure
    /// is fatal for the run.
    pub content: Vec<u8>,
    /// Response headers. Only `Last-Modified` is consulted here.
    pub headers: HashMap<String, String>,
}

impl FetchResult {
    /// Look up a header by name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Classification written into the `# Genre:` header of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Genre {
    /// A harvested news article.
    News,
    /// Fixed legal text (the rights declaration fetched once per run).
    Legal,
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Genre::News => write!(f, "News"),
            Genre::Legal => write!(f, "Legal"),
        }
    }
}

/// One emitted unit of corpus output: metadata header plus paragraph body.
///
/// Records are only constructed for pages that fetched with status 200.
/// Paragraphs are kept in document order and never deduplicated.
#[derive(Debug, Clone)]
pub struct CorpusRecord {
    /// Source URL of the page this record was harvested from.
    pub location: String,
    /// Record genre; the news pipeline always emits [`Genre::News`].
    pub genre: Genre,
    /// Publication timestamp, verbatim from whichever source won the
    /// fallback (page metadata, `Last-Modified` header, sitemap lastmod).
    /// `None` omits the header line.
    pub publication_date: Option<String>,
    /// Cleaned headline. `None` omits the title line.
    pub title: Option<String>,
    /// Accepted paragraphs in document order.
    pub paragraphs: Vec<String>,
}
