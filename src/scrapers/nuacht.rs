//! RTÉ Nuacht harvester.
//!
//! Pulls Irish-language news text from RTÉ's web properties: the Nuacht
//! section of RTÉ News and the Raidió na Gaeltachta news pages. Page
//! discovery runs off RTÉ's sitemap index; article text is scraped with
//! literal patterns keyed to the site's current markup.
//!
//! The filter literals here (path prefixes, boilerplate anchors, the
//! `- RTÉ` title suffix) are contracts with one specific site layout. They
//! are meant to be exact: an un-caught boilerplate line is acceptable noise,
//! discarding genuine article text is not, so nothing in this module
//! generalizes them into heuristics.

use crate::fetch::{fetch_sitemap, Fetch};
use crate::models::{CorpusRecord, Genre};
use crate::outputs::corpus::CorpusWriter;
use crate::text::{clean_text, url_path};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use tokio::io::AsyncWrite;
use tracing::{debug, info, instrument};

/// Root of RTÉ's sitemap index.
pub const SITEMAP_URL: &str = "https://www.rte.ie/sitemap.xml";

/// Default exclusive upper bound on the sub-sitemap index; RTÉ's older
/// archive sitemaps beyond this hold no Nuacht content worth expanding.
pub const DEFAULT_SITEMAP_THRESHOLD: u32 = 40;

/// Numeric index embedded in RTÉ sub-sitemap names: `sitemap-<idx>0000.xml`.
static SUBSITEMAP_INDEX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"sitemap-([0-9]+)0000\.xml$").unwrap());

/// Dublin Core date meta tag with a plausible timestamp value
/// (date/time plus optional zone offset, 19 to 25 characters).
static PUBDATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"name="DC.date" (?:scheme="DCTERMS.URI" )?content="([0-9T:+\-]{19,25})""#)
        .unwrap()
});

static TITLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<title>(.+?)</title>").unwrap());

static PARAGRAPH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<p>(.+?)</p>").unwrap());

/// Decide whether a discovered sub-sitemap is worth expanding.
///
/// Includes the sub-sitemap iff its embedded index is below `threshold`.
/// URLs that do not carry the `sitemap-<idx>0000.xml` shape at all are
/// included (fail-open): an unrecognized sitemap name must not silently
/// drop a whole section of the site.
pub fn include_subsitemap(url: &str, threshold: u32) -> bool {
    let index = SUBSITEMAP_INDEX_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok());
    match index {
        Some(index) => index < threshold,
        None => true,
    }
}

/// True for pages in scope: RTÉ News's Nuacht section and Raidió na
/// Gaeltachta's news pages. Everything else on the sitemap is dropped.
pub fn include_page(url: &str) -> bool {
    let path = url_path(url);
    path.starts_with("/news/nuacht/") || path.starts_with("/rnag/nuacht-gaeltachta")
}

/// Derive the publication timestamp for a page.
///
/// First match wins, and the winning value is kept verbatim:
/// 1. the `DC.date` meta tag in the page HTML,
/// 2. the response's `Last-Modified` header,
/// 3. the sitemap's lastmod for this URL (empty means absent).
///
/// `None` when all three are missing; the record simply omits the line.
pub fn extract_pubdate(
    html: &str,
    last_modified: Option<&str>,
    sitemap_lastmod: &str,
) -> Option<String> {
    if let Some(caps) = PUBDATE_RE.captures(html) {
        return Some(caps[1].to_string());
    }
    if let Some(header) = last_modified {
        return Some(header.to_string());
    }
    if !sitemap_lastmod.is_empty() {
        return Some(sitemap_lastmod.to_string());
    }
    None
}

/// Extract the headline from raw page HTML.
///
/// Takes the `<title>` content, truncates at the `- RTÉ` brand suffix,
/// strips markup, decodes entities, and trims. An empty result is `None`.
pub fn extract_title(html: &str) -> Option<String> {
    let caps = TITLE_RE.captures(html)?;
    let raw = caps.get(1)?.as_str();
    let headline = raw.split("- RTÉ").next().unwrap_or("");
    let cleaned = clean_text(headline);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Pull every `<p>...</p>` capture from the raw HTML, cleaned, in document
/// order. Boilerplate filtering happens separately.
pub fn extract_paragraphs(html: &str) -> Vec<String> {
    PARAGRAPH_RE
        .captures_iter(html)
        .map(|caps| clean_text(&caps[1]))
        .collect()
}

/// Classify one cleaned paragraph as corpus-worthy.
///
/// Deny-by-literal, allow-by-default: the anchors below are the site's
/// standing copyright, consent, self-description, and disclaimer notices.
pub fn writable_paragraph(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    if text.starts_with("© RTÉ ") {
        return false;
    }
    if text.starts_with("By using this website, you consent") {
        return false;
    }
    if text.starts_with("RTÉ.ie is the website of Raidió Teilifís Éireann") {
        return false;
    }
    if text.contains("is not responsible for the content") {
        return false;
    }
    true
}

/// Run the RTÉ Nuacht crawl and append one record per harvested page.
///
/// Deterministic per sitemap snapshot: page URLs are sorted
/// lexicographically before fetching, so record order is stable across
/// runs. Pages answering anything other than 200 are skipped silently;
/// sitemap fetch failures and non-UTF-8 page bodies propagate.
#[instrument(level = "info", skip(fetcher, out))]
pub async fn crawl<F, W>(
    fetcher: &F,
    out: &mut CorpusWriter<W>,
    sitemap_url: &str,
    threshold: u32,
) -> Result<(), Box<dyn Error>>
where
    F: Fetch,
    W: AsyncWrite + Unpin,
{
    let sitemap = fetch_sitemap(fetcher, sitemap_url, |url| {
        include_subsitemap(url, threshold)
    })
    .await?;

    let urls = sitemap
        .keys()
        .filter(|url| include_page(url.as_str()))
        .cloned()
        .sorted()
        .collect::<Vec<_>>();
    info!(candidates = sitemap.len(), in_scope = urls.len(), "Filtered sitemap URLs");

    let mut emitted = 0usize;
    let mut skipped = 0usize;
    for url in urls {
        let result = fetcher.fetch(&url).await?;
        if result.status != 200 {
            debug!(%url, status = result.status, "Skipping page");
            skipped += 1;
            continue;
        }
        let last_modified = result.header("Last-Modified").map(str::to_string);
        let html = String::from_utf8(result.content)?;

        let sitemap_lastmod = sitemap.get(&url).map(String::as_str).unwrap_or("");
        let record = CorpusRecord {
            publication_date: extract_pubdate(&html, last_modified.as_deref(), sitemap_lastmod),
            title: extract_title(&html),
            paragraphs: extract_paragraphs(&html)
                .into_iter()
                .filter(|paragraph| writable_paragraph(paragraph))
                .collect(),
            location: url,
            genre: Genre::News,
        };
        out.write_record(&record).await?;
        emitted += 1;
    }

    info!(emitted, skipped, "RTÉ Nuacht crawl complete");
    Ok(())
}
