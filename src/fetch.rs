//! HTTP fetch layer and sitemap expansion.
//!
//! The [`Fetch`] trait is the seam between the harvest pipeline and the
//! network: production code goes through [`HttpFetcher`] (a thin
//! `reqwest::Client` wrapper), tests substitute a map-backed fake. The
//! pipeline itself owns no retry, backoff, or timeout logic; transient
//! failure handling belongs to whatever schedules the harvester.
//!
//! Sitemap handling lives here too: [`fetch_sitemap`] expands a root sitemap
//! index into a flat URL → lastmod mapping, consulting a caller-supplied
//! predicate once per discovered sub-sitemap.

use crate::models::FetchResult;
use std::collections::{HashMap, HashSet};
use std::error::Error;
use tracing::{debug, info, instrument, warn};

/// Async page fetching, abstracted so the pipeline can be driven without a
/// network in tests.
pub trait Fetch {
    /// Fetch a URL and return its status, raw body, and headers.
    ///
    /// An `Err` means the transport itself failed (DNS, connect, read); an
    /// HTTP error status is a normal `Ok` result with that status.
    async fn fetch(&self, url: &str) -> Result<FetchResult, Box<dyn Error>>;
}

/// Production [`Fetch`] implementation over a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher with the given `User-Agent`.
    pub fn new(user_agent: &str) -> Result<Self, Box<dyn Error>> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<FetchResult, Box<dyn Error>> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect::<HashMap<_, _>>();
        let content = response.bytes().await?.to_vec();
        debug!(status, bytes = content.len(), "Fetched URL");
        Ok(FetchResult {
            status,
            content,
            headers,
        })
    }
}

/// Fetch a URL that must answer 200 and decode its body as UTF-8.
///
/// Used for sitemaps and the fixed legal text, where anything short of a
/// readable document is fatal for the run.
pub async fn fetch_text<F: Fetch>(fetcher: &F, url: &str) -> Result<String, Box<dyn Error>> {
    let result = fetcher.fetch(url).await?;
    if result.status != 200 {
        return Err(format!("fetching {url} returned status {}", result.status).into());
    }
    Ok(String::from_utf8(result.content)?)
}

/// One parsed sitemap document: nested sub-sitemap locations plus page
/// entries with their verbatim lastmod values (empty when absent).
#[derive(Debug, Default)]
struct SitemapDoc {
    subsitemaps: Vec<String>,
    pages: Vec<(String, String)>,
}

/// Expand a root sitemap into a flat URL → lastmod mapping.
///
/// Sub-sitemaps discovered in a `<sitemapindex>` are offered to
/// `include_subsitemap` once each; only those for which it returns `true`
/// are fetched and flattened. A seen-set guards against index cycles.
/// Any sitemap fetch failure propagates; there is no partial result.
#[instrument(level = "info", skip(fetcher, include_subsitemap))]
pub async fn fetch_sitemap<F, P>(
    fetcher: &F,
    url: &str,
    mut include_subsitemap: P,
) -> Result<HashMap<String, String>, Box<dyn Error>>
where
    F: Fetch,
    P: FnMut(&str) -> bool,
{
    let mut pages = HashMap::new();
    let mut seen = HashSet::new();
    let mut pending = vec![url.to_string()];
    seen.insert(url.to_string());

    while let Some(sitemap_url) = pending.pop() {
        let xml = fetch_text(fetcher, &sitemap_url).await?;
        let doc = parse_sitemap(&xml)?;
        debug!(
            sitemap = %sitemap_url,
            subsitemaps = doc.subsitemaps.len(),
            pages = doc.pages.len(),
            "Parsed sitemap"
        );
        for sub in doc.subsitemaps {
            if !seen.insert(sub.clone()) {
                warn!(sitemap = %sub, "Sitemap listed more than once; ignoring repeat");
                continue;
            }
            if include_subsitemap(&sub) {
                pending.push(sub);
            }
        }
        for (page_url, lastmod) in doc.pages {
            pages.insert(page_url, lastmod);
        }
    }

    info!(count = pages.len(), "Sitemap expansion complete");
    Ok(pages)
}

/// Parse one sitemap XML document.
///
/// Handles both `<sitemapindex>` (entries under `<sitemap>`) and `<urlset>`
/// (entries under `<url>`); a `<loc>`-less entry is dropped, a
/// `<lastmod>`-less page keeps an empty string. Malformed XML is an error,
/// never a truncated mapping.
fn parse_sitemap(xml: &str) -> Result<SitemapDoc, Box<dyn Error>> {
    let mut doc = SitemapDoc::default();
    let mut in_subsitemap = false;
    let mut in_page = false;
    let mut current_loc = String::new();
    let mut current_lastmod = String::new();
    let mut current_tag = String::new();

    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Start(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match name.as_str() {
                    "sitemap" => {
                        in_subsitemap = true;
                        current_loc.clear();
                    }
                    "url" => {
                        in_page = true;
                        current_loc.clear();
                        current_lastmod.clear();
                    }
                    _ => {}
                }
                current_tag = name;
            }
            Ok(quick_xml::events::Event::Text(ref e)) => {
                if in_subsitemap || in_page {
                    let text = e.unescape()?.trim().to_string();
                    if !text.is_empty() {
                        match current_tag.as_str() {
                            "loc" => current_loc = text,
                            "lastmod" => current_lastmod = text,
                            _ => {}
                        }
                    }
                }
            }
            Ok(quick_xml::events::Event::End(ref e)) => {
                match e.name().as_ref() {
                    b"sitemap" if in_subsitemap => {
                        if !current_loc.is_empty() {
                            doc.subsitemaps.push(current_loc.clone());
                        }
                        in_subsitemap = false;
                    }
                    b"url" if in_page => {
                        if !current_loc.is_empty() {
                            doc.pages
                                .push((current_loc.clone(), current_lastmod.clone()));
                        }
                        in_page = false;
                    }
                    _ => {}
                }
                current_tag.clear();
            }
            Ok(quick_xml::events::Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }

    Ok(doc)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Map-backed fake fetcher for driving the pipeline without a network.
    #[derive(Debug, Default)]
    pub(crate) struct FakeFetcher {
        pub(crate) responses: HashMap<String, FetchResult>,
    }

    impl FakeFetcher {
        pub(crate) fn with_page(mut self, url: &str, body: &str) -> Self {
            self.responses.insert(
                url.to_string(),
                FetchResult {
                    status: 200,
                    content: body.as_bytes().to_vec(),
                    headers: HashMap::new(),
                },
            );
            self
        }

        pub(crate) fn with_response(mut self, url: &str, result: FetchResult) -> Self {
            self.responses.insert(url.to_string(), result);
            self
        }
    }

    impl Fetch for FakeFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchResult, Box<dyn Error>> {
            match self.responses.get(url) {
                Some(result) => Ok(result.clone()),
                None => Ok(FetchResult {
                    status: 404,
                    content: Vec::new(),
                    headers: HashMap::new(),
                }),
            }
        }
    }

    const SITEMAP_INDEX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sitemap><loc>https://www.rte.ie/sitemap-10000.xml</loc></sitemap>
  <sitemap><loc>https://www.rte.ie/sitemap-990000.xml</loc></sitemap>
</sitemapindex>"#;

    const URLSET: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>https://www.rte.ie/news/nuacht/a</loc>
    <lastmod>2020-01-01</lastmod>
  </url>
  <url><loc>https://www.rte.ie/sport/b</loc></url>
</urlset>"#;

    #[test]
    fn test_parse_sitemap_index() {
        let doc = parse_sitemap(SITEMAP_INDEX).unwrap();
        assert_eq!(
            doc.subsitemaps,
            vec![
                "https://www.rte.ie/sitemap-10000.xml",
                "https://www.rte.ie/sitemap-990000.xml"
            ]
        );
        assert!(doc.pages.is_empty());
    }

    #[test]
    fn test_parse_urlset() {
        let doc = parse_sitemap(URLSET).unwrap();
        assert!(doc.subsitemaps.is_empty());
        assert_eq!(
            doc.pages,
            vec![
                (
                    "https://www.rte.ie/news/nuacht/a".to_string(),
                    "2020-01-01".to_string()
                ),
                ("https://www.rte.ie/sport/b".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_parse_sitemap_decodes_entities_in_loc() {
        let xml = "<urlset><url><loc>https://www.rte.ie/news/nuacht/a?x=1&amp;y=2</loc></url></urlset>";
        let doc = parse_sitemap(xml).unwrap();
        assert_eq!(
            doc.pages,
            vec![(
                "https://www.rte.ie/news/nuacht/a?x=1&y=2".to_string(),
                String::new()
            )]
        );
    }

    #[test]
    fn test_parse_sitemap_malformed_document_is_an_error() {
        // A stray ampersand mid-document must fail the parse outright, not
        // hand back whatever entries preceded it.
        let xml = "<urlset>\
<url><loc>https://www.rte.ie/news/nuacht/a</loc></url>\
<url><loc>https://www.rte.ie/news/nuacht/b&oops</loc></url>\
<url><loc>https://www.rte.ie/news/nuacht/c</loc></url>\
</urlset>";
        assert!(parse_sitemap(xml).is_err());
    }

    #[tokio::test]
    async fn test_fetch_sitemap_propagates_malformed_subsitemap() {
        let fetcher = FakeFetcher::default().with_page(
            "https://www.rte.ie/sitemap.xml",
            "<urlset><url><loc>https://www.rte.ie/news/nuacht/b&oops</loc></url></urlset>",
        );
        let result = fetch_sitemap(&fetcher, "https://www.rte.ie/sitemap.xml", |_| true).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fetch_sitemap_applies_subsitemap_predicate() {
        let fetcher = FakeFetcher::default()
            .with_page("https://www.rte.ie/sitemap.xml", SITEMAP_INDEX)
            .with_page("https://www.rte.ie/sitemap-10000.xml", URLSET);

        let mut offered = Vec::new();
        let pages = fetch_sitemap(&fetcher, "https://www.rte.ie/sitemap.xml", |url| {
            offered.push(url.to_string());
            url.ends_with("sitemap-10000.xml")
        })
        .await
        .unwrap();

        assert_eq!(offered.len(), 2);
        assert_eq!(pages.len(), 2);
        assert_eq!(
            pages.get("https://www.rte.ie/news/nuacht/a").map(String::as_str),
            Some("2020-01-01")
        );
    }

    #[tokio::test]
    async fn test_fetch_sitemap_failure_is_fatal() {
        let fetcher = FakeFetcher::default();
        let result = fetch_sitemap(&fetcher, "https://www.rte.ie/sitemap.xml", |_| true).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fetch_text_rejects_non_200() {
        let fetcher = FakeFetcher::default().with_response(
            "https://www.rte.ie/gone",
            FetchResult {
                status: 500,
                content: Vec::new(),
                headers: HashMap::new(),
            },
        );
        assert!(fetch_text(&fetcher, "https://www.rte.ie/gone").await.is_err());
    }
}
