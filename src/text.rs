//! Generic text utilities: URL path extraction, markup stripping, and
//! whitespace/entity normalization.
//!
//! These helpers are deliberately site-agnostic. Anything keyed to RTÉ's
//! page layout lives in [`crate::scrapers::nuacht`].

use scraper::Html;
use url::Url;

/// Extract the path component of a URL.
///
/// Returns an empty string when the input does not parse as an absolute URL,
/// so path-prefix predicates simply fail to match rather than erroring.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(url_path("https://www.rte.ie/news/nuacht/x"), "/news/nuacht/x");
/// ```
pub fn url_path(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => String::new(),
    }
}

/// Strip markup from an HTML snippet, returning its text content.
///
/// Parses the snippet as a fragment and collects the text nodes, which also
/// decodes character entities (`&amp;`, `&#233;`, ...).
pub fn strip_markup(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    fragment.root_element().text().collect::<String>()
}

/// Normalize a text snippet for corpus output.
///
/// Decodes entities, strips any residual markup, collapses all runs of
/// whitespace (including newlines) to single spaces, and trims the ends.
pub fn clean_text(text: &str) -> String {
    strip_markup(text).split_whitespace().collect::<Vec<_>>().join(" ")
}
