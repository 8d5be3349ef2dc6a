//! Universal Declaration of Human Rights, Irish translation.
//!
//! Every run opens with one fixed legal-text record so the corpus always
//! carries a known baseline document for the language. The declaration is
//! fetched from the Unicode UDHR collection as plain text; its provenance
//! header (everything through the `---` separator line) is dropped.

use crate::fetch::{fetch_text, Fetch};
use crate::models::{CorpusRecord, Genre};
use crate::outputs::corpus::CorpusWriter;
use crate::text::clean_text;
use std::error::Error;
use tokio::io::AsyncWrite;
use tracing::{info, instrument};

/// Plain-text UDHR translations, one file per language.
pub const UDHR_BASE_URL: &str = "https://www.unicode.org/udhr/d";

/// Fetch a UDHR translation and append it as one `Legal` record.
///
/// A fetch failure is fatal for the run, same as a sitemap failure: a
/// harvest that cannot reach its fixed baseline text should not proceed to
/// the news crawl and emit a partial corpus.
#[instrument(level = "info", skip(fetcher, out))]
pub async fn crawl<F, W>(
    fetcher: &F,
    out: &mut CorpusWriter<W>,
    filename: &str,
) -> Result<(), Box<dyn Error>>
where
    F: Fetch,
    W: AsyncWrite + Unpin,
{
    let url = format!("{UDHR_BASE_URL}/{filename}");
    let text = fetch_text(fetcher, &url).await?;

    let paragraphs = strip_header(&text)
        .lines()
        .map(clean_text)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>();
    info!(%url, paragraphs = paragraphs.len(), "Fetched rights declaration");

    let record = CorpusRecord {
        location: url,
        genre: Genre::Legal,
        publication_date: None,
        title: None,
        paragraphs,
    };
    out.write_record(&record).await?;
    Ok(())
}

/// Drop the provenance header: everything up to and including the first
/// line of dashes. Files without a separator are kept whole.
fn strip_header(text: &str) -> String {
    let mut past_separator = false;
    let mut body = Vec::new();
    for line in text.lines() {
        if past_separator {
            body.push(line);
        } else if line.trim_start().starts_with("---") {
            past_separator = true;
        }
    }
    if past_separator {
        body.join("\n")
    } else {
        text.to_string()
    }
}
