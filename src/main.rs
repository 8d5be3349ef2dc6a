//! # Nuacht Harvest
//!
//! A single-source corpus harvester that pulls Irish-language news text from
//! RTÉ's web properties and appends normalized records to a plain-text
//! corpus file.
//!
//! ## Pipeline
//!
//! 1. **Fixed text**: fetch the UDHR Irish translation as a baseline legal record
//! 2. **Discovery**: expand RTÉ's sitemap index, keeping only low-numbered
//!    sub-sitemaps and Nuacht/Raidió na Gaeltachta page URLs
//! 3. **Harvest**: fetch each page in lexicographic URL order, extract
//!    publication date, title, and paragraphs, and drop boilerplate
//! 4. **Output**: append one framed record per page to `{output_dir}/ga.txt`
//!
//! ## Usage
//!
//! ```sh
//! nuacht_harvest -o ./corpus
//! ```
//!
//! The pipeline is deliberately sequential: given an identical sitemap
//! snapshot, two runs produce records in the same order. Scheduling,
//! deduplication, and retry policy belong to the surrounding collection
//! system, not this unit.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod fetch;
mod models;
mod outputs;
mod scrapers;
mod text;

use cli::Cli;
use fetch::HttpFetcher;
use outputs::corpus;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("nuacht_harvest starting up");

    let args = Cli::parse();
    debug!(?args.output_dir, ?args.sitemap_url, args.sitemap_threshold, "Parsed CLI arguments");

    // Open the output stream first so a bad output path fails before any
    // network traffic.
    let mut out = match corpus::open_corpus_file(&args.output_dir, "ga").await {
        Ok(out) => out,
        Err(e) => {
            error!(
                path = %args.output_dir,
                error = %e,
                "Corpus output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    };

    let fetcher = HttpFetcher::new(&args.user_agent)?;

    // Fixed legal text first, then the news pipeline; both append to the
    // same exclusively-owned stream.
    scrapers::udhr::crawl(&fetcher, &mut out, "udhr_gle.txt").await?;
    scrapers::nuacht::crawl(&fetcher, &mut out, &args.sitemap_url, args.sitemap_threshold).await?;

    let records = out.finish().await?;

    let elapsed = start_time.elapsed();
    info!(
        records,
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Harvest complete"
    );

    Ok(())
}
