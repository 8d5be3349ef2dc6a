//! Source-specific harvesters.
//!
//! Each submodule owns the crawl logic for one source and exposes a
//! `crawl(fetcher, out, ...)` entry point that appends corpus records to the
//! shared writer:
//!
//! | Source | Module | Notes |
//! |--------|--------|-------|
//! | RTÉ Nuacht / RnaG | [`nuacht`] | Sitemap-driven news crawl, the main pipeline |
//! | UDHR | [`udhr`] | Fixed rights-declaration text, fetched once per run |
//!
//! Harvesters go through the [`crate::fetch::Fetch`] seam and never talk to
//! the network directly, so each crawl can be exercised in tests with a
//! map-backed fetcher and an in-memory writer.

pub mod nuacht;
pub mod udhr;
