//! Output generation for the plain-text corpus.
//!
//! A run appends to one corpus file per language. Records are framed as a
//! commented metadata header followed by unprefixed body lines:
//!
//! ```text
//! # Location: https://www.rte.ie/news/nuacht/...
//! # Genre: News
//! # Publication-Date: 2020-01-01T12:00:00+00:00
//! Scéal Nuachta
//! Céad alt an scéil.
//! Dara halt an scéil.
//! ```
//!
//! The `Publication-Date` and title lines are omitted when absent.

pub mod corpus;
