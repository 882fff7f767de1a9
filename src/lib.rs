//! # Listing Showcase
//!
//! A static site generator for a single real estate listing. One content
//! directory describes one property: its facts, a long description, a
//! floorplan and a tree of categorized photos. The output is a self-contained
//! showcase page with a filterable photo gallery and a full-screen lightbox.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (filesystem → structured data)
//! 2. Generate  manifest  →  dist/            (final HTML site)
//! ```
//!
//! The manifest is human-readable JSON. `scan` and `generate` can run
//! separately, and `check` runs the scan alone to validate content.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Photo categories and the per-category image buckets |
//! | [`gallery`] | Gallery view state: category filter, lightbox, keyboard, scroll lock |
//! | [`listing`] | `listing.toml` loading and fact formatting (price, beds, baths) |
//! | [`scan`] | Stage 1: walks the content directory and produces the manifest |
//! | [`generate`] | Stage 2: renders the showcase, filter and lightbox pages using Maud |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`naming`] | `NNN-name` filename convention parser for directories and photos |
//! | [`browse`] | Line commands for walking the gallery from a terminal |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One State Machine, Two Front Ends
//!
//! The gallery behavior (which photos a filter shows, where the lightbox is,
//! how arrows wrap, when the page scroll is locked) lives in
//! [`gallery::GalleryView`]. The generator drives it to decide each lightbox
//! page's previous/next links, and `listing-showcase browse` drives it from
//! stdin. Neither front end re-implements navigation.
//!
//! ## Fixed Category Order
//!
//! Categories are a closed enum with a fixed display order. The "All" view
//! concatenates buckets in that order and caps the result (12 by default), so
//! the first category always leads the showcase gallery regardless of how the
//! photo directories are named on disk.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Malformed markup
//! is a build error, and every interpolated caption or listing field is
//! escaped.
//!
//! ## Static Pages, Optional Script
//!
//! Every gallery state a visitor can reach is a real page with real links,
//! so the site works with JavaScript disabled. The small lightbox script only
//! maps the arrow keys and Escape onto those links.

pub mod browse;
pub mod catalog;
pub mod config;
pub mod gallery;
pub mod generate;
pub mod listing;
pub mod naming;
pub mod output;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
