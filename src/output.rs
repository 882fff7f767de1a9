//! CLI output formatting.
//!
//! Output is information-first: each entity leads with its positional index
//! and title, with sources shown as indented context lines.
//!
//! ## Scan
//!
//! ```text
//! Listing
//!     131 Grosvenor Avenue, Capitol Hill, Burnaby, BC
//!     $3,188,000 · 7 beds · 7 baths · 3,587 sq ft
//!
//! Gallery (7 photos, "All" shows 7)
//! 001 Exterior (4 photos)
//!     001 Front at dusk
//!         Source: photos/010-exterior/001-front-at-dusk.jpg
//!
//! Floorplan
//!     floorplan.jpg
//! ```
//!
//! ## Generate
//!
//! ```text
//! Showcase → index.html
//! 001 All → gallery/all/ (7 photos)
//! 002 Exterior → gallery/exterior/ (4 photos)
//! Assets → assets/site-1a2b3c4d.css, assets/lightbox-5e6f7a8b.js
//!
//! Generated 19 pages, copied 8 files
//! ```
//!
//! ## Browse
//!
//! ```text
//! [Kitchen] 2 photos
//!     Lightbox 1 / 2: Kitchen island with quartz hood
//! ```
//!
//! Each `format_*` function is pure and returns lines; the `print_*` wrappers
//! write them to stdout.

use crate::catalog::Catalog;
use crate::gallery::{GalleryView, ScrollLock};
use crate::generate::{GALLERY_DIR, SiteSummary};
use crate::scan::Manifest;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn photo_count(n: usize) -> String {
    if n == 1 {
        "1 photo".to_string()
    } else {
        format!("{n} photos")
    }
}

// ============================================================================
// Scan
// ============================================================================

pub fn format_scan_output(manifest: &Manifest) -> Vec<String> {
    let listing = &manifest.listing;
    let mut lines = vec![
        "Listing".to_string(),
        format!("{}{}", indent(1), listing.address.full()),
        format!(
            "{}{} · {}",
            indent(1),
            listing.price_formatted(),
            listing.summary()
        ),
    ];

    lines.push(String::new());
    lines.extend(format_catalog(&manifest.catalog));

    if let Some(floorplan) = &manifest.floorplan {
        lines.push(String::new());
        lines.push("Floorplan".to_string());
        lines.push(format!("{}{}", indent(1), floorplan));
    }
    lines
}

fn format_catalog(catalog: &Catalog) -> Vec<String> {
    let mut lines = vec![format!(
        "Gallery ({}, \"All\" shows {})",
        photo_count(catalog.total()),
        catalog.all_view().len()
    )];
    for (pos, category) in catalog.populated_categories().enumerate() {
        let bucket = catalog.bucket(category);
        lines.push(format!(
            "{} {} ({})",
            format_index(pos + 1),
            category.label(),
            photo_count(bucket.len())
        ));
        for (idx, image) in bucket.iter().enumerate() {
            lines.push(format!(
                "{}{} {}",
                indent(1),
                format_index(idx + 1),
                image.caption
            ));
            lines.push(format!("{}Source: {}", indent(2), image.url));
        }
    }
    lines
}

pub fn print_scan_output(manifest: &Manifest) {
    for line in format_scan_output(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate
// ============================================================================

pub fn format_generate_output(summary: &SiteSummary) -> Vec<String> {
    let mut lines = vec!["Showcase → index.html".to_string()];
    for (pos, filter) in summary.filters.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}/{}/ ({})",
            format_index(pos + 1),
            filter.label,
            GALLERY_DIR,
            filter.key,
            photo_count(filter.images)
        ));
    }
    lines.push(format!("Assets → {}, {}", summary.stylesheet, summary.script));
    lines.push(String::new());
    lines.push(format!(
        "Generated {} pages, copied {} files",
        summary.page_count(),
        summary.copied_files
    ));
    lines
}

pub fn print_generate_output(summary: &SiteSummary) {
    for line in format_generate_output(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Browse
// ============================================================================

/// Current filter, list size and lightbox state.
pub fn format_view_state<S: ScrollLock>(view: &GalleryView<'_, S>) -> Vec<String> {
    let images = view.filtered();
    let mut lines = vec![format!(
        "[{}] {}",
        view.filter().label(),
        photo_count(images.len())
    )];
    match view.slide() {
        Some(slide) => lines.push(format!(
            "{}Lightbox {}: {}",
            indent(1),
            slide.counter(),
            slide.image.caption
        )),
        None => {
            for (idx, image) in images.iter().enumerate() {
                lines.push(format!(
                    "{}{} {}",
                    indent(1),
                    format_index(idx + 1),
                    image.caption
                ));
            }
        }
    }
    lines
}

/// Filter keys the browser accepts, with photo counts.
pub fn format_category_list(catalog: &Catalog) -> Vec<String> {
    let mut lines = vec![format!("all ({})", photo_count(catalog.all_view().len()))];
    lines.extend(
        catalog
            .populated_categories()
            .map(|c| format!("{} ({})", c.key(), photo_count(catalog.bucket(c).len()))),
    );
    lines
}
