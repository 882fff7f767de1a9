//! Shared test utilities for the listing-showcase test suite.
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//! assert_eq!(
//!     bucket_captions(&manifest.catalog, Category::Kitchen),
//!     vec!["Kitchen island with quartz hood", "Prep kitchen"],
//! );
//! ```

use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

use crate::catalog::{Catalog, Category, ImageAsset};
use crate::listing::Listing;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    for entry in WalkDir::new(&fixtures).min_depth(1) {
        let entry = entry.unwrap();
        let dst = tmp.path().join(entry.path().strip_prefix(&fixtures).unwrap());
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&dst).unwrap();
        } else {
            std::fs::copy(entry.path(), &dst).unwrap();
        }
    }
    tmp
}

/// The fixture listing, parsed without touching the filesystem.
pub fn sample_listing() -> Listing {
    toml::from_str(include_str!("../fixtures/content/listing.toml")).unwrap()
}

// =========================================================================
// Catalog builders and extractors
// =========================================================================

/// An asset whose URL is derived from its caption.
pub fn asset(category: Category, caption: &str) -> ImageAsset {
    ImageAsset::new(
        format!("photos/{}/{}.jpg", category.key(), caption.to_lowercase()),
        caption,
        category,
    )
}

/// Captions of a list of assets, in order.
pub fn captions<'a>(images: &[&'a ImageAsset]) -> Vec<&'a str> {
    images.iter().map(|a| a.caption.as_str()).collect()
}

/// Captions of one catalog bucket, in order.
pub fn bucket_captions(catalog: &Catalog, category: Category) -> Vec<&str> {
    catalog
        .bucket(category)
        .iter()
        .map(|a| a.caption.as_str())
        .collect()
}
