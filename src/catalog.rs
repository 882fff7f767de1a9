//! The photo catalog of a listing.
//!
//! Every photo belongs to exactly one [`Category`]. The catalog keeps one
//! ordered bucket per category and exposes a capped "all" projection for the
//! gallery's default view.
//!
//! ## Category Order
//!
//! Categories have a fixed iteration order that is part of the site's
//! contract, not an accident of insertion:
//!
//! ```text
//! exterior → living → kitchen → bedrooms → bathrooms → special → outdoor → suite → details
//! ```
//!
//! The "all" view concatenates buckets in this order and keeps the first
//! [`Catalog::all_limit`] photos (12 by default), so the first exterior shots
//! always lead the gallery no matter how the content directory was laid out.
//!
//! The catalog is read-only once built. The gallery view borrows it and
//! never mutates it.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Default number of photos shown by the "all" view.
pub const DEFAULT_ALL_LIMIT: usize = 12;

/// Fixed classification tag for a photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Exterior,
    Living,
    Kitchen,
    Bedrooms,
    Bathrooms,
    Special,
    Outdoor,
    Suite,
    Details,
}

impl Category {
    /// All categories in catalog iteration order.
    pub const ALL: [Category; 9] = [
        Category::Exterior,
        Category::Living,
        Category::Kitchen,
        Category::Bedrooms,
        Category::Bathrooms,
        Category::Special,
        Category::Outdoor,
        Category::Suite,
        Category::Details,
    ];

    /// Stable lowercase key, used in directory names and URLs.
    pub fn key(self) -> &'static str {
        match self {
            Category::Exterior => "exterior",
            Category::Living => "living",
            Category::Kitchen => "kitchen",
            Category::Bedrooms => "bedrooms",
            Category::Bathrooms => "bathrooms",
            Category::Special => "special",
            Category::Outdoor => "outdoor",
            Category::Suite => "suite",
            Category::Details => "details",
        }
    }

    /// Button label shown in the filter bar.
    pub fn label(self) -> &'static str {
        match self {
            Category::Exterior => "Exterior",
            Category::Living => "Living",
            Category::Kitchen => "Kitchen",
            Category::Bedrooms => "Bedrooms",
            Category::Bathrooms => "Bathrooms",
            Category::Special => "Features",
            Category::Outdoor => "Outdoor",
            Category::Suite => "Suite",
            Category::Details => "Details",
        }
    }

    /// Look up a category by key. Case-insensitive, surrounding whitespace
    /// ignored. The display label "features" is accepted for [`Category::Special`].
    pub fn from_key(key: &str) -> Option<Category> {
        let key = key.trim().to_ascii_lowercase();
        if key == "features" {
            return Some(Category::Special);
        }
        Category::ALL.into_iter().find(|c| c.key() == key)
    }

    fn position(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single listing photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAsset {
    /// Site-relative URL (or absolute URL) of the full-size image.
    pub url: String,
    /// Caption shown under the image and used as alt text.
    pub caption: String,
    pub category: Category,
}

impl ImageAsset {
    pub fn new(url: impl Into<String>, caption: impl Into<String>, category: Category) -> Self {
        Self {
            url: url.into(),
            caption: caption.into(),
            category,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum CatalogError {
    #[error("all_limit must be at least 1")]
    ZeroAllLimit,
    #[error("photo {url} is tagged {found} but stored in the {bucket} bucket")]
    MisplacedAsset {
        url: String,
        bucket: Category,
        found: Category,
    },
}

/// Photos grouped into per-category buckets.
///
/// Deserialization goes through `RawCatalog`, so a hand-edited manifest
/// cannot put a photo in another category's bucket or disable the "all" view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCatalog")]
pub struct Catalog {
    /// One bucket per category, indexed by category position.
    buckets: [Vec<ImageAsset>; 9],
    all_limit: usize,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(DEFAULT_ALL_LIMIT)
    }
}

/// Unchecked wire form of [`Catalog`].
#[derive(Deserialize)]
struct RawCatalog {
    buckets: [Vec<ImageAsset>; 9],
    all_limit: usize,
}

impl TryFrom<RawCatalog> for Catalog {
    type Error = CatalogError;

    fn try_from(raw: RawCatalog) -> Result<Self, Self::Error> {
        if raw.all_limit == 0 {
            return Err(CatalogError::ZeroAllLimit);
        }
        for (bucket, assets) in Category::ALL.into_iter().zip(&raw.buckets) {
            if let Some(asset) = assets.iter().find(|a| a.category != bucket) {
                return Err(CatalogError::MisplacedAsset {
                    url: asset.url.clone(),
                    bucket,
                    found: asset.category,
                });
            }
        }
        Ok(Self {
            buckets: raw.buckets,
            all_limit: raw.all_limit,
        })
    }
}

impl Catalog {
    /// Empty catalog whose "all" view keeps at most `all_limit` photos.
    pub fn new(all_limit: usize) -> Self {
        Self {
            buckets: Default::default(),
            all_limit,
        }
    }

    /// Build a catalog from assets, preserving their relative order per category.
    pub fn from_assets(assets: impl IntoIterator<Item = ImageAsset>, all_limit: usize) -> Self {
        let mut catalog = Self::new(all_limit);
        for asset in assets {
            catalog.insert(asset);
        }
        catalog
    }

    /// Append an asset to the end of its category's bucket.
    pub fn insert(&mut self, asset: ImageAsset) {
        self.buckets[asset.category.position()].push(asset);
    }

    /// Photos of one category, in stored order.
    pub fn bucket(&self, category: Category) -> &[ImageAsset] {
        &self.buckets[category.position()]
    }

    /// Every photo in category order, uncapped.
    pub fn iter(&self) -> impl Iterator<Item = &ImageAsset> {
        self.buckets.iter().flatten()
    }

    /// The "all" projection: the first [`Self::all_limit`] photos in category order.
    pub fn all_view(&self) -> Vec<&ImageAsset> {
        self.iter().take(self.all_limit).collect()
    }

    pub fn all_limit(&self) -> usize {
        self.all_limit
    }

    /// Total number of photos across all buckets.
    pub fn total(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Categories that hold at least one photo, in catalog order.
    pub fn populated_categories(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL
            .into_iter()
            .filter(|c| !self.bucket(*c).is_empty())
    }
}
