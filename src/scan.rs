//! Content directory scanning and manifest generation.
//!
//! Stage 1 of the build. Reads the listing, the site config and the photo
//! tree, producing a [`Manifest`] that the generate stage consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── listing.toml                 # Property facts (required)
//! ├── config.toml                  # Site configuration (optional)
//! ├── description.md               # Long description (optional)
//! ├── floorplan.jpg                # Floorplan image (optional)
//! └── photos/
//!     ├── 010-exterior/            # Category directory, prefix optional
//!     │   ├── 001-front-at-dusk.jpg
//!     │   ├── 001-front-at-dusk.txt   # Caption sidecar
//!     │   └── 002-rear-yard.jpg
//!     └── kitchen/
//!         └── 001-island.jpg
//! ```
//!
//! ## Rules
//!
//! - A category directory's name (minus any `NNN-` prefix) must be a known
//!   category key; `features` is accepted for `special`.
//! - Two directories may not map to the same category.
//! - Photos sit directly inside a category directory, never in `photos/`.
//! - Photo numbers are unique within a category. Unnumbered photos sort last,
//!   by filename.
//! - Captions come from the sidecar `.txt`, else from the filename.
//!
//! Directory order on disk does not matter: the catalog always iterates
//! categories in their fixed order.

use crate::catalog::{Catalog, Category, ImageAsset};
use crate::config::{self, SiteConfig};
use crate::listing::{self, Listing};
use crate::naming::parse_entry_name;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Listing error: {0}")]
    Listing(#[from] listing::ListingError),
    #[error("Directory does not name a photo category: {}", .0.display())]
    UnknownCategory(PathBuf),
    #[error("Category {0} has more than one directory")]
    DuplicateCategory(Category),
    #[error("Photo outside a category directory: {}", .0.display())]
    StrayImage(PathBuf),
    #[error("Duplicate photo number {} in {}", .0, .1.display())]
    DuplicateNumber(u32, PathBuf),
}

/// Manifest output from the scan stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub listing: Listing,
    pub catalog: Catalog,
    /// Content-relative path of the floorplan image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floorplan: Option<String>,
    pub config: SiteConfig,
}

pub const PHOTOS_DIR: &str = "photos";

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "avif"];

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;
    let listing = listing::load_listing(root)?;
    let catalog = scan_photos(root, config.gallery.all_limit)?;
    let floorplan = find_floorplan(root);

    Ok(Manifest {
        listing,
        catalog,
        floorplan,
        config,
    })
}

/// Build the catalog from `root/photos`. A missing directory is an empty catalog.
pub fn scan_photos(root: &Path, all_limit: usize) -> Result<Catalog, ScanError> {
    let mut catalog = Catalog::new(all_limit);
    let photos = root.join(PHOTOS_DIR);
    if !photos.is_dir() {
        return Ok(catalog);
    }

    let mut seen: Vec<Category> = Vec::new();
    for entry in collect_entries(&photos)? {
        if entry.is_file() {
            if is_image(&entry) {
                return Err(ScanError::StrayImage(entry));
            }
            continue;
        }
        let dir_name = file_name(&entry);
        let category = Category::from_key(&parse_entry_name(&dir_name).name)
            .ok_or_else(|| ScanError::UnknownCategory(entry.clone()))?;
        if seen.contains(&category) {
            return Err(ScanError::DuplicateCategory(category));
        }
        seen.push(category);

        for asset in scan_category(&entry, &dir_name, category)? {
            catalog.insert(asset);
        }
    }
    Ok(catalog)
}

fn scan_category(
    dir: &Path,
    dir_name: &str,
    category: Category,
) -> Result<Vec<ImageAsset>, ScanError> {
    let mut numbered: Vec<(u32, PathBuf)> = Vec::new();
    let mut unnumbered: Vec<PathBuf> = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let path = entry?.into_path();
        if !is_image(&path) {
            continue;
        }
        match parse_entry_name(&file_stem(&path)).number {
            Some(num) => {
                if numbered.iter().any(|(n, _)| *n == num) {
                    return Err(ScanError::DuplicateNumber(num, dir.to_path_buf()));
                }
                numbered.push((num, path));
            }
            None => unnumbered.push(path),
        }
    }
    numbered.sort_by_key(|(num, _)| *num);

    let assets = numbered
        .into_iter()
        .map(|(_, path)| path)
        .chain(unnumbered)
        .map(|path| {
            let filename = file_name(&path);
            ImageAsset::new(
                format!("{PHOTOS_DIR}/{dir_name}/{filename}"),
                caption_for(&path),
                category,
            )
        })
        .collect();
    Ok(assets)
}

/// Sidecar text, else the filename caption, else the filename itself.
fn caption_for(image_path: &Path) -> String {
    read_sidecar(image_path)
        .or_else(|| parse_entry_name(&file_stem(image_path)).caption())
        .unwrap_or_else(|| file_name(image_path))
}

/// Read `001-photo.txt` next to `001-photo.jpg`. Empty sidecars count as absent.
fn read_sidecar(image_path: &Path) -> Option<String> {
    fs::read_to_string(image_path.with_extension("txt"))
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// First `floorplan.<image ext>` in the content root.
fn find_floorplan(root: &Path) -> Option<String> {
    IMAGE_EXTENSIONS
        .iter()
        .map(|ext| format!("floorplan.{ext}"))
        .find(|name| root.join(name).is_file())
}

fn collect_entries(path: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut entries: Vec<PathBuf> = fs::read_dir(path)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| !file_name(p).starts_with('.'))
        .collect();
    entries.sort();
    Ok(entries)
}

fn is_image(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
