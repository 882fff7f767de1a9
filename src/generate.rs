//! HTML site generation.
//!
//! Stage 2 of the build. Takes the scan manifest and writes the final static
//! site.
//!
//! ## Generated Pages
//!
//! - **Showcase** (`/index.html`): hero, about, gallery ("All" view), details,
//!   floorplan, agent panel and footer on one page
//! - **Filter pages** (`/gallery/{key}/index.html`): the gallery grid for one
//!   filter, for "all" and every category that has photos
//! - **Lightbox pages** (`/gallery/{key}/{n}.html`): one full-screen viewer per
//!   photo of each filter, with previous/next/close links
//!
//! Lightbox pages are produced by driving a [`GalleryView`]: the generator
//! selects the filter, opens the lightbox at each index and asks the view for
//! the slide and for its neighbours with `prev`/`next`. Wraparound, counters
//! and captions therefore come from the same state machine the interactive
//! browser uses. A page's body is marked `lightbox-open` when the view holds
//! the scroll lock.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── floorplan.jpg
//! ├── assets/
//! │   ├── site-1a2b3c4d.css        # Palette + base styles, fingerprinted
//! │   └── lightbox-5e6f7a8b.js     # Arrow keys and Escape on lightbox pages
//! ├── gallery/
//! │   ├── all/
//! │   │   ├── index.html
//! │   │   ├── 1.html
//! │   │   └── ...
//! │   └── kitchen/
//! │       └── ...
//! └── photos/                      # Cataloged photos only
//! ```
//!
//! `gallery/`, `assets/` and `photos/` are rebuilt from scratch on every run,
//! so pages of a category whose directory was removed disappear too. The
//! output directory may not be the content directory.
//!
//! All links are relative, so the site works from any path prefix and from
//! the local filesystem. Content paths are percent-encoded when they become
//! links, since photo filenames are copied as they are.

use crate::catalog::{Catalog, ImageAsset};
use crate::config::{self, SiteConfig};
use crate::gallery::{CategoryFilter, GalleryView, ScrollState};
use crate::listing::Listing;
use crate::scan::{Manifest, PHOTOS_DIR};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Output directory is the content directory: {}", .0.display())]
    OutputIsSource(PathBuf),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/lightbox.js");

/// Directory of the gallery filter pages inside the output.
pub const GALLERY_DIR: &str = "gallery";

const ASSETS_DIR: &str = "assets";

/// What a generate run produced, for CLI reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteSummary {
    pub filters: Vec<FilterSummary>,
    pub stylesheet: String,
    pub script: String,
    pub copied_files: usize,
}

impl SiteSummary {
    /// Total HTML pages written, the showcase included.
    pub fn page_count(&self) -> usize {
        1 + self.filters.iter().map(|f| 1 + f.images).sum::<usize>()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterSummary {
    pub key: String,
    pub label: String,
    pub images: usize,
}

/// Fingerprinted asset paths, relative to the site root.
struct SiteAssets {
    stylesheet: String,
    script: String,
}

/// Settings shared by every page.
struct PageContext<'a> {
    config: &'a SiteConfig,
    listing: &'a Listing,
    assets: &'a SiteAssets,
}

impl PageContext<'_> {
    fn title(&self) -> String {
        self.config
            .site
            .title
            .clone()
            .unwrap_or_else(|| self.listing.address.street.clone())
    }
}

/// Read the manifest at `manifest_path` and write the site to `output_dir`.
pub fn generate(
    manifest_path: &Path,
    source_root: &Path,
    output_dir: &Path,
) -> Result<SiteSummary, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;
    render_site(&manifest, source_root, output_dir)
}

/// Write the site for an already loaded manifest.
pub fn render_site(
    manifest: &Manifest,
    source_root: &Path,
    output_dir: &Path,
) -> Result<SiteSummary, GenerateError> {
    fs::create_dir_all(output_dir)?;
    clear_generated(source_root, output_dir)?;

    let css = format!(
        "{}\n\n{}",
        config::generate_color_css(&manifest.config.colors),
        CSS_STATIC
    );
    let assets = SiteAssets {
        stylesheet: format!("{ASSETS_DIR}/site-{}.css", fingerprint(&css)),
        script: format!("{ASSETS_DIR}/lightbox-{}.js", fingerprint(JS)),
    };
    write_file(&output_dir.join(&assets.stylesheet), &css)?;
    write_file(&output_dir.join(&assets.script), JS)?;

    let copied_files = copy_media(manifest, source_root, output_dir)?;

    let ctx = PageContext {
        config: &manifest.config,
        listing: &manifest.listing,
        assets: &assets,
    };

    write_file(
        &output_dir.join("index.html"),
        &render_showcase(&ctx, &manifest.catalog, manifest.floorplan.as_deref()).into_string(),
    )?;

    let mut filters = Vec::new();
    for filter in site_filters(&manifest.catalog) {
        let filter_dir = output_dir.join(GALLERY_DIR).join(filter.key());
        let mut view = GalleryView::new(&manifest.catalog, ScrollState::default());
        view.select_category(filter.key());

        write_file(
            &filter_dir.join("index.html"),
            &render_filter_page(&ctx, &view).into_string(),
        )?;

        let count = view.filtered().len();
        for index in 0..count {
            view.open_at(index);
            write_file(
                &filter_dir.join(format!("{}.html", index + 1)),
                &render_lightbox_page(&ctx, &view).into_string(),
            )?;
        }
        view.close();

        filters.push(FilterSummary {
            key: filter.key().to_string(),
            label: filter.label().to_string(),
            images: count,
        });
    }

    Ok(SiteSummary {
        filters,
        stylesheet: assets.stylesheet,
        script: assets.script,
        copied_files,
    })
}

/// Filters that get pages: "all", then every category with photos.
pub fn site_filters(catalog: &Catalog) -> Vec<CategoryFilter> {
    std::iter::once(CategoryFilter::All)
        .chain(catalog.populated_categories().map(CategoryFilter::Only))
        .collect()
}

/// First eight hex digits of the SHA-256 of `content`.
fn fingerprint(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    digest[..4].iter().map(|b| format!("{b:02x}")).collect()
}

fn write_file(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}

/// Copy the cataloged photos and the floorplan into the output. Returns the
/// file count. Files scan skipped (notes, sidecars, dotfiles) are not copied.
fn copy_media(
    manifest: &Manifest,
    source_root: &Path,
    output_dir: &Path,
) -> Result<usize, GenerateError> {
    let local = manifest
        .catalog
        .iter()
        .map(|image| image.url.as_str())
        .chain(manifest.floorplan.as_deref())
        .filter(|url| !is_absolute_url(url));

    let mut copied = 0;
    for rel in local {
        let dst = output_dir.join(rel);
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(source_root.join(rel), dst)?;
        copied += 1;
    }
    Ok(copied)
}

/// Remove what a previous run generated, so pages for categories that no
/// longer exist do not linger.
fn clear_generated(source_root: &Path, output_dir: &Path) -> Result<(), GenerateError> {
    if let (Ok(src), Ok(out)) = (source_root.canonicalize(), output_dir.canonicalize())
        && src == out
    {
        return Err(GenerateError::OutputIsSource(out));
    }
    for dir in [GALLERY_DIR, ASSETS_DIR, PHOTOS_DIR] {
        let path = output_dir.join(dir);
        if path.is_dir() {
            fs::remove_dir_all(path)?;
        }
    }
    Ok(())
}

fn is_absolute_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://") || url.starts_with('/')
}

/// Percent-encode every byte outside the RFC 3986 unreserved set, keeping
/// `/` as the segment separator.
fn encode_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for byte in path.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Prefix a content-relative path with `root`, percent-encoding it.
/// Absolute URLs pass through.
fn href(root: &str, url: &str) -> String {
    if is_absolute_url(url) {
        url.to_string()
    } else {
        format!("{root}{}", encode_path(url))
    }
}

fn markdown_to_html(markdown: &str) -> String {
    let mut out = String::new();
    md_html::push_html(&mut out, Parser::new(markdown));
    out
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document. `root` is the relative path to the site root.
fn base_document(
    ctx: &PageContext<'_>,
    root: &str,
    title: &str,
    body_class: Option<&str>,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(ctx.config.site.language) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href={ (root) (ctx.assets.stylesheet) };
            }
            body class=[body_class] data-motion=(ctx.config.gallery.motion.as_str()) {
                (content)
            }
        }
    }
}

fn site_nav(root: &str, has_floorplan: bool, has_agent: bool) -> Markup {
    let home = if root.is_empty() { "" } else { "index.html" };
    html! {
        nav.site-nav {
            a href={ (root) (home) "#about" } { "About" }
            a href={ (root) (home) "#gallery" } { "Gallery" }
            a href={ (root) (home) "#details" } { "Details" }
            @if has_floorplan {
                a href={ (root) (home) "#floorplan" } { "Floorplan" }
            }
            @if has_agent {
                a href={ (root) (home) "#agent" } { "Contact" }
            }
        }
    }
}

fn section_heading(kicker: &str, title: &str) -> Markup {
    html! {
        p.section-kicker { (kicker) }
        h2 { (title) }
    }
}

/// Category buttons. The active filter is marked; links point at filter pages.
fn filter_bar(catalog: &Catalog, active: &CategoryFilter, gallery_root: &str) -> Markup {
    html! {
        nav.filter-bar {
            @for filter in site_filters(catalog) {
                @let is_active = &filter == active;
                a class=[is_active.then_some("active")]
                    href={ (gallery_root) (filter.key()) "/index.html" } {
                    (filter.label())
                }
            }
        }
    }
}

/// Thumbnail grid. Card `n` links to `{lightbox_base}{n}.html`.
fn photo_grid(images: &[&ImageAsset], root: &str, lightbox_base: &str) -> Markup {
    html! {
        div.photo-grid {
            @for (idx, image) in images.iter().enumerate() {
                a.photo-card href={ (lightbox_base) (idx + 1) ".html" } {
                    img src=(href(root, &image.url)) alt=(image.caption) loading="lazy";
                    p.caption { (image.caption) }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// The one-page showcase.
fn render_showcase(ctx: &PageContext<'_>, catalog: &Catalog, floorplan: Option<&str>) -> Markup {
    let listing = ctx.listing;
    let view = GalleryView::new(catalog, ScrollState::default());
    let all_images = view.filtered();
    let hero_style = all_images
        .first()
        .map(|image| format!("background-image: url('{}')", href("", &image.url)));

    let content = html! {
        (site_nav("", floorplan.is_some(), listing.agent.is_some()))
        main {
            section.hero style=[hero_style] {
                h1 { (listing.headline) }
                @if !listing.tagline.is_empty() {
                    p.hero-tagline { (listing.tagline) }
                }
                p.hero-price { (listing.price_formatted()) }
                p.hero-summary { (listing.summary()) }
                p.hero-address { (listing.address.full()) }
                @if let Some(open_house) = &listing.open_house {
                    p.open-house { "Open House · " (open_house.date) " · " (open_house.time) }
                }
            }
            section id="about" {
                (section_heading("The Residence", &listing.address.street))
                @if let Some(description) = &listing.description {
                    article.description { (PreEscaped(markdown_to_html(description))) }
                }
                @if !listing.highlights.is_empty() {
                    ul.highlights {
                        @for highlight in &listing.highlights {
                            li { (highlight) }
                        }
                    }
                }
            }
            section id="gallery" {
                (section_heading("Visual Journey", "Gallery"))
                (filter_bar(catalog, view.filter(), "gallery/"))
                (photo_grid(&all_images, "", "gallery/all/"))
                @if catalog.total() > all_images.len() {
                    p.view-all {
                        a href="gallery/all/index.html" { "View All " (catalog.total()) " Photos" }
                    }
                }
            }
            section id="details" {
                (section_heading("Specifications", "Property Details"))
                dl.facts {
                    @for (label, value) in listing.facts() {
                        div.fact {
                            dt.fact-label { (label) }
                            dd.fact-value { (value) }
                        }
                    }
                }
                @if !listing.features.is_empty() {
                    div.feature-groups {
                        @for group in &listing.features {
                            div.feature-group {
                                h3 { (group.title) }
                                ul {
                                    @for item in &group.items {
                                        li { (item) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
            @if let Some(floorplan) = floorplan {
                section.floorplan id="floorplan" {
                    (section_heading("Spatial Design", "Floorplan"))
                    img src=(href("", floorplan)) alt={ "Floorplan - " (listing.address.street) };
                    p.caption { (listing.address.street) " · " (listing.summary()) }
                }
            }
            @if let Some(agent) = &listing.agent {
                section.agent id="agent" {
                    (section_heading("Presented By", &agent.name))
                    @if let Some(brokerage) = &agent.brokerage {
                        p.brokerage { (brokerage) }
                    }
                    ul.agent-contact {
                        @if let Some(phone) = &agent.phone {
                            li { a href={ "tel:" (phone.replace(|c: char| !c.is_ascii_digit() && c != '+', "")) } { (phone) } }
                        }
                        @if let Some(email) = &agent.email {
                            li { a href={ "mailto:" (email) } { (email) } }
                        }
                        @if let Some(website) = &agent.website {
                            li { a href=(website) target="_blank" rel="noopener" { (website) } }
                        }
                        @if let Some(office) = &agent.office {
                            li { (office) }
                        }
                    }
                    @if !agent.social.is_empty() {
                        ul.agent-social {
                            @for (network, url) in &agent.social {
                                li { a href=(url) target="_blank" rel="noopener" { (network) } }
                            }
                        }
                    }
                }
            }
        }
        footer {
            p { (listing.address.full()) }
            @if let Some(mls) = &listing.mls {
                p { "MLS® " (mls) }
            }
        }
    };

    base_document(ctx, "", &ctx.title(), None, content)
}

/// Gallery grid for the view's active filter.
fn render_filter_page(ctx: &PageContext<'_>, view: &GalleryView<'_, ScrollState>) -> Markup {
    let root = "../../";
    let images = view.filtered();
    let filter = view.filter();

    let content = html! {
        (site_nav(root, false, ctx.listing.agent.is_some()))
        main {
            section id="gallery" {
                (section_heading(&ctx.listing.address.street, filter.label()))
                (filter_bar(view.catalog(), filter, "../"))
                @if images.is_empty() {
                    p.empty { "No photos in this category." }
                } @else {
                    (photo_grid(&images, root, ""))
                }
            }
        }
    };

    let title = format!("{} - {}", ctx.title(), filter.label());
    base_document(ctx, root, &title, None, content)
}

/// Full-screen viewer for the view's open slide.
///
/// Previous and next targets are found by stepping clones of the view.
fn render_lightbox_page(ctx: &PageContext<'_>, view: &GalleryView<'_, ScrollState>) -> Markup {
    let root = "../../";
    let Some(slide) = view.slide() else {
        return render_filter_page(ctx, view);
    };

    let neighbour = |forward: bool| -> String {
        let mut probe = view.clone();
        if forward {
            probe.next();
        } else {
            probe.prev();
        }
        probe
            .slide()
            .map(|s| format!("{}.html", s.position()))
            .unwrap_or_else(|| "index.html".to_string())
    };
    let prev_url = neighbour(false);
    let next_url = neighbour(true);
    let close_url = "index.html";

    let body_class = view.scroll().is_locked().then_some("lightbox-open");
    let progress = format!("width: {:.1}%", slide.progress_percent());

    let content = html! {
        div.lightbox data-prev=(prev_url) data-next=(next_url) data-close=(close_url) {
            a.lightbox-backdrop href=(close_url) aria-label="Close" {}
            a.lightbox-close href=(close_url) aria-label="Close" { "×" }
            a.lightbox-prev href=(prev_url) aria-label="Previous photo" { "‹" }
            a.lightbox-next href=(next_url) aria-label="Next photo" { "›" }
            figure {
                img src=(href(root, &slide.image.url)) alt=(slide.image.caption);
                figcaption.caption { (slide.image.caption) }
            }
            div.lightbox-progress {
                span.counter { (slide.counter()) }
                div.progress-track {
                    div.progress-bar style=(progress) {}
                }
            }
        }
        script src={ (root) (ctx.assets.script) } {}
    };

    let title = format!(
        "{} - {} {}",
        ctx.title(),
        view.filter().label(),
        slide.counter()
    );
    base_document(ctx, root, &title, body_class, content)
}

// ============================================================================
// Tests
// ============================================================================
