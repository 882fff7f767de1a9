//! Gallery filtering and lightbox navigation.
//!
//! [`GalleryView`] is the interactive state behind the gallery section: which
//! category filter is active and whether the lightbox is showing an image.
//! It borrows a read-only [`Catalog`] and never stores the filtered list; every
//! read re-derives it from `(filter, catalog)`, so a filter change can never
//! leave a stale list behind.
//!
//! ## Lightbox States
//!
//! ```text
//!            open_at(i)                 next / prev / ArrowRight / ArrowLeft
//!   Closed ─────────────▶ Open(i) ◀──────────────────────────────────┐
//!     ▲                    │  └─────────────────────────────────────┘
//!     └────────────────────┘
//!       close / Escape / category change
//! ```
//!
//! Navigation wraps in both directions over the current filtered list. When
//! that list is empty, `next` and `prev` do nothing.
//!
//! ## Background Scroll
//!
//! A lightbox on a web page blocks scrolling of the page behind it. The view
//! does not touch any page itself; it asks its host through [`ScrollLock`].
//! The lock is taken once on `Closed → Open` and released once on
//! `Open → Closed`, never twice in a row.
//!
//! ## Input Normalization
//!
//! Nothing here fails. Unknown category keys select an empty list, out-of-range
//! open indices clamp to the first image, and navigation on an empty list is
//! ignored.

use crate::catalog::{Catalog, Category, ImageAsset};
use std::fmt;

/// Sentinel key for the unfiltered view.
pub const ALL_KEY: &str = "all";

/// Host capability for blocking page scroll while the lightbox is open.
pub trait ScrollLock {
    fn suspend_scroll(&mut self);
    fn resume_scroll(&mut self);
}

/// Scroll lock that only remembers whether it is held.
///
/// Used when rendering static lightbox pages (the page body is marked
/// `lightbox-open` while held) and by the terminal browser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollState {
    locked: bool,
}

impl ScrollState {
    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

impl ScrollLock for ScrollState {
    fn suspend_scroll(&mut self) {
        self.locked = true;
    }

    fn resume_scroll(&mut self) {
        self.locked = false;
    }
}

/// Active category filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    /// The capped multi-category view.
    All,
    Only(Category),
    /// A key that names no category. Always selects nothing.
    Unmatched(String),
}

impl CategoryFilter {
    /// Interpret a filter key. Never fails.
    pub fn parse(key: &str) -> Self {
        if key.trim().eq_ignore_ascii_case(ALL_KEY) {
            return CategoryFilter::All;
        }
        match Category::from_key(key) {
            Some(category) => CategoryFilter::Only(category),
            None => CategoryFilter::Unmatched(key.to_string()),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_KEY,
            CategoryFilter::Only(c) => c.key(),
            CategoryFilter::Unmatched(key) => key,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(c) => c.label(),
            CategoryFilter::Unmatched(key) => key,
        }
    }

    /// Photos this filter selects from `catalog`.
    pub fn apply<'c>(&self, catalog: &'c Catalog) -> Vec<&'c ImageAsset> {
        match self {
            CategoryFilter::All => catalog.all_view(),
            CategoryFilter::Only(c) => catalog.bucket(*c).iter().collect(),
            CategoryFilter::Unmatched(_) => Vec::new(),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lightbox state. The index points into the current filtered list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lightbox {
    #[default]
    Closed,
    Open {
        index: usize,
    },
}

impl Lightbox {
    pub fn is_open(&self) -> bool {
        matches!(self, Lightbox::Open { .. })
    }
}

/// Keys the lightbox reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowLeft,
    ArrowRight,
    Escape,
}

impl NavKey {
    /// Map a DOM `KeyboardEvent.key` name to a navigation key.
    pub fn from_key_name(name: &str) -> Option<NavKey> {
        match name {
            "ArrowLeft" => Some(NavKey::ArrowLeft),
            "ArrowRight" => Some(NavKey::ArrowRight),
            "Escape" | "Esc" => Some(NavKey::Escape),
            _ => None,
        }
    }
}

/// The image currently shown in an open lightbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slide<'c> {
    pub image: &'c ImageAsset,
    /// Zero-based index into the filtered list.
    pub index: usize,
    /// Length of the filtered list.
    pub total: usize,
}

impl Slide<'_> {
    /// One-based position for display.
    pub fn position(&self) -> usize {
        self.index + 1
    }

    /// Position counter, e.g. `"3 / 12"`.
    pub fn counter(&self) -> String {
        format!("{} / {}", self.position(), self.total)
    }

    /// Fraction of the list seen so far, in percent.
    pub fn progress_percent(&self) -> f64 {
        self.position() as f64 / self.total as f64 * 100.0
    }
}

/// Filter and lightbox state of one gallery instance.
#[derive(Debug, Clone)]
pub struct GalleryView<'c, S: ScrollLock> {
    catalog: &'c Catalog,
    filter: CategoryFilter,
    lightbox: Lightbox,
    scroll: S,
}

impl<'c, S: ScrollLock> GalleryView<'c, S> {
    /// A closed gallery showing the "all" view.
    pub fn new(catalog: &'c Catalog, scroll: S) -> Self {
        Self {
            catalog,
            filter: CategoryFilter::All,
            lightbox: Lightbox::Closed,
            scroll,
        }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn lightbox(&self) -> Lightbox {
        self.lightbox
    }

    pub fn scroll(&self) -> &S {
        &self.scroll
    }

    /// Photos visible under the active filter, derived on every call.
    pub fn filtered(&self) -> Vec<&'c ImageAsset> {
        self.filter.apply(self.catalog)
    }

    /// Switch the category filter. Closes the lightbox if the filter changes.
    pub fn select_category(&mut self, key: &str) {
        let filter = CategoryFilter::parse(key);
        if filter == self.filter {
            return;
        }
        self.close();
        self.filter = filter;
    }

    /// Open the lightbox at `index` of the filtered list.
    ///
    /// Out-of-range indices clamp to 0. With an empty list the lightbox stays
    /// closed. Opening while already open only moves the index.
    pub fn open_at(&mut self, index: usize) {
        let len = self.filtered().len();
        if len == 0 {
            return;
        }
        let index = if index < len { index } else { 0 };
        if !self.lightbox.is_open() {
            self.scroll.suspend_scroll();
        }
        self.lightbox = Lightbox::Open { index };
    }

    pub fn close(&mut self) {
        if self.lightbox.is_open() {
            self.lightbox = Lightbox::Closed;
            self.scroll.resume_scroll();
        }
    }

    /// Advance one image, wrapping to the first after the last.
    pub fn next(&mut self) {
        self.step(|index, len| (index + 1) % len);
    }

    /// Go back one image, wrapping to the last before the first.
    pub fn prev(&mut self) {
        self.step(|index, len| (index + len - 1) % len);
    }

    fn step(&mut self, advance: impl Fn(usize, usize) -> usize) {
        let Lightbox::Open { index } = self.lightbox else {
            return;
        };
        let len = self.filtered().len();
        if len == 0 {
            return;
        }
        self.lightbox = Lightbox::Open {
            index: advance(index.min(len - 1), len),
        };
    }

    /// Apply a keyboard key. Returns whether the key changed anything.
    ///
    /// Keys are ignored while the lightbox is closed.
    pub fn handle_key(&mut self, key: NavKey) -> bool {
        if !self.lightbox.is_open() {
            return false;
        }
        let before = self.lightbox;
        match key {
            NavKey::ArrowRight => self.next(),
            NavKey::ArrowLeft => self.prev(),
            NavKey::Escape => self.close(),
        }
        self.lightbox != before
    }

    /// The image shown by an open lightbox.
    pub fn slide(&self) -> Option<Slide<'c>> {
        let Lightbox::Open { index } = self.lightbox else {
            return None;
        };
        let images = self.filtered();
        let total = images.len();
        images.get(index).copied().map(|image| Slide {
            image,
            index,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{asset, captions};

    /// Records every scroll call so tests can check suspend/resume pairing.
    #[derive(Debug, Default)]
    struct RecordingScroll {
        calls: Vec<&'static str>,
    }

    impl ScrollLock for RecordingScroll {
        fn suspend_scroll(&mut self) {
            self.calls.push("suspend");
        }

        fn resume_scroll(&mut self) {
            self.calls.push("resume");
        }
    }

    fn scenario_catalog() -> Catalog {
        Catalog::from_assets(
            vec![
                asset(Category::Exterior, "E1"),
                asset(Category::Exterior, "E2"),
                asset(Category::Kitchen, "K1"),
            ],
            12,
        )
    }

    fn large_catalog() -> Catalog {
        let mut assets = Vec::new();
        for category in Category::ALL {
            for i in 1..=3 {
                assets.push(asset(category, &format!("{}{}", category.key(), i)));
            }
        }
        Catalog::from_assets(assets, 12)
    }

    fn open_index<S: ScrollLock>(view: &GalleryView<'_, S>) -> Option<usize> {
        match view.lightbox() {
            Lightbox::Open { index } => Some(index),
            Lightbox::Closed => None,
        }
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    #[test]
    fn starts_closed_on_all() {
        let catalog = scenario_catalog();
        let view = GalleryView::new(&catalog, ScrollState::default());
        assert_eq!(view.filter(), &CategoryFilter::All);
        assert_eq!(view.lightbox(), Lightbox::Closed);
        assert!(view.slide().is_none());
        assert!(!view.scroll().is_locked());
    }

    #[test]
    fn category_filter_returns_exact_bucket() {
        let catalog = large_catalog();
        let mut view = GalleryView::new(&catalog, ScrollState::default());
        for category in Category::ALL {
            view.select_category(category.key());
            let images = view.filtered();
            assert_eq!(images.len(), 3);
            assert!(images.iter().all(|a| a.category == category));
            let expected: Vec<&ImageAsset> = catalog.bucket(category).iter().collect();
            assert_eq!(images, expected);
        }
    }

    #[test]
    fn all_filter_caps_in_category_order() {
        let catalog = large_catalog();
        let view = GalleryView::new(&catalog, ScrollState::default());
        let images = view.filtered();
        assert_eq!(images.len(), 12);
        assert_eq!(
            captions(&images)[..4],
            ["exterior1", "exterior2", "exterior3", "living1"]
        );
        assert_eq!(captions(&images)[11], "bedrooms3");
    }

    #[test]
    fn all_filter_with_small_catalog_returns_total() {
        let catalog = scenario_catalog();
        let view = GalleryView::new(&catalog, ScrollState::default());
        assert_eq!(captions(&view.filtered()), vec!["E1", "E2", "K1"]);
    }

    #[test]
    fn unknown_category_is_empty_not_error() {
        let catalog = scenario_catalog();
        let mut view = GalleryView::new(&catalog, ScrollState::default());
        view.select_category("garage");
        assert_eq!(
            view.filter(),
            &CategoryFilter::Unmatched("garage".to_string())
        );
        assert!(view.filtered().is_empty());
    }

    #[test]
    fn filter_keys_and_labels() {
        assert_eq!(CategoryFilter::parse("ALL"), CategoryFilter::All);
        assert_eq!(CategoryFilter::All.key(), "all");
        assert_eq!(CategoryFilter::All.label(), "All");
        let features = CategoryFilter::parse("features");
        assert_eq!(features, CategoryFilter::Only(Category::Special));
        assert_eq!(features.key(), "special");
        assert_eq!(features.label(), "Features");
    }

    // =========================================================================
    // Lightbox navigation
    // =========================================================================

    #[test]
    fn next_cycles_back_to_start() {
        let catalog = large_catalog();
        let mut view = GalleryView::new(&catalog, ScrollState::default());
        let n = view.filtered().len();
        for start in 0..n {
            view.open_at(start);
            for _ in 0..n {
                view.next();
            }
            assert_eq!(open_index(&view), Some(start));
        }
    }

    #[test]
    fn prev_from_first_wraps_to_last() {
        let catalog = large_catalog();
        let mut view = GalleryView::new(&catalog, ScrollState::default());
        view.select_category("bathrooms");
        view.open_at(0);
        view.prev();
        assert_eq!(open_index(&view), Some(2));
    }

    #[test]
    fn each_next_advances_exactly_one() {
        let catalog = large_catalog();
        let mut view = GalleryView::new(&catalog, ScrollState::default());
        view.open_at(0);
        for expected in 1..5 {
            view.next();
            assert_eq!(open_index(&view), Some(expected));
        }
    }

    #[test]
    fn reopen_after_close_shows_new_index() {
        let catalog = large_catalog();
        let mut view = GalleryView::new(&catalog, ScrollState::default());
        view.open_at(4);
        view.close();
        view.open_at(7);
        let slide = view.slide().unwrap();
        assert_eq!(slide.index, 7);
        assert_eq!(slide.image, view.filtered()[7]);
    }

    #[test]
    fn out_of_range_open_clamps_to_zero() {
        let catalog = scenario_catalog();
        let mut view = GalleryView::new(&catalog, ScrollState::default());
        view.open_at(99);
        assert_eq!(open_index(&view), Some(0));
    }

    #[test]
    fn open_on_empty_list_stays_closed() {
        let catalog = scenario_catalog();
        let mut view = GalleryView::new(&catalog, RecordingScroll::default());
        view.select_category("suite");
        view.open_at(0);
        assert_eq!(view.lightbox(), Lightbox::Closed);
        assert!(view.scroll().calls.is_empty());
    }

    #[test]
    fn navigation_while_closed_is_ignored() {
        let catalog = scenario_catalog();
        let mut view = GalleryView::new(&catalog, ScrollState::default());
        view.next();
        view.prev();
        assert_eq!(view.lightbox(), Lightbox::Closed);
    }

    #[test]
    fn category_change_closes_lightbox() {
        let catalog = scenario_catalog();
        let mut view = GalleryView::new(&catalog, ScrollState::default());
        view.open_at(2);
        assert!(view.scroll().is_locked());
        view.select_category("kitchen");
        assert_eq!(view.lightbox(), Lightbox::Closed);
        assert!(!view.scroll().is_locked());
    }

    #[test]
    fn reselecting_same_category_keeps_lightbox_open() {
        let catalog = scenario_catalog();
        let mut view = GalleryView::new(&catalog, ScrollState::default());
        view.select_category("exterior");
        view.open_at(1);
        view.select_category("Exterior");
        assert_eq!(open_index(&view), Some(1));
    }

    // =========================================================================
    // Scroll lock
    // =========================================================================

    #[test]
    fn scroll_lock_pairs_with_open_and_close() {
        let catalog = scenario_catalog();
        let mut view = GalleryView::new(&catalog, RecordingScroll::default());
        view.open_at(0);
        view.open_at(1);
        view.next();
        view.close();
        view.close();
        assert_eq!(view.scroll().calls, vec!["suspend", "resume"]);
    }

    #[test]
    fn escape_releases_scroll_lock() {
        let catalog = scenario_catalog();
        let mut view = GalleryView::new(&catalog, RecordingScroll::default());
        view.open_at(0);
        assert!(view.handle_key(NavKey::Escape));
        assert_eq!(view.scroll().calls, vec!["suspend", "resume"]);
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    #[test]
    fn arrow_keys_navigate() {
        let catalog = scenario_catalog();
        let mut view = GalleryView::new(&catalog, ScrollState::default());
        view.open_at(0);
        assert!(view.handle_key(NavKey::ArrowRight));
        assert_eq!(open_index(&view), Some(1));
        assert!(view.handle_key(NavKey::ArrowLeft));
        assert!(view.handle_key(NavKey::ArrowLeft));
        assert_eq!(open_index(&view), Some(2));
    }

    #[test]
    fn keys_ignored_while_closed() {
        let catalog = scenario_catalog();
        let mut view = GalleryView::new(&catalog, ScrollState::default());
        assert!(!view.handle_key(NavKey::ArrowRight));
        assert!(!view.handle_key(NavKey::Escape));
        assert_eq!(view.lightbox(), Lightbox::Closed);
    }

    #[test]
    fn key_names_map_to_nav_keys() {
        assert_eq!(NavKey::from_key_name("ArrowLeft"), Some(NavKey::ArrowLeft));
        assert_eq!(NavKey::from_key_name("ArrowRight"), Some(NavKey::ArrowRight));
        assert_eq!(NavKey::from_key_name("Escape"), Some(NavKey::Escape));
        assert_eq!(NavKey::from_key_name("Enter"), None);
    }

    // =========================================================================
    // Slide display
    // =========================================================================

    #[test]
    fn slide_counter_is_one_based() {
        let catalog = large_catalog();
        let mut view = GalleryView::new(&catalog, ScrollState::default());
        view.open_at(2);
        let slide = view.slide().unwrap();
        assert_eq!(slide.position(), 3);
        assert_eq!(slide.counter(), "3 / 12");
        assert_eq!(slide.progress_percent(), 25.0);
    }

    #[test]
    fn kitchen_and_exterior_walkthrough() {
        let catalog = scenario_catalog();
        let mut view = GalleryView::new(&catalog, ScrollState::default());

        view.select_category("Kitchen");
        assert_eq!(captions(&view.filtered()), vec!["K1"]);

        view.open_at(0);
        let slide = view.slide().unwrap();
        assert_eq!(open_index(&view), Some(0));
        assert_eq!(slide.image.caption, "K1");
        assert_eq!(slide.counter(), "1 / 1");

        view.next();
        assert_eq!(open_index(&view), Some(0));

        view.select_category("Exterior");
        view.open_at(1);
        let slide = view.slide().unwrap();
        assert_eq!(open_index(&view), Some(1));
        assert_eq!(slide.image.caption, "E2");
        assert_eq!(slide.counter(), "2 / 2");

        view.prev();
        assert_eq!(open_index(&view), Some(0));
        assert_eq!(view.slide().unwrap().image.caption, "E1");
    }
}
