//! Line commands for walking the gallery from a terminal.
//!
//! `listing-showcase browse` reads one command per line from stdin and applies
//! it to a [`GalleryView`]:
//!
//! ```text
//! c <key>   select a category ("all", "kitchen", ...)
//! o <n>     open the lightbox at photo n (1-based)
//! n         next photo        (also: right)
//! p         previous photo    (also: left)
//! x         close the lightbox (also: esc)
//! l         list the categories
//! q         quit
//! ```

use crate::gallery::{GalleryView, NavKey, ScrollLock};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Select(String),
    /// One-based photo number as typed by the user.
    Open(usize),
    Key(NavKey),
    List,
    Quit,
}

impl BrowseCommand {
    /// Parse one input line. Returns `None` for blank or unrecognized input.
    pub fn parse(line: &str) -> Option<BrowseCommand> {
        let mut parts = line.split_whitespace();
        let command = parts.next()?.to_ascii_lowercase();
        let arg = parts.next();
        match (command.as_str(), arg) {
            ("c" | "category", Some(key)) => Some(BrowseCommand::Select(key.to_string())),
            ("o" | "open", Some(n)) => n.parse().ok().map(BrowseCommand::Open),
            ("n" | "next" | "right", None) => Some(BrowseCommand::Key(NavKey::ArrowRight)),
            ("p" | "prev" | "left", None) => Some(BrowseCommand::Key(NavKey::ArrowLeft)),
            ("x" | "close" | "esc", None) => Some(BrowseCommand::Key(NavKey::Escape)),
            ("l" | "list", None) => Some(BrowseCommand::List),
            ("q" | "quit", None) => Some(BrowseCommand::Quit),
            _ => None,
        }
    }

    /// Apply the command to `view`. `List` and `Quit` leave it untouched.
    pub fn apply<S: ScrollLock>(&self, view: &mut GalleryView<'_, S>) {
        match self {
            BrowseCommand::Select(key) => view.select_category(key),
            // 0 wraps to usize::MAX, which the view clamps to the first photo.
            BrowseCommand::Open(n) => view.open_at(n.wrapping_sub(1)),
            BrowseCommand::Key(key) => {
                view.handle_key(*key);
            }
            BrowseCommand::List | BrowseCommand::Quit => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Category};
    use crate::gallery::{Lightbox, ScrollState};
    use crate::test_helpers::asset;

    #[test]
    fn parse_commands() {
        assert_eq!(
            BrowseCommand::parse("c kitchen"),
            Some(BrowseCommand::Select("kitchen".to_string()))
        );
        assert_eq!(BrowseCommand::parse("o 3"), Some(BrowseCommand::Open(3)));
        assert_eq!(
            BrowseCommand::parse(" N "),
            Some(BrowseCommand::Key(NavKey::ArrowRight))
        );
        assert_eq!(
            BrowseCommand::parse("left"),
            Some(BrowseCommand::Key(NavKey::ArrowLeft))
        );
        assert_eq!(
            BrowseCommand::parse("esc"),
            Some(BrowseCommand::Key(NavKey::Escape))
        );
        assert_eq!(BrowseCommand::parse("q"), Some(BrowseCommand::Quit));
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!(BrowseCommand::parse(""), None);
        assert_eq!(BrowseCommand::parse("c"), None);
        assert_eq!(BrowseCommand::parse("o two"), None);
        assert_eq!(BrowseCommand::parse("n 2"), None);
        assert_eq!(BrowseCommand::parse("jump"), None);
    }

    #[test]
    fn open_is_one_based_and_zero_clamps() {
        let catalog = Catalog::from_assets(
            vec![asset(Category::Exterior, "E1"), asset(Category::Exterior, "E2")],
            12,
        );
        let mut view = GalleryView::new(&catalog, ScrollState::default());
        BrowseCommand::Open(2).apply(&mut view);
        assert_eq!(view.lightbox(), Lightbox::Open { index: 1 });
        BrowseCommand::Key(NavKey::Escape).apply(&mut view);
        BrowseCommand::Open(0).apply(&mut view);
        assert_eq!(view.lightbox(), Lightbox::Open { index: 0 });
    }

    #[test]
    fn select_then_navigate() {
        let catalog = Catalog::from_assets(
            vec![
                asset(Category::Exterior, "E1"),
                asset(Category::Kitchen, "K1"),
                asset(Category::Kitchen, "K2"),
            ],
            12,
        );
        let mut view = GalleryView::new(&catalog, ScrollState::default());
        for line in ["c kitchen", "o 1", "p"] {
            BrowseCommand::parse(line).unwrap().apply(&mut view);
        }
        assert_eq!(view.slide().unwrap().image.caption, "K2");
    }
}
