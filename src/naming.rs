//! `NNN-name` filename convention.
//!
//! Category directories and photo files may carry a numeric prefix that fixes
//! their order: `010-exterior/`, `003-rear-deck.jpg`. The prefix is optional;
//! unnumbered photos sort after numbered ones.
//!
//! Photo captions fall back to the name part of the filename, dashes turned
//! into spaces and the first letter capitalized:
//! `003-rear-deck-at-night.jpg` → "Rear deck at night".

/// A filename stem split into its order prefix and name.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Order prefix, if any (`3` for `003-rear-deck`).
    pub number: Option<u32>,
    /// Name after the prefix with dashes kept. Full input when unnumbered.
    pub name: String,
}

impl ParsedName {
    /// Name with dashes as spaces and a leading capital, or `None` if empty.
    pub fn caption(&self) -> Option<String> {
        let spaced = self.name.replace('-', " ");
        let spaced = spaced.trim();
        let mut chars = spaced.chars();
        let first = chars.next()?;
        Some(first.to_uppercase().chain(chars).collect())
    }
}

/// Split `stem` on the `NNN-` convention.
///
/// - `"010-exterior"` → number 10, name `"exterior"`
/// - `"003-rear-deck"` → number 3, name `"rear-deck"`
/// - `"007"` → number 7, empty name
/// - `"pool-house"` → no number, name `"pool-house"`
pub fn parse_entry_name(stem: &str) -> ParsedName {
    if let Some((prefix, rest)) = stem.split_once('-')
        && let Ok(number) = prefix.parse::<u32>()
    {
        return ParsedName {
            number: Some(number),
            name: rest.to_string(),
        };
    }
    if let Ok(number) = stem.parse::<u32>() {
        return ParsedName {
            number: Some(number),
            name: String::new(),
        };
    }
    ParsedName {
        number: None,
        name: stem.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_category_dir() {
        let p = parse_entry_name("010-exterior");
        assert_eq!(p.number, Some(10));
        assert_eq!(p.name, "exterior");
    }

    #[test]
    fn numbered_photo_with_dashes() {
        let p = parse_entry_name("003-rear-deck-at-night");
        assert_eq!(p.number, Some(3));
        assert_eq!(p.name, "rear-deck-at-night");
        assert_eq!(p.caption().as_deref(), Some("Rear deck at night"));
    }

    #[test]
    fn number_only() {
        let p = parse_entry_name("007");
        assert_eq!(p.number, Some(7));
        assert_eq!(p.name, "");
        assert_eq!(p.caption(), None);
    }

    #[test]
    fn trailing_dash_has_no_caption() {
        let p = parse_entry_name("007-");
        assert_eq!(p.number, Some(7));
        assert_eq!(p.caption(), None);
    }

    #[test]
    fn unnumbered_keeps_full_name() {
        let p = parse_entry_name("pool-house");
        assert_eq!(p.number, None);
        assert_eq!(p.name, "pool-house");
        assert_eq!(p.caption().as_deref(), Some("Pool house"));
    }

    #[test]
    fn non_numeric_prefix_is_not_a_number() {
        let p = parse_entry_name("v2-kitchen");
        assert_eq!(p.number, None);
        assert_eq!(p.name, "v2-kitchen");
    }

    #[test]
    fn zero_prefix() {
        let p = parse_entry_name("000-hero");
        assert_eq!(p.number, Some(0));
        assert_eq!(p.caption().as_deref(), Some("Hero"));
    }
}
