//! Property facts read from `listing.toml`.
//!
//! ```toml
//! headline = "Capitol Hill's most cinematic view residence."
//! tagline = "Sweeping views of downtown, water and mountains."
//! price = 3188000
//! beds = 7
//! baths = 7
//! sqft = 3587
//! lot_size = "33 x 122 ft (4,026 sq ft)"
//! year_built = 2025
//! mls = "R3069844"
//! highlights = ["Chef's kitchen", "Legal 2-bedroom suite"]
//!
//! [address]
//! street = "131 Grosvenor Avenue"
//! neighborhood = "Capitol Hill"
//! city = "Burnaby"
//! province = "BC"
//!
//! [open_house]
//! date = "Saturday Nov 29"
//! time = "2:00 PM – 4:00 PM"
//!
//! [agent]
//! name = "Jane Agent"
//! phone = "(604) 555-0100"
//! email = "jane@example.com"
//!
//! [[features]]
//! title = "Kitchen"
//! items = ["Miele appliances", "Waterfall island"]
//! ```
//!
//! A longer description can live in `description.md`, which takes priority
//! over the inline `description` key.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const LISTING_FILE: &str = "listing.toml";

#[derive(Error, Debug)]
pub enum ListingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("No listing.toml found in {}", .0.display())]
    Missing(PathBuf),
    #[error("Listing validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Listing {
    pub headline: String,
    #[serde(default)]
    pub tagline: String,
    pub address: Address,
    /// Asking price in whole currency units.
    pub price: u64,
    pub beds: u32,
    pub baths: u32,
    pub sqft: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lot_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_built: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mls: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heating: Option<String>,
    /// Markdown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<FeatureGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_house: Option<OpenHouse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<Agent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Address {
    pub street: String,
    #[serde(default)]
    pub neighborhood: String,
    pub city: String,
    pub province: String,
}

impl Address {
    /// `"131 Grosvenor Avenue, Capitol Hill, Burnaby, BC"`, skipping empty parts.
    pub fn full(&self) -> String {
        [
            self.street.as_str(),
            self.neighborhood.as_str(),
            self.city.as_str(),
            self.province.as_str(),
        ]
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureGroup {
    pub title: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpenHouse {
    pub date: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Agent {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brokerage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Network name → profile URL, e.g. `instagram = "https://..."`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub social: BTreeMap<String, String>,
}

impl Listing {
    pub fn validate(&self) -> Result<(), ListingError> {
        if self.headline.trim().is_empty() {
            return Err(ListingError::Validation("headline must not be empty".into()));
        }
        if self.address.street.trim().is_empty() {
            return Err(ListingError::Validation(
                "address.street must not be empty".into(),
            ));
        }
        if let Some(group) = self.features.iter().find(|g| g.title.trim().is_empty()) {
            return Err(ListingError::Validation(format!(
                "feature group with items {:?} has no title",
                group.items
            )));
        }
        Ok(())
    }

    /// `"$3,188,000"`.
    pub fn price_formatted(&self) -> String {
        format!("${}", group_thousands(self.price))
    }

    /// `"3,587 sq ft"`.
    pub fn sqft_formatted(&self) -> String {
        format!("{} sq ft", group_thousands(u64::from(self.sqft)))
    }

    /// `"7 beds · 7 baths · 3,587 sq ft"`.
    pub fn summary(&self) -> String {
        format!(
            "{} {} · {} {} · {}",
            self.beds,
            plural(self.beds, "bed", "beds"),
            self.baths,
            plural(self.baths, "bath", "baths"),
            self.sqft_formatted()
        )
    }

    /// Labelled facts for the details table, in display order.
    pub fn facts(&self) -> Vec<(&'static str, String)> {
        let mut facts = vec![
            ("Price", self.price_formatted()),
            ("Bedrooms", self.beds.to_string()),
            ("Bathrooms", self.baths.to_string()),
            ("Floor Area", self.sqft_formatted()),
        ];
        let optional = [
            ("Lot Size", self.lot_size.clone()),
            ("Year Built", self.year_built.map(|y| y.to_string())),
            ("MLS®", self.mls.clone()),
            ("Taxes", self.taxes.clone()),
            ("Heating", self.heating.clone()),
        ];
        facts.extend(
            optional
                .into_iter()
                .filter_map(|(label, value)| value.map(|v| (label, v))),
        );
        facts
    }
}

fn plural(n: u32, one: &'static str, many: &'static str) -> &'static str {
    if n == 1 { one } else { many }
}

/// Insert `,` between groups of three digits.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Load and validate `listing.toml`, applying `description.md` if present.
pub fn load_listing(root: &Path) -> Result<Listing, ListingError> {
    let path = root.join(LISTING_FILE);
    if !path.exists() {
        return Err(ListingError::Missing(root.to_path_buf()));
    }
    let content = fs::read_to_string(&path)?;
    let mut listing: Listing = toml::from_str(&content)?;

    let description_path = root.join("description.md");
    if description_path.exists() {
        let description = fs::read_to_string(&description_path)?;
        if !description.trim().is_empty() {
            listing.description = Some(description);
        }
    }

    listing.validate()?;
    Ok(listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_listing;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"
headline = "A view home"
price = 950000
beds = 1
baths = 1
sqft = 720

[address]
street = "5 Short St"
city = "Burnaby"
province = "BC"
"#;

    #[test]
    fn group_thousands_inserts_commas() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(3188000), "3,188,000");
    }

    #[test]
    fn formatted_price_and_area() {
        let listing = sample_listing();
        assert_eq!(listing.price_formatted(), "$3,188,000");
        assert_eq!(listing.sqft_formatted(), "3,587 sq ft");
        assert_eq!(listing.summary(), "7 beds · 7 baths · 3,587 sq ft");
    }

    #[test]
    fn summary_uses_singular() {
        let listing: Listing = toml::from_str(MINIMAL).unwrap();
        assert_eq!(listing.summary(), "1 bed · 1 bath · 720 sq ft");
    }

    #[test]
    fn full_address_skips_empty_parts() {
        let listing: Listing = toml::from_str(MINIMAL).unwrap();
        assert_eq!(listing.address.full(), "5 Short St, Burnaby, BC");
        assert_eq!(
            sample_listing().address.full(),
            "131 Grosvenor Avenue, Capitol Hill, Burnaby, BC"
        );
    }

    #[test]
    fn facts_include_only_present_optionals() {
        let listing: Listing = toml::from_str(MINIMAL).unwrap();
        let labels: Vec<&str> = listing.facts().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["Price", "Bedrooms", "Bathrooms", "Floor Area"]);

        let full = sample_listing();
        let facts = full.facts();
        assert!(facts.contains(&("Year Built", "2025".to_string())));
        assert!(facts.contains(&("MLS®", "R3069844".to_string())));
    }

    #[test]
    fn load_listing_missing_file() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            load_listing(tmp.path()),
            Err(ListingError::Missing(_))
        ));
    }

    #[test]
    fn load_listing_reads_description_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(LISTING_FILE), MINIMAL).unwrap();
        fs::write(tmp.path().join("description.md"), "Bright and **quiet**.").unwrap();
        let listing = load_listing(tmp.path()).unwrap();
        assert_eq!(listing.description.as_deref(), Some("Bright and **quiet**."));
    }

    #[test]
    fn unknown_key_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(LISTING_FILE), format!("bedz = 3\n{MINIMAL}")).unwrap();
        assert!(matches!(load_listing(tmp.path()), Err(ListingError::Toml(_))));
    }

    #[test]
    fn blank_headline_fails_validation() {
        let mut listing = sample_listing();
        listing.headline = "  ".to_string();
        assert!(matches!(
            listing.validate(),
            Err(ListingError::Validation(_))
        ));
    }
}
