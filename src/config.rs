//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the content root next to `listing.toml`; every key is optional and falls
//! back to the stock default.
//!
//! ## Configuration Options
//!
//! ```toml
//! [site]
//! title = "131 Grosvenor Avenue"   # <title> override (defaults to the street)
//! language = "en"
//!
//! [gallery]
//! all_limit = 12                   # Photos shown by the "All" filter
//! motion = "enhanced"              # baseline | enhanced | optimized
//!
//! [colors]
//! background = "#111111"
//! text = "#f5f1e8"
//! muted = "#9a958c"
//! accent = "#c9a227"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub site: SiteSection,
    pub gallery: GalleryConfig,
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gallery.all_limit == 0 {
            return Err(ConfigError::Validation(
                "gallery.all_limit must be at least 1".into(),
            ));
        }
        if self.site.language.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.language must not be empty".into(),
            ));
        }
        for (name, value) in self.colors.entries() {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "colors.{name} must not be empty"
                )));
            }
        }
        Ok(())
    }
}

/// Document-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Page title. When absent the listing's street address is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// `lang` attribute of the generated pages.
    pub language: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: None,
            language: "en".to_string(),
        }
    }
}

/// How much motion the presentation layer may use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionFidelity {
    /// Fades only.
    Baseline,
    /// Full transitions.
    #[default]
    Enhanced,
    /// Transitions limited to transforms and opacity.
    Optimized,
}

impl MotionFidelity {
    pub fn as_str(self) -> &'static str {
        match self {
            MotionFidelity::Baseline => "baseline",
            MotionFidelity::Enhanced => "enhanced",
            MotionFidelity::Optimized => "optimized",
        }
    }
}

/// Gallery section settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Number of photos in the "All" view.
    pub all_limit: usize,
    pub motion: MotionFidelity,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            all_limit: crate::catalog::DEFAULT_ALL_LIMIT,
            motion: MotionFidelity::default(),
        }
    }
}

/// Site palette. The showcase is dark-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub background: String,
    pub text: String,
    /// Secondary text: captions, counters, fact labels.
    pub muted: String,
    /// Highlight color for active filters, links and the progress bar.
    pub accent: String,
}

impl ColorConfig {
    fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("background", &self.background),
            ("text", &self.text),
            ("muted", &self.muted),
            ("accent", &self.accent),
        ]
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#111111".to_string(),
            text: "#f5f1e8".to_string(),
            muted: "#9a958c".to_string(),
            accent: "#c9a227".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key by key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value, if present.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto `base`, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the content root.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(root)?)
}

/// Fully-commented stock `config.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Listing Showcase Configuration
# ==============================
# All settings are optional. Values shown are the defaults.
# Place this file next to listing.toml in the content directory.
# Unknown keys will cause an error.

[site]
# Page title. Defaults to the listing's street address.
# title = "131 Grosvenor Avenue"

# lang attribute of the generated pages.
language = "en"

[gallery]
# Number of photos shown by the "All" filter. Photos are taken in category
# order: exterior, living, kitchen, bedrooms, bathrooms, special, outdoor,
# suite, details.
all_limit = 12

# Motion fidelity of the generated pages: baseline, enhanced or optimized.
motion = "enhanced"

[colors]
background = "#111111"
text = "#f5f1e8"
muted = "#9a958c"    # Captions, counters, fact labels
accent = "#c9a227"   # Active filter, links, progress bar
"##
}

/// Generate CSS custom properties from the palette.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {background};
    --color-text: {text};
    --color-muted: {muted};
    --color-accent: {accent};
}}"#,
        background = colors.background,
        text = colors.text,
        muted = colors.muted,
        accent = colors.accent,
    )
}
