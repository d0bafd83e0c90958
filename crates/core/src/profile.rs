//! Site profiles: the persisted output of a discovery run.
//!
//! A [`SiteProfile`] serializes to the JSON consumed by the downstream
//! aggregation frontend, which is why the wire names are Portuguese while
//! the Rust fields are not.

use chrono::Local;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::discover::search::SearchLocator;

/// Selectors for extracting one item from a results page.
///
/// Only `container` is mandatory; every field selector is independently
/// absent-able and extraction degrades per field rather than failing the
/// record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSelectors {
    /// Repeating item pattern on the results page.
    pub container: String,
    #[serde(rename = "titulo")]
    pub title: Option<String>,
    #[serde(rename = "resumo")]
    pub summary: Option<String>,
    pub link: Option<String>,
    #[serde(rename = "imagem")]
    pub image: Option<String>,
    #[serde(rename = "data")]
    pub date: Option<String>,
}

/// A discovered site configuration, regenerated wholesale on re-discovery.
///
/// Created by [`SiteProfile::assemble`] with `verified: false`; only the
/// validator flips the flag after replaying the configuration end-to-end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteProfile {
    /// Display name shown in the feed, e.g. "Globo Portal".
    #[serde(rename = "nome")]
    pub name: String,
    /// Front page URL the profile was discovered from.
    #[serde(rename = "url")]
    pub site_url: String,
    /// Search URL with the probe term baked in.
    #[serde(rename = "busca")]
    pub search_url: String,
    /// Relative path of the site logo asset.
    #[serde(rename = "logo")]
    pub logo_path: String,
    /// Accent color used when rendering items from this site.
    #[serde(rename = "cor")]
    pub accent_color: String,
    pub selectors: ItemSelectors,
    #[serde(rename = "descoberto_automaticamente")]
    pub verified: bool,
    #[serde(rename = "data_analise")]
    pub discovered_at: String,
}

/// Fixed palette accent colors are drawn from. Collisions across sites
/// are acceptable.
pub const ACCENT_PALETTE: &[&str] = &[
    "#1e4a73", "#2c5f8a", "#2e7d32", "#ff9800", "#9c27b0", "#e74c3c", "#3f51b5", "#00bcd4", "#4caf50", "#ff5722",
    "#795548", "#607d8b",
];

impl SiteProfile {
    /// Combines the discovery results into one profile. No network access,
    /// no validation.
    ///
    /// The display name comes from the hostname (leading `www.` stripped,
    /// first label capitalized); the search URL renders the locator with
    /// the lowercased probe term; the accent color is a deterministic pick
    /// from [`ACCENT_PALETTE`] so re-discovery reproduces it.
    pub fn assemble(site_url: &Url, locator: &SearchLocator, selectors: ItemSelectors, probe_term: &str) -> Self {
        let label = site_label(site_url);

        Self {
            name: format!("{} Portal", label),
            site_url: site_url.to_string(),
            search_url: locator.query_url(&probe_term.to_lowercase()),
            logo_path: format!("assets/images/parceiros/{}.png", label.to_lowercase()),
            accent_color: accent_color(site_url).to_string(),
            selectors,
            verified: false,
            discovered_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// File-name slug: the display name's leading label, lowercased.
    pub fn slug(&self) -> String {
        self.name.split_whitespace().next().unwrap_or("site").to_lowercase()
    }
}

/// Derives the display label from a site URL's hostname.
fn site_label(site_url: &Url) -> String {
    let host = site_url.host_str().unwrap_or("");
    let host = host.strip_prefix("www.").unwrap_or(host);
    let label = host.split('.').next().unwrap_or(host);

    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Picks the accent color for a site by hashing its hostname into the
/// palette.
pub fn accent_color(site_url: &Url) -> &'static str {
    use std::hash::{DefaultHasher, Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    site_url.host_str().unwrap_or("").hash(&mut hasher);

    let index = (hasher.finish() % ACCENT_PALETTE.len() as u64) as usize;
    ACCENT_PALETTE[index]
}
