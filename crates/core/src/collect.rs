//! Item collection: applying stored profiles to live results pages.
//!
//! This is the steady-state scraping path. It reuses the selectors chosen
//! at discovery time with plain first-match lookups, no scoring; all
//! heuristics stay in [`crate::discover`].

use chrono::Local;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::parse::{Document, Element, clean_text};
use crate::profile::SiteProfile;
use crate::{FaroError, Result};

#[cfg(feature = "fetch")]
use crate::fetch::Fetcher;

/// Default per-site item cap, bounding load on the aggregation step.
pub const DEFAULT_MAX_ITEMS: usize = 5;

/// Default cap across the whole aggregated feed.
pub const DEFAULT_FEED_CAP: usize = 15;

const SUMMARY_MAX_CHARS: usize = 250;
const FALLBACK_SUMMARY_MAX_CHARS: usize = 150;
const ELLIPSIS: &str = "...";
const TODAY_LABEL: &str = "Hoje";

/// One normalized news item, fully derived from a profile plus a live
/// results document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "resumo")]
    pub summary: String,
    pub link: String,
    #[serde(rename = "imagem")]
    pub image_url: String,
    #[serde(rename = "data")]
    pub published_label: String,
    #[serde(rename = "fonte")]
    pub source_name: String,
    #[serde(rename = "corFonte")]
    pub source_color: String,
    #[serde(rename = "logoFonte")]
    pub source_logo: String,
    #[serde(rename = "coletadoEm")]
    pub collected_at: String,
}

/// The aggregated feed consumed by the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feed {
    #[serde(rename = "ultimaAtualizacao")]
    pub updated_at: String,
    #[serde(rename = "totalNoticias")]
    pub total_items: usize,
    #[serde(rename = "portaisConsultados")]
    pub sites_consulted: usize,
    #[serde(rename = "noticias")]
    pub items: Vec<NewsItem>,
}

impl Feed {
    /// Wraps collected items into a feed, capping at `cap` items.
    pub fn new(mut items: Vec<NewsItem>, sites_consulted: usize, cap: usize) -> Self {
        items.truncate(cap);

        Self {
            updated_at: Local::now().to_rfc3339(),
            total_items: items.len(),
            sites_consulted,
            items,
        }
    }
}

/// Extracts items from a parsed results page using a stored profile.
///
/// At most `max_items` container nodes are inspected; a node that yields
/// no usable title and link is skipped silently, so the returned list can
/// be shorter. Fields resolve via first-match lookups with the selectors
/// chosen at discovery time.
pub fn collect_items(profile: &SiteProfile, doc: &Document, max_items: usize) -> Result<Vec<NewsItem>> {
    let base = match doc.base_url() {
        Some(url) => url.clone(),
        None => Url::parse(&profile.site_url).map_err(|e| FaroError::InvalidUrl(e.to_string()))?,
    };

    let containers = doc.select(&profile.selectors.container)?;
    let mut items = Vec::new();

    for container in containers.into_iter().take(max_items) {
        if let Some(item) = extract_item(profile, &container, &base)? {
            items.push(item);
        }
    }

    Ok(items)
}

/// Fetches a profile's search URL and extracts items from it.
#[cfg(feature = "fetch")]
pub async fn collect_site(fetcher: &Fetcher, profile: &SiteProfile, max_items: usize) -> Result<Vec<NewsItem>> {
    let body = fetcher.get(&profile.search_url).await?;
    let doc = Document::parse_with_url(&body, &profile.site_url)?;

    collect_items(profile, &doc, max_items)
}

fn extract_item(profile: &SiteProfile, container: &Element, base: &Url) -> Result<Option<NewsItem>> {
    let selectors = &profile.selectors;

    let title = match &selectors.title {
        Some(sel) => container.select_one(sel)?.map(|el| clean_text(&el.text())),
        None => None,
    };
    let link = match &selectors.link {
        Some(sel) => container.select_one(sel)?.and_then(|el| el.attr("href").map(str::to_string)),
        None => None,
    };

    // Minimum viable item: a headline and somewhere to go.
    let (Some(title), Some(link)) = (title, link) else {
        return Ok(None);
    };
    if title.is_empty() || link.is_empty() {
        return Ok(None);
    }

    let summary = match &selectors.summary {
        Some(sel) => container.select_one(sel)?.map(|el| clean_text(&el.text())),
        None => None,
    };
    let summary = match summary {
        Some(text) if !text.is_empty() => truncate_chars(&text, SUMMARY_MAX_CHARS),
        _ => truncate_chars(&title, FALLBACK_SUMMARY_MAX_CHARS),
    };

    let image = match &selectors.image {
        Some(sel) => container.select_one(sel)?.and_then(|el| {
            el.attr("src")
                .filter(|src| !src.is_empty())
                .or_else(|| el.attr("data-src").filter(|src| !src.is_empty()))
                .map(str::to_string)
        }),
        None => None,
    };
    let image_url = match image {
        Some(src) => resolve_url(&src, base),
        None => placeholder_image(&profile.accent_color, &profile.name),
    };

    let published_label = match &selectors.date {
        Some(sel) => container
            .select_one(sel)?
            .map(|el| clean_text(&el.text()))
            .filter(|text| !text.is_empty()),
        None => None,
    };

    Ok(Some(NewsItem {
        title,
        summary,
        link: resolve_url(&link, base),
        image_url,
        published_label: published_label.unwrap_or_else(|| TODAY_LABEL.to_string()),
        source_name: profile.name.clone(),
        source_color: profile.accent_color.clone(),
        source_logo: profile.logo_path.clone(),
        collected_at: Local::now().to_rfc3339(),
    }))
}

/// Resolves a possibly-relative URL against the site base, falling back to
/// the base itself when resolution fails.
fn resolve_url(raw: &str, base: &Url) -> String {
    match base.join(raw) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => base.to_string(),
    }
}

/// Truncates to `max_chars` characters, marking the cut with an ellipsis.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let cut: String = text.chars().take(max_chars).collect();
    format!("{}{}", cut, ELLIPSIS)
}

/// Builds the generated-image URL used when a site yields no image.
fn placeholder_image(color: &str, name: &str) -> String {
    format!(
        "https://via.placeholder.com/400x300/{}/ffffff?text={}",
        color.trim_start_matches('#'),
        name.replace(' ', "+")
    )
}
