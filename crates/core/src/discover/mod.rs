//! Selector discovery: working out how to search a site and how to read
//! its results.
//!
//! Discovery runs in stages. The front page yields a [`SearchLocator`],
//! a probe confirms the search actually returns results, then container
//! election and field resolution turn the results page into an
//! [`ItemSelectors`] set ready to be stored as a profile.

pub mod containers;
pub mod fields;
pub mod patterns;
pub mod search;
pub mod validate;

pub use containers::{ContainerMatch, select_container};
pub use fields::resolve_field;
pub use patterns::FieldKind;
pub use search::{LocatorOrigin, Method, SearchLocator, has_results, locate_search};
pub use validate::profile_extracts;
#[cfg(feature = "fetch")]
pub use validate::validate;

use crate::Result;
use crate::parse::{Document, Element};
use crate::profile::ItemSelectors;

#[cfg(feature = "fetch")]
use url::Url;

#[cfg(feature = "fetch")]
use crate::FaroError;
#[cfg(feature = "fetch")]
use crate::fetch::Fetcher;
#[cfg(feature = "fetch")]
use crate::profile::SiteProfile;

/// Search term used to probe sites when the caller does not supply one.
pub const DEFAULT_PROBE_TERM: &str = "notícias";

/// Runs the selector-side half of discovery on an already-parsed page.
///
/// This is the offline core of [`SiteAnalyzer::analyze`]: no fetching and
/// no search probing, just container election plus field resolution on
/// the winner's first node.
pub fn resolve_selectors(doc: &Document) -> Result<ItemSelectors> {
    let found = select_container(doc)?;
    let node = &found.items[0];

    Ok(ItemSelectors {
        container: found.pattern.to_string(),
        title: resolve(node, FieldKind::Title)?,
        summary: resolve(node, FieldKind::Summary)?,
        link: resolve(node, FieldKind::Link)?,
        image: resolve(node, FieldKind::Image)?,
        date: resolve(node, FieldKind::Date)?,
    })
}

fn resolve(node: &Element, kind: FieldKind) -> Result<Option<String>> {
    Ok(resolve_field(node, kind)?.map(str::to_string))
}

/// End-to-end discovery over a live site.
#[cfg(feature = "fetch")]
pub struct SiteAnalyzer {
    fetcher: Fetcher,
    probe_term: String,
    validate_after: bool,
}

#[cfg(feature = "fetch")]
impl SiteAnalyzer {
    /// Creates an analyzer probing with [`DEFAULT_PROBE_TERM`].
    pub fn new(fetcher: Fetcher) -> Self {
        Self::with_probe_term(fetcher, DEFAULT_PROBE_TERM)
    }

    /// Creates an analyzer probing with a caller-chosen term.
    pub fn with_probe_term(fetcher: Fetcher, probe_term: impl Into<String>) -> Self {
        Self {
            fetcher,
            probe_term: probe_term.into(),
            validate_after: true,
        }
    }

    /// Disables the verification pass that normally runs after assembly.
    pub fn without_validation(mut self) -> Self {
        self.validate_after = false;
        self
    }

    pub fn probe_term(&self) -> &str {
        &self.probe_term
    }

    /// Discovers a full profile for `url`.
    ///
    /// Stages: fetch the front page, locate a search mechanism (falling
    /// back to URL template probing), probe the search with the
    /// configured term, elect a container and resolve field selectors on
    /// the results, assemble the profile, then verify it. A failed
    /// verification marks the profile unverified instead of aborting.
    pub async fn analyze(&self, url: &str) -> Result<SiteProfile> {
        let base = Url::parse(url).map_err(|e| FaroError::InvalidUrl(e.to_string()))?;
        let front = self.fetcher.get(url).await?;

        let locator = {
            let doc = Document::parse(&front)?;
            locate_search(&doc, &base)?
        };
        let locator = match locator {
            Some(locator) => locator,
            None => search::probe_url_templates(&self.fetcher, &base)
                .await
                .ok_or_else(|| FaroError::SearchNotFound(url.to_string()))?,
        };

        let results = search::probe_search(&self.fetcher, &locator, &self.probe_term).await?;
        let selectors = {
            let doc = Document::parse(&results)?;
            resolve_selectors(&doc)?
        };

        let mut profile = SiteProfile::assemble(&base, &locator, selectors, &self.probe_term);
        if self.validate_after {
            profile.verified = validate::validate(&self.fetcher, &profile).await?;
        }

        Ok(profile)
    }
}
