pub mod collect;
pub mod discover;
pub mod error;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod parse;
pub mod preprocess;
pub mod profile;
pub mod store;

#[cfg(feature = "fetch")]
pub use collect::collect_site;
pub use collect::{DEFAULT_FEED_CAP, DEFAULT_MAX_ITEMS, Feed, NewsItem, collect_items};
#[cfg(feature = "fetch")]
pub use discover::SiteAnalyzer;
pub use discover::{
    ContainerMatch, DEFAULT_PROBE_TERM, FieldKind, LocatorOrigin, Method, SearchLocator, has_results, locate_search,
    profile_extracts, resolve_field, resolve_selectors, select_container,
};
pub use error::{FaroError, Result};
#[cfg(feature = "fetch")]
pub use fetch::{FetchConfig, Fetcher};
pub use parse::{Document, Element, clean_text};
pub use preprocess::strip_hidden;
pub use profile::{ACCENT_PALETTE, ItemSelectors, SiteProfile, accent_color};
pub use store::{DiscoveryRollup, FEED_FILE, ProfileStore, ROLLUP_FILE};
