//! Post-discovery verification of a stored profile.

use crate::parse::{Document, clean_text};
use crate::profile::SiteProfile;

#[cfg(feature = "fetch")]
use crate::fetch::Fetcher;
#[cfg(feature = "fetch")]
use crate::{FaroError, Result};

/// Checks that a profile's selectors still produce a usable first item
/// on a results page.
///
/// Verification is intentionally shallow: at least one container, and a
/// non-empty title plus a populated link on the first one. Anything less
/// and the profile is reported as broken rather than degraded.
pub fn profile_extracts(profile: &SiteProfile, doc: &Document) -> bool {
    let selectors = &profile.selectors;
    let (Some(title_sel), Some(link_sel)) = (&selectors.title, &selectors.link) else {
        return false;
    };

    let Ok(containers) = doc.select(&selectors.container) else {
        return false;
    };
    let Some(first) = containers.first() else {
        return false;
    };

    let title_ok = matches!(
        first.select_one(title_sel),
        Ok(Some(el)) if !clean_text(&el.text()).is_empty()
    );
    let link_ok = matches!(
        first.select_one(link_sel),
        Ok(Some(el)) if el.attr("href").is_some_and(|href| !href.is_empty())
    );

    title_ok && link_ok
}

/// Fetches a profile's search URL and verifies it end to end.
///
/// Network failures and non-success statuses report `Ok(false)`, the
/// same verdict as a page the selectors no longer match. Only local
/// faults, a malformed stored URL for instance, surface as errors.
#[cfg(feature = "fetch")]
pub async fn validate(fetcher: &Fetcher, profile: &SiteProfile) -> Result<bool> {
    let body = match fetcher.get(&profile.search_url).await {
        Ok(body) => body,
        Err(FaroError::HttpError(_) | FaroError::Timeout { .. } | FaroError::HttpStatus { .. }) => {
            return Ok(false);
        }
        Err(e) => return Err(e),
    };
    let doc = Document::parse(&body)?;

    Ok(profile_extracts(profile, &doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ItemSelectors;

    fn profile() -> SiteProfile {
        SiteProfile {
            name: "Gazeta Portal".to_string(),
            site_url: "https://gazeta.test/".to_string(),
            search_url: "https://gazeta.test/?s=notícias".to_string(),
            logo_path: "assets/images/parceiros/gazeta.png".to_string(),
            accent_color: "#1e4a73".to_string(),
            selectors: ItemSelectors {
                container: "article".to_string(),
                title: Some("h2 a".to_string()),
                summary: None,
                link: Some("h2 a".to_string()),
                image: None,
                date: None,
            },
            verified: false,
            discovered_at: "2026-08-01 09:00:00".to_string(),
        }
    }

    #[test]
    fn test_accepts_page_with_usable_first_item() {
        let html = r#"<html><body>
            <article><h2><a href="/n/1">Manchete de verificação</a></h2></article>
            <article><h2><a href="/n/2">Outra manchete</a></h2></article>
        </body></html>"#;
        let doc = Document::parse(html).unwrap();

        assert!(profile_extracts(&profile(), &doc));
    }

    #[test]
    fn test_rejects_page_without_containers() {
        let doc = Document::parse("<html><body><div>nada aqui</div></body></html>").unwrap();

        assert!(!profile_extracts(&profile(), &doc));
    }

    #[test]
    fn test_rejects_first_item_without_link() {
        let html = r#"<html><body>
            <article><h2><a>Manchete sem destino</a></h2></article>
        </body></html>"#;
        let doc = Document::parse(html).unwrap();

        assert!(!profile_extracts(&profile(), &doc));
    }

    #[test]
    fn test_rejects_empty_href() {
        let html = r#"<html><body>
            <article><h2><a href="">Manchete com link vazio</a></h2></article>
        </body></html>"#;
        let doc = Document::parse(html).unwrap();

        assert!(!profile_extracts(&profile(), &doc));
    }

    #[test]
    fn test_rejects_whitespace_title() {
        let html = r#"<html><body>
            <article><h2><a href="/n/1">   </a></h2></article>
        </body></html>"#;
        let doc = Document::parse(html).unwrap();

        assert!(!profile_extracts(&profile(), &doc));
    }

    #[test]
    fn test_rejects_profile_missing_selectors() {
        let mut p = profile();
        p.selectors.link = None;

        let html = r#"<html><body>
            <article><h2><a href="/n/1">Manchete completa</a></h2></article>
        </body></html>"#;
        let doc = Document::parse(html).unwrap();

        assert!(!profile_extracts(&p, &doc));
    }

    #[test]
    fn test_rejects_invalid_stored_selector() {
        let mut p = profile();
        p.selectors.container = "[[broken".to_string();

        let doc = Document::parse("<html><body><article></article></body></html>").unwrap();

        assert!(!profile_extracts(&p, &doc));
    }
}
