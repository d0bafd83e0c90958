//! Search entry point discovery and query probing.
//!
//! [`locate_search`] walks the ranked pattern list against a parsed front
//! page and needs no network access. [`probe_url_templates`] and
//! [`probe_search`] issue requests and are only available with the `fetch`
//! feature.

use std::fmt;

use url::Url;

use crate::discover::patterns::{self, PatternKind};
use crate::parse::{Document, Element};
use crate::{Result, preprocess};

#[cfg(feature = "fetch")]
use crate::FaroError;
#[cfg(feature = "fetch")]
use crate::fetch::Fetcher;

/// HTTP method for submitting a search query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// How a search locator was established.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocatorOrigin {
    /// A search form matched directly.
    Form,
    /// A bare query input matched; the enclosing form supplied the rest.
    Input,
    /// No markup matched; a conventional URL template answered a probe.
    UrlGuess,
}

/// A site's discovered search entry point.
///
/// Produced once per site and immutable afterwards. The endpoint is always
/// absolute.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchLocator {
    /// Absolute URL queries are submitted to.
    pub endpoint: String,
    /// Name of the query field.
    pub field_name: String,
    /// Submission method.
    pub method: Method,
    /// How this locator was found.
    pub origin: LocatorOrigin,
}

impl SearchLocator {
    /// Renders the URL that submits `term` through this locator.
    ///
    /// GET endpoints that already carry a `?` get the term appended
    /// directly (URL-template endpoints end in `=`); otherwise the query
    /// field is added. POST endpoints are returned unchanged, since the
    /// term travels in the request body.
    pub fn query_url(&self, term: &str) -> String {
        match self.method {
            Method::Post => self.endpoint.clone(),
            Method::Get => {
                if self.endpoint.contains('?') {
                    format!("{}{}", self.endpoint, term)
                } else {
                    format!("{}?{}={}", self.endpoint, self.field_name, term)
                }
            }
        }
    }
}

/// Finds a site's search entry point in its front page markup.
///
/// Walks [`patterns::SEARCH_PATTERNS`] in order and returns the first
/// pattern that yields a usable locator. A matched form without a
/// recognizable query input, or a matched input outside any form, is
/// skipped and the walk continues.
///
/// Returns `Ok(None)` when the whole list is exhausted; callers then fall
/// back to [`probe_url_templates`].
pub fn locate_search(doc: &Document, base_url: &Url) -> Result<Option<SearchLocator>> {
    for pattern in patterns::SEARCH_PATTERNS {
        let matches = doc.select(pattern.selector)?;
        let Some(element) = matches.first() else {
            continue;
        };

        let locator = match pattern.kind {
            PatternKind::Form => locate_in_form(element, base_url)?,
            PatternKind::Input => locate_from_input(element, base_url),
        };

        if locator.is_some() {
            return Ok(locator);
        }
    }

    Ok(None)
}

fn locate_in_form(form: &Element, base_url: &Url) -> Result<Option<SearchLocator>> {
    let Some(input) = form.select_one(patterns::FORM_INPUT_SELECTOR)? else {
        return Ok(None);
    };

    let field_name = input.attr("name").unwrap_or(patterns::DEFAULT_QUERY_FIELD).to_string();

    Ok(locator_from_form(form, base_url, field_name, LocatorOrigin::Form))
}

fn locate_from_input(input: &Element, base_url: &Url) -> Option<SearchLocator> {
    let form = input.enclosing_form()?;
    let field_name = input.attr("name").unwrap_or(patterns::DEFAULT_QUERY_FIELD).to_string();

    locator_from_form(&form, base_url, field_name, LocatorOrigin::Input)
}

fn locator_from_form(
    form: &Element, base_url: &Url, field_name: String, origin: LocatorOrigin,
) -> Option<SearchLocator> {
    let action = form.attr("action").unwrap_or("");

    let endpoint = if action.is_empty() {
        base_url.to_string()
    } else {
        base_url.join(action).ok()?.to_string()
    };

    let method = match form.attr("method") {
        Some(m) if m.eq_ignore_ascii_case("post") => Method::Post,
        _ => Method::Get,
    };

    Some(SearchLocator { endpoint, field_name, method, origin })
}

/// Decides whether a fetched search page looks like it has results.
///
/// Case-insensitive: accepts when the visible page text contains the probe
/// term itself or one of the generic result markers. Script and style
/// content is stripped first so a term echoed into page JavaScript does
/// not count.
pub fn has_results(html: &str, term: &str) -> bool {
    let visible = preprocess::strip_hidden(html);
    let Ok(doc) = Document::parse(&visible) else {
        return false;
    };
    let text = doc.text_content().to_lowercase();

    if text.contains(&term.to_lowercase()) {
        return true;
    }

    patterns::RESULT_MARKERS.iter().any(|marker| text.contains(marker))
}

/// Probes conventional search URL templates against a site.
///
/// Tried only after [`locate_search`] exhausts the markup patterns. Each
/// template gets a lightweight GET with a literal probe value; the first
/// template answering with a 2xx status wins. Network errors skip to the
/// next template.
#[cfg(feature = "fetch")]
pub async fn probe_url_templates(fetcher: &Fetcher, base_url: &Url) -> Option<SearchLocator> {
    let base = base_url.as_str().trim_end_matches('/');

    for template in patterns::URL_TEMPLATES {
        let endpoint = format!("{}{}", base, template);
        let probe = format!("{}{}", endpoint, patterns::TEMPLATE_PROBE_VALUE);

        match fetcher.get_status(&probe).await {
            Ok(status) if (200..300).contains(&status) => {
                return Some(SearchLocator {
                    endpoint,
                    field_name: patterns::DEFAULT_QUERY_FIELD.to_string(),
                    method: Method::Get,
                    origin: LocatorOrigin::UrlGuess,
                });
            }
            _ => continue,
        }
    }

    None
}

/// Submits a probe query through a locator and returns the results page.
///
/// # Errors
///
/// Returns [`FaroError::NoResults`] when the request fails, times out,
/// answers with a non-success status, or when the page fails the
/// [`has_results`] heuristic. The caller treats all of these the same
/// way: skip the site, no retry.
#[cfg(feature = "fetch")]
pub async fn probe_search(fetcher: &Fetcher, locator: &SearchLocator, term: &str) -> Result<String> {
    let response = match locator.method {
        Method::Get => fetcher.get(&locator.query_url(term)).await,
        Method::Post => {
            fetcher
                .post_form(&locator.endpoint, &[(locator.field_name.as_str(), term)])
                .await
        }
    };

    let Ok(body) = response else {
        return Err(FaroError::NoResults);
    };

    if has_results(&body, term) { Ok(body) } else { Err(FaroError::NoResults) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn base() -> Url {
        Url::parse("https://x.test/").unwrap()
    }

    #[test]
    fn test_locates_role_search_form() {
        let html = r#"<html><body>
            <form role="search" action="/search"><input name="q"></form>
        </body></html>"#;
        let doc = Document::parse(html).unwrap();

        let locator = locate_search(&doc, &base()).unwrap().unwrap();
        assert_eq!(locator.endpoint, "https://x.test/search");
        assert_eq!(locator.field_name, "q");
        assert_eq!(locator.method, Method::Get);
        assert_eq!(locator.origin, LocatorOrigin::Form);
    }

    #[test]
    fn test_form_without_action_uses_base() {
        let html = r#"<form role="search"><input type="search"></form>"#;
        let doc = Document::parse(html).unwrap();

        let locator = locate_search(&doc, &base()).unwrap().unwrap();
        assert_eq!(locator.endpoint, "https://x.test/");
        assert_eq!(locator.field_name, "s", "unnamed input falls back to the default field");
    }

    #[test]
    fn test_post_form_method() {
        let html = r#"<form class="search-form" method="post" action="/busca"><input name="termo" type="search"></form>"#;
        let doc = Document::parse(html).unwrap();

        let locator = locate_search(&doc, &base()).unwrap().unwrap();
        assert_eq!(locator.method, Method::Post);
        assert_eq!(locator.endpoint, "https://x.test/busca");
    }

    #[test]
    fn test_form_without_query_input_is_skipped() {
        // The role="search" form has no recognizable input, so the walk
        // continues and lands on the bare input in the second form.
        let html = r#"<html><body>
            <form role="search" action="/newsletter"><input name="email"></form>
            <form action="/find"><input name="s"></form>
        </body></html>"#;
        let doc = Document::parse(html).unwrap();

        let locator = locate_search(&doc, &base()).unwrap().unwrap();
        assert_eq!(locator.endpoint, "https://x.test/find");
        assert_eq!(locator.field_name, "s");
        assert_eq!(locator.origin, LocatorOrigin::Input);
    }

    #[test]
    fn test_input_keeps_its_own_field_name() {
        let html = r#"<form action="/b"><input name="consulta" placeholder="buscar no site"></form>"#;
        let doc = Document::parse(html).unwrap();

        let locator = locate_search(&doc, &base()).unwrap().unwrap();
        assert_eq!(locator.field_name, "consulta");
        assert_eq!(locator.origin, LocatorOrigin::Input);
    }

    #[test]
    fn test_formless_input_yields_nothing() {
        let html = r#"<div class="search-box"><input name="s"></div>"#;
        let doc = Document::parse(html).unwrap();

        assert!(locate_search(&doc, &base()).unwrap().is_none());
    }

    #[test]
    fn test_no_search_markup_at_all() {
        let html = "<html><body><p>só conteúdo</p></body></html>";
        let doc = Document::parse(html).unwrap();

        assert!(locate_search(&doc, &base()).unwrap().is_none());
    }

    #[rstest]
    #[case("https://x.test/search", "q", "https://x.test/search?q=eleições")]
    #[case("https://x.test/?s=", "s", "https://x.test/?s=eleições")]
    #[case("https://x.test/busca?termo=", "s", "https://x.test/busca?termo=eleições")]
    fn test_query_url_get(#[case] endpoint: &str, #[case] field: &str, #[case] expected: &str) {
        let locator = SearchLocator {
            endpoint: endpoint.to_string(),
            field_name: field.to_string(),
            method: Method::Get,
            origin: LocatorOrigin::Form,
        };
        assert_eq!(locator.query_url("eleições"), expected);
    }

    #[test]
    fn test_query_url_post_unchanged() {
        let locator = SearchLocator {
            endpoint: "https://x.test/busca".to_string(),
            field_name: "q".to_string(),
            method: Method::Post,
            origin: LocatorOrigin::Form,
        };
        assert_eq!(locator.query_url("eleições"), "https://x.test/busca");
    }

    #[test]
    fn test_has_results_finds_term() {
        let html = "<html><body><h1>Você buscou por Eleições</h1></body></html>";
        assert!(has_results(html, "eleições"));
    }

    #[test]
    fn test_has_results_accepts_marker() {
        let html = "<html><body><p>32 resultados encontrados</p></body></html>";
        assert!(has_results(html, "nada-disso-aparece"));
    }

    #[test]
    fn test_has_results_rejects_empty_page() {
        let html = "<html><body><p>Página não encontrada</p></body></html>";
        assert!(!has_results(html, "eleições"));
    }

    #[test]
    fn test_has_results_ignores_script_text() {
        let html = r#"<html><body>
            <script>var busca = "eleições"; var r = "results";</script>
            <p>Nenhuma correspondência</p>
        </body></html>"#;
        assert!(!has_results(html, "eleições"));
    }
}
