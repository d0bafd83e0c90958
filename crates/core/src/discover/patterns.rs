//! Ranked pattern tables used by the discovery heuristics.
//!
//! Every table here is an ordered list: earlier entries encode more
//! specific, higher-confidence guesses and are tried first. The order is
//! load-bearing, which is why these are slices rather than maps.

/// Where a search pattern match is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// The pattern matches a `<form>`; endpoint and method come from it.
    Form,
    /// The pattern matches an `<input>`; the enclosing form is looked up.
    Input,
}

/// One entry in the ranked search entry point list.
#[derive(Debug, Clone, Copy)]
pub struct SearchPattern {
    /// CSS selector tried against the front page.
    pub selector: &'static str,
    /// How a match is interpreted.
    pub kind: PatternKind,
}

/// Search entry point patterns, most specific first.
pub const SEARCH_PATTERNS: &[SearchPattern] = &[
    SearchPattern { selector: r#"form[role="search"]"#, kind: PatternKind::Form },
    SearchPattern { selector: "form.search-form", kind: PatternKind::Form },
    SearchPattern { selector: r#"form[action*="search"]"#, kind: PatternKind::Form },
    SearchPattern { selector: r#"form[action*="busca"]"#, kind: PatternKind::Form },
    SearchPattern { selector: r#"form[action*="?s"]"#, kind: PatternKind::Form },
    SearchPattern { selector: r#"input[name="s"]"#, kind: PatternKind::Input },
    SearchPattern { selector: r#"input[name="search"]"#, kind: PatternKind::Input },
    SearchPattern { selector: r#"input[name="q"]"#, kind: PatternKind::Input },
    SearchPattern { selector: r#"input[placeholder*="buscar"]"#, kind: PatternKind::Input },
    SearchPattern { selector: r#"input[placeholder*="search"]"#, kind: PatternKind::Input },
    SearchPattern { selector: ".search-box input", kind: PatternKind::Input },
    SearchPattern { selector: "#search input", kind: PatternKind::Input },
];

/// Recognizable query inputs inside a matched form, in document order.
pub const FORM_INPUT_SELECTOR: &str =
    r#"input[name="s"], input[name="search"], input[name="q"], input[type="search"]"#;

/// Query field name assumed when a form carries no recognizable input name.
pub const DEFAULT_QUERY_FIELD: &str = "s";

/// Conventional search URL suffixes probed when no markup pattern matches.
///
/// Appended to the site base URL (trailing slash stripped); the query value
/// goes directly after the trailing `=`.
pub const URL_TEMPLATES: &[&str] = &["?s=", "/search?q=", "/busca?termo=", "/?search="];

/// Literal value appended to a URL template during fallback probing.
pub const TEMPLATE_PROBE_VALUE: &str = "test";

/// Substrings that mark a results page as non-empty, checked after the
/// probe term itself.
pub const RESULT_MARKERS: &[&str] = &["result", "notícia"];

/// Candidate repeating-item selectors for results pages, most specific
/// first.
pub const CONTAINER_PATTERNS: &[&str] = &[
    "article",
    ".post",
    ".news-item",
    ".noticia",
    ".content-item",
    r#"[class*="post"]"#,
    r#"[class*="news"]"#,
    r#"[class*="article"]"#,
    ".entry",
    ".item",
];

/// The five semantic fields resolved per item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Title,
    Summary,
    Link,
    Image,
    Date,
}

const TITLE_PATTERNS: &[&str] =
    &["h1 a", "h2 a", "h3 a", "h4 a", ".title a", ".headline a", ".entry-title a", ".post-title a"];

const SUMMARY_PATTERNS: &[&str] =
    &[".excerpt", ".summary", ".description", ".lead", "p", ".entry-summary", ".post-excerpt"];

const LINK_PATTERNS: &[&str] =
    &["h1 a", "h2 a", "h3 a", "h4 a", ".title a", ".headline a", ".more-link", ".read-more"];

const IMAGE_PATTERNS: &[&str] =
    &[".featured-image img", ".post-thumbnail img", ".news-image img", "img", ".thumb img"];

const DATE_PATTERNS: &[&str] = &[".date", ".time", ".timestamp", ".published", ".post-date", "time", ".meta-date"];

impl FieldKind {
    /// Ranked selector patterns for this field.
    pub fn patterns(self) -> &'static [&'static str] {
        match self {
            FieldKind::Title => TITLE_PATTERNS,
            FieldKind::Summary => SUMMARY_PATTERNS,
            FieldKind::Link => LINK_PATTERNS,
            FieldKind::Image => IMAGE_PATTERNS,
            FieldKind::Date => DATE_PATTERNS,
        }
    }

    /// All field kinds, in the order they are resolved and reported.
    pub fn all() -> &'static [FieldKind] {
        &[FieldKind::Title, FieldKind::Summary, FieldKind::Link, FieldKind::Image, FieldKind::Date]
    }
}

/// Portuguese month abbreviations accepted by the date predicate.
pub const MONTH_TOKENS: &[&str] =
    &["jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_patterns_lead_with_forms() {
        assert_eq!(SEARCH_PATTERNS[0].selector, r#"form[role="search"]"#);
        assert!(matches!(SEARCH_PATTERNS[0].kind, PatternKind::Form));

        let first_input = SEARCH_PATTERNS.iter().position(|p| matches!(p.kind, PatternKind::Input)).unwrap();
        let last_form = SEARCH_PATTERNS
            .iter()
            .rposition(|p| matches!(p.kind, PatternKind::Form))
            .unwrap();
        assert!(last_form < first_input, "form patterns come before input patterns");
    }

    #[test]
    fn test_container_patterns_start_semantic() {
        assert_eq!(CONTAINER_PATTERNS[0], "article");
        assert!(CONTAINER_PATTERNS.len() >= 2);
    }

    #[test]
    fn test_field_patterns_prefer_headings() {
        assert_eq!(FieldKind::Title.patterns()[0], "h1 a");
        assert_eq!(FieldKind::Link.patterns()[0], "h1 a");
        assert!(FieldKind::Summary.patterns().contains(&"p"));
        assert!(FieldKind::Image.patterns().contains(&"img"));
    }

    #[test]
    fn test_all_fields_have_patterns() {
        for kind in FieldKind::all() {
            assert!(!kind.patterns().is_empty());
        }
    }
}
