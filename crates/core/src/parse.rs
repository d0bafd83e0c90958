//! HTML parsing and DOM navigation.
//!
//! This module provides the [`Document`] and [`Element`] types for parsing
//! HTML and querying the DOM tree using CSS selectors.
//!
//! # Example
//!
//! ```rust
//! use faro_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <article><h2><a href="/n/1">Headline</a></h2></article>
//!             <article><h2><a href="/n/2">Another</a></h2></article>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html).unwrap();
//! let items = doc.select("article").unwrap();
//! assert_eq!(items.len(), 2);
//! ```

use scraper::{Html, Selector};
use url::Url;

use crate::{FaroError, Result};

/// Represents a parsed HTML document.
///
/// A Document wraps an HTML page and provides methods for querying elements
/// using CSS selectors. An optional base URL is carried along for resolving
/// relative links found in the page.
///
/// # Example
///
/// ```rust
/// use faro_core::parse::Document;
///
/// let html = "<html><body><p>Hello</p></body></html>";
/// let doc = Document::parse_with_url(html, "https://x.test/").unwrap();
/// assert_eq!(doc.base_url().unwrap().as_str(), "https://x.test/");
/// ```
pub struct Document {
    html: Html,
    base_url: Option<Url>,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// # Arguments
    ///
    /// * `html` - The HTML content to parse
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html, base_url: None })
    }

    /// Parses HTML from a string, attaching a base URL.
    ///
    /// The base URL is used when resolving relative `href`/`src` values
    /// extracted from the page.
    ///
    /// # Errors
    ///
    /// Returns [`FaroError::InvalidUrl`] if `url` cannot be parsed.
    pub fn parse_with_url(html: &str, url: &str) -> Result<Self> {
        let base_url = Url::parse(url).map_err(|e| FaroError::InvalidUrl(e.to_string()))?;
        let html = Html::parse_document(html);

        Ok(Self { html, base_url: Some(base_url) })
    }

    /// Gets the base URL attached to this document, if any.
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Arguments
    ///
    /// * `selector` - A CSS selector string (e.g., "article", "#search input")
    ///
    /// # Errors
    ///
    /// Returns [`FaroError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use faro_core::parse::Document;
    ///
    /// let html = r#"<p class="excerpt">First</p><p class="excerpt">Second</p>"#;
    /// let doc = Document::parse(html).unwrap();
    /// let elements = doc.select("p.excerpt").unwrap();
    /// assert_eq!(elements.len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel =
            Selector::parse(selector).map_err(|e| FaroError::HtmlParseError(format!("Invalid selector: {}", e)))?;

        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Selects the first element matching a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`FaroError::HtmlParseError`] if the selector is invalid.
    pub fn select_one(&'_ self, selector: &str) -> Result<Option<Element<'_>>> {
        let sel =
            Selector::parse(selector).map_err(|e| FaroError::HtmlParseError(format!("Invalid selector: {}", e)))?;

        Ok(self.html.select(&sel).next().map(|el| Element { element: el }))
    }

    /// Gets all text content from the document.
    ///
    /// Returns the concatenation of every text node in the document. Pair
    /// this with [`crate::preprocess::strip_hidden`] when only
    /// visible text should be inspected.
    pub fn text_content(&self) -> String {
        self.html.root_element().text().collect()
    }
}

/// A wrapper around scraper's ElementRef for easier DOM navigation.
///
/// Element represents a single node in the HTML document tree and provides
/// methods for accessing its attributes, text content, and descendants.
///
/// # Example
///
/// ```rust
/// use faro_core::parse::Document;
///
/// let html = r#"<a href="https://example.com">Link text</a>"#;
/// let doc = Document::parse(html).unwrap();
/// let link = &doc.select("a").unwrap()[0];
///
/// assert_eq!(link.text(), "Link text");
/// assert_eq!(link.attr("href"), Some("https://example.com"));
/// ```
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the text content of this element.
    ///
    /// Returns the concatenation of all text nodes within this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the value of an attribute.
    ///
    /// # Arguments
    ///
    /// * `name` - The attribute name (e.g., "href", "action", "name")
    ///
    /// Returns `None` if the attribute is not present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }

    /// Gets the tag name of this element.
    ///
    /// Returns the lowercase tag name (e.g., "form", "input", "article").
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Selects descendant elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`FaroError::HtmlParseError`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel =
            Selector::parse(selector).map_err(|e| FaroError::HtmlParseError(format!("Invalid selector: {}", e)))?;

        Ok(self.element.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Selects the first descendant matching a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`FaroError::HtmlParseError`] if the selector is invalid.
    pub fn select_one(&'_ self, selector: &str) -> Result<Option<Element<'_>>> {
        let sel =
            Selector::parse(selector).map_err(|e| FaroError::HtmlParseError(format!("Invalid selector: {}", e)))?;

        Ok(self.element.select(&sel).next().map(|el| Element { element: el }))
    }

    /// Walks up the tree to the nearest enclosing `<form>` element.
    ///
    /// Used when a search pattern matches a bare input field and the
    /// submission endpoint has to come from the surrounding form.
    ///
    /// # Example
    ///
    /// ```rust
    /// use faro_core::parse::Document;
    ///
    /// let html = r#"<form action="/busca"><div><input name="q"></div></form>"#;
    /// let doc = Document::parse(html).unwrap();
    /// let input = &doc.select("input").unwrap()[0];
    /// let form = input.enclosing_form().unwrap();
    ///
    /// assert_eq!(form.attr("action"), Some("/busca"));
    /// ```
    pub fn enclosing_form(&self) -> Option<Element<'a>> {
        self.element
            .ancestors()
            .filter_map(scraper::ElementRef::wrap)
            .find(|el| el.value().name().eq_ignore_ascii_case("form"))
            .map(|element| Element { element })
    }
}

/// Collapses runs of whitespace (spaces, tabs, newlines) to single spaces
/// and trims the ends.
///
/// # Example
///
/// ```rust
/// use faro_core::parse::clean_text;
///
/// assert_eq!(clean_text("  Breaking\n\t news  "), "Breaking news");
/// ```
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
