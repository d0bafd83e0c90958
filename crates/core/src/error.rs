//! Error types for Faro operations.
//!
//! This module defines the main error type [`FaroError`] which represents
//! all possible errors that can occur during search-point discovery,
//! query probing, and item collection.
//!
//! # Example
//!
//! ```rust
//! use faro_core::{FaroError, Result};
//!
//! fn pick_container(html: &str) -> Result<String> {
//!     if html.is_empty() {
//!         return Err(FaroError::NoContainer);
//!     }
//!     // ... scoring logic
//!     # Ok(String::new())
//! }
//! ```

use thiserror::Error;

/// Main error type for discovery and collection operations.
///
/// This enum represents all possible errors that can occur while locating
/// a site's search facility, probing it, scoring result containers, and
/// persisting configurations. Heuristic rejections (`SearchNotFound`,
/// `NoResults`, `NoContainer`) are recoverable: callers skip the site and
/// move on rather than aborting a batch.
///
/// # Example
///
/// ```rust
/// use faro_core::{Document, FaroError, select_container};
///
/// let doc = Document::parse("<html><body><p>hi</p></body></html>").unwrap();
/// match select_container(&doc) {
///     Ok(found) => println!("Winner: {}", found.pattern),
///     Err(FaroError::NoContainer) => println!("No repeating item pattern"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum FaroError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Non-success HTTP status.
    ///
    /// Returned when a fetch completes but the server answers outside the
    /// 2xx range. Carries the requested URL and the status code.
    #[error("Request to {url} returned status {status}")]
    HttpStatus { url: String, status: u16 },

    /// Invalid URL provided.
    ///
    /// Returned when a URL cannot be parsed or is malformed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors.
    ///
    /// Returned when HTML cannot be parsed, often due to malformed markup
    /// or invalid CSS selectors.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// No search entry point found on a front page.
    ///
    /// Returned when every search pattern and every conventional URL
    /// template has been tried without a match for the given site.
    #[error("No search entry point found for {0}")]
    SearchNotFound(String),

    /// A probed search returned no recognizable results.
    ///
    /// The request may have succeeded at the HTTP level while the page
    /// still fails the results heuristic (term or marker not present).
    #[error("Search probe returned no recognizable results")]
    NoResults,

    /// No repeating item container matched on a results page.
    ///
    /// Returned when no candidate pattern matches at least two nodes.
    #[error("No repeating item container found in the document")]
    NoContainer,

    /// File I/O errors.
    ///
    /// Wraps standard I/O errors for configuration and feed files.
    #[error("File operation failed: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization errors.
    ///
    /// Returned when a configuration or feed file cannot be encoded or
    /// decoded.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for FaroError.
///
/// This is a convenience alias for `std::result::Result<T, FaroError>`.
pub type Result<T> = std::result::Result<T, FaroError>;
