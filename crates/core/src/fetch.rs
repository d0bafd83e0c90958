//! HTTP fetching for discovery probes and collection runs.
//!
//! This module provides the [`Fetcher`], a thin wrapper around a reused
//! reqwest client that sends browser-like headers. News sites routinely
//! serve reduced or blocked pages to default library user agents, so the
//! headers mimic a desktop browser with a Portuguese language preference.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use url::Url;

use crate::{FaroError, Result};

const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// HTTP client configuration for fetching site pages.
///
/// This struct controls timeout, user agent, and language settings for
/// HTTP requests.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
    /// Accept-Language header value.
    pub accept_language: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 15,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            accept_language: "pt-BR,pt;q=0.8,en;q=0.5,en-US;q=0.3".to_string(),
        }
    }
}

/// HTTP fetcher shared across all requests of a discovery or collection run.
///
/// Builds one [`reqwest::Client`] up front and reuses its connection pool,
/// instead of constructing a client per request.
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    /// Creates a fetcher with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FaroError::HttpError`] if the underlying client cannot be
    /// constructed.
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(FaroError::HttpError)?;

        Ok(Self { client, config })
    }

    /// The configuration this fetcher was built with.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetches a page with GET and returns the response body.
    ///
    /// # Errors
    ///
    /// Returns [`FaroError::InvalidUrl`] for unparseable URLs,
    /// [`FaroError::Timeout`] when the configured limit elapses, and
    /// [`FaroError::HttpStatus`] for non-2xx responses.
    pub async fn get(&self, url: &str) -> Result<String> {
        let parsed = Url::parse(url).map_err(|e| FaroError::InvalidUrl(e.to_string()))?;
        let response = self.execute(self.client.get(parsed)).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FaroError::HttpStatus { url: url.to_string(), status: status.as_u16() });
        }

        let content = response.text().await?;

        Ok(content)
    }

    /// Issues a GET and returns only the HTTP status code.
    ///
    /// Used when probing conventional search URL templates, where the
    /// status alone decides acceptance and the body is not needed.
    pub async fn get_status(&self, url: &str) -> Result<u16> {
        let parsed = Url::parse(url).map_err(|e| FaroError::InvalidUrl(e.to_string()))?;
        let response = self.execute(self.client.get(parsed)).await?;

        Ok(response.status().as_u16())
    }

    /// Submits a form with POST and returns the response body.
    ///
    /// # Arguments
    ///
    /// * `fields` - Form fields sent URL-encoded in the request body
    pub async fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<String> {
        let parsed = Url::parse(url).map_err(|e| FaroError::InvalidUrl(e.to_string()))?;
        let response = self.execute(self.client.post(parsed).form(fields)).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FaroError::HttpStatus { url: url.to_string(), status: status.as_u16() });
        }

        let content = response.text().await?;

        Ok(content)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        request
            .header("User-Agent", &self.config.user_agent)
            .header("Accept", ACCEPT)
            .header("Accept-Language", &self.config.accept_language)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FaroError::Timeout { timeout: self.config.timeout }
                } else {
                    FaroError::HttpError(e)
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, 15);
        assert!(config.user_agent.contains("Chrome"));
        assert!(config.accept_language.starts_with("pt-BR"));
    }

    #[test]
    fn test_get_invalid_url() {
        let result = std::thread::spawn(move || {
            tokio::runtime::Runtime::new().unwrap().block_on(async {
                let fetcher = Fetcher::new(FetchConfig::default())?;
                fetcher.get("not-a-url").await
            })
        })
        .join()
        .unwrap();

        assert!(matches!(result, Err(FaroError::InvalidUrl(_))));
    }

    #[test]
    fn test_url_validation() {
        assert!(Url::parse("http://example.com").is_ok());
        assert!(Url::parse("https://example.com").is_ok());
        assert!(Url::parse("example.com").is_err()); // Missing scheme
    }
}
