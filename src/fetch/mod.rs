//! Page fetching.
//!
//! Two strategies, tried in order:
//!
//! 1. A remote scraping service that renders the page server-side
//!    (API-key gated, ~15s timeout). Any failure is swallowed and logged.
//! 2. A direct HTTP GET with a rotated browser identity, browser-like
//!    headers, ~10s timeout, up to 5 redirects, any status below 400
//!    accepted.
//!
//! Only when both fail (or return empty content) does the fetch surface an
//! error. There are no retries beyond the two attempts - failure is
//! immediate and terminal for the request.

mod request;
mod scrape_api;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::sync::Arc;

use crate::config::{DIRECT_FETCH_TIMEOUT, MAX_REDIRECT_HOPS};
use crate::error_handling::{AnalysisError, ErrorType, InfoType, InitializationError, ProcessingStats};
use crate::models::{FetchMethod, RawPage};

// Re-export public API
pub use scrape_api::ScrapeApiClient;

/// Retrieves raw HTML for a URL.
///
/// The pipeline depends on this trait rather than a concrete client so test
/// doubles can stand in for the network.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the page at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::PageUnreachable`] when no strategy produced
    /// non-empty content.
    async fn fetch(&self, url: &str) -> Result<RawPage, AnalysisError>;
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for Arc<T> {
    async fn fetch(&self, url: &str) -> Result<RawPage, AnalysisError> {
        (**self).fetch(url).await
    }
}

/// The production fetcher: scrape service first, direct GET second.
pub struct HttpFetcher {
    client: reqwest::Client,
    scrape_api: Option<ScrapeApiClient>,
    stats: Arc<ProcessingStats>,
}

impl HttpFetcher {
    /// Creates the fetcher and its HTTP clients.
    ///
    /// # Arguments
    ///
    /// * `scrape_api_key` - API key for the scraping service; `None` skips
    ///   the primary strategy entirely
    /// * `stats` - Shared processing statistics tracker
    ///
    /// # Errors
    ///
    /// Returns an [`InitializationError`] if a client cannot be built.
    pub fn new(
        scrape_api_key: Option<String>,
        stats: Arc<ProcessingStats>,
    ) -> Result<Self, InitializationError> {
        let client = reqwest::Client::builder()
            .timeout(DIRECT_FETCH_TIMEOUT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECT_HOPS))
            .build()?;

        let scrape_api = match scrape_api_key {
            Some(key) if !key.is_empty() => Some(ScrapeApiClient::new(key)?),
            _ => {
                info!("Scrape API key not configured; using direct fetch only");
                None
            }
        };

        Ok(HttpFetcher {
            client,
            scrape_api,
            stats,
        })
    }

    /// The direct-GET fallback.
    async fn fetch_direct(&self, url: &str) -> Result<String> {
        let builder = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, request::random_user_agent());
        let response = request::RequestHeaders::apply_to_request_builder(builder)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(anyhow!("HTTP {status}"));
        }

        let body = response.text().await?;
        if body.is_empty() {
            return Err(anyhow!("empty response body"));
        }
        Ok(body)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<RawPage, AnalysisError> {
        if let Some(scrape_api) = &self.scrape_api {
            match scrape_api.fetch_html(url).await {
                Ok(html) => {
                    debug!("Fetched {url} via scrape API");
                    return Ok(RawPage {
                        html,
                        source_url: url.to_string(),
                        fetch_method: FetchMethod::Primary,
                    });
                }
                Err(e) => {
                    info!("Scrape API failed for {url}: {e}; trying direct fetch");
                    self.stats.increment_error(ErrorType::ScrapeApiError);
                }
            }
        }
        self.stats.increment_info(InfoType::FellBackToDirectFetch);

        match self.fetch_direct(url).await {
            Ok(html) => {
                debug!("Fetched {url} via direct GET ({} bytes)", html.len());
                Ok(RawPage {
                    html,
                    source_url: url.to_string(),
                    fetch_method: FetchMethod::Fallback,
                })
            }
            Err(e) => {
                warn!("Direct fetch failed for {url}: {e}");
                self.stats.increment_error(ErrorType::DirectFetchError);
                Err(AnalysisError::PageUnreachable)
            }
        }
    }
}
