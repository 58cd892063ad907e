//! Client for the remote scraping service (primary fetch strategy).
//!
//! The service renders the page server-side and returns the full HTML,
//! which gets past client-side-rendered sales pages that a plain GET would
//! see empty. It is API-key gated and billed per request, so it is only
//! attempted when a key is configured.

use anyhow::{anyhow, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::{SCRAPE_API_ENDPOINT, SCRAPE_API_TIMEOUT};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScrapeRequest<'a> {
    url: &'a str,
    page_options: PageOptions,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageOptions {
    /// Request the whole document, not a readability-style main-content cut.
    only_main_content: bool,
    /// Request raw markup, not just visible text.
    include_html: bool,
}

#[derive(Deserialize)]
struct ScrapeResponse {
    success: bool,
    data: Option<ScrapeData>,
}

#[derive(Deserialize)]
struct ScrapeData {
    html: Option<String>,
}

/// Client for the remote scraping service.
pub struct ScrapeApiClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl ScrapeApiClient {
    /// Creates a client for the default endpoint.
    ///
    /// # Arguments
    ///
    /// * `api_key` - The bearer API key for the service
    ///
    /// # Errors
    ///
    /// Returns a `reqwest::Error` if the underlying HTTP client cannot be
    /// built.
    pub fn new(api_key: String) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(SCRAPE_API_TIMEOUT)
            .build()?;
        Ok(ScrapeApiClient {
            client,
            api_key,
            endpoint: SCRAPE_API_ENDPOINT.to_string(),
        })
    }

    /// Creates a client against a non-default endpoint.
    pub fn with_endpoint(api_key: String, endpoint: String) -> Result<Self, reqwest::Error> {
        let mut client = Self::new(api_key)?;
        client.endpoint = endpoint;
        Ok(client)
    }

    /// Fetches the full HTML of a page through the scraping service.
    ///
    /// # Arguments
    ///
    /// * `url` - The page URL to scrape
    ///
    /// # Errors
    ///
    /// Any failure - non-2xx status, unsuccessful response envelope, or a
    /// missing/empty html payload - is returned as an error for the caller
    /// to log and swallow; the fetcher treats all of them as "try the
    /// fallback".
    pub async fn fetch_html(&self, url: &str) -> Result<String> {
        let request = ScrapeRequest {
            url,
            page_options: PageOptions {
                only_main_content: false,
                include_html: true,
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("scrape API returned HTTP {status}"));
        }

        let body: ScrapeResponse = response.json().await?;
        if !body.success {
            return Err(anyhow!("scrape API reported failure"));
        }

        match body.data.and_then(|data| data.html) {
            Some(html) if !html.is_empty() => {
                debug!("scrape API returned {} bytes of HTML", html.len());
                Ok(html)
            }
            _ => Err(anyhow!("scrape API response contained no HTML")),
        }
    }
}
