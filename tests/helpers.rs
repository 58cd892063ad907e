// Shared test helpers: fetch doubles and HTML fixtures.
//
// This module provides common utilities used across multiple test files to
// reduce duplication.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use offer_score::error_handling::AnalysisError;
use offer_score::fetch::PageFetcher;
use offer_score::models::{FetchMethod, RawPage};

/// A complete, well-signaled offer page: title, price, guarantee, and an
/// installment plan.
#[allow(dead_code)] // Used by other test files
pub const RICH_OFFER_HTML: &str = r#"<html>
<head><title>Curso Completo</title></head>
<body>
    <h1 class="product-title">Amazing Offer That Converts</h1>
    <p>por apenas R$ 97,00</p>
    <p>garantia de 30 dias</p>
    <p>ou 3x de R$ 32,33</p>
</body>
</html>"#;

/// A page with nothing extractable: a short title and no price anywhere.
#[allow(dead_code)] // Used by other test files
pub const EMPTY_PAGE_HTML: &str =
    "<html><head><title>Page</title></head><body><p>nothing here</p></body></html>";

/// Fetch double that serves a fixed page (or fails when given none),
/// counting how many times it was asked.
pub struct StaticFetcher {
    html: Option<String>,
    method: FetchMethod,
    calls: AtomicUsize,
}

impl StaticFetcher {
    /// Serves `html` as if fetched by `method`.
    #[allow(dead_code)] // Used by other test files
    pub fn serving(html: &str, method: FetchMethod) -> Self {
        StaticFetcher {
            html: Some(html.to_string()),
            method,
            calls: AtomicUsize::new(0),
        }
    }

    /// Fails every fetch with `PageUnreachable`.
    #[allow(dead_code)] // Used by other test files
    pub fn unreachable() -> Self {
        StaticFetcher {
            html: None,
            method: FetchMethod::Fallback,
            calls: AtomicUsize::new(0),
        }
    }

    /// How many fetches were attempted.
    #[allow(dead_code)] // Used by other test files
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<RawPage, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.html {
            Some(html) => Ok(RawPage {
                html: html.clone(),
                source_url: url.to_string(),
                fetch_method: self.method,
            }),
            None => Err(AnalysisError::PageUnreachable),
        }
    }
}

// Arc<StaticFetcher> implements PageFetcher via the library's blanket impl,
// letting a test hand the pipeline a fetcher while keeping a handle for
// call-count assertions.
