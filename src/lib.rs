//! offer_score library: affiliate sales-page analysis.
//!
//! This library fetches a sales page's HTML (remote scraping service with a
//! direct-GET fallback), extracts structured offer signals from the markup,
//! validates the extraction, and computes heuristic conversion/risk scores
//! with human-readable factors.
//!
//! # Example
//!
//! ```no_run
//! use offer_score::{run_analysis, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     urls: vec!["https://pay.hotmart.com/some-offer".to_string()],
//!     ..Default::default()
//! };
//!
//! let report = run_analysis(config).await?;
//! println!(
//!     "Analyzed {} URLs: {} succeeded, {} failed",
//!     report.total_urls, report.successful, report.failed
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

pub mod app;
pub mod cache;
pub mod config;
pub mod error_handling;
pub mod extract;
pub mod fetch;
pub mod initialization;
pub mod ledger;
pub mod models;
pub mod pipeline;
pub mod score;
pub mod service;
pub mod validate;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use models::{AnalysisData, PipelineResult, ResultSource};
pub use run::{run_analysis, AnalysisReport};
pub use service::{AnalysisOutcome, AnalysisService};

// Internal run module (contains the CLI-facing analysis loop)
mod run {
    use anyhow::{Context, Result};
    use std::sync::Arc;

    use futures::stream::FuturesUnordered;
    use futures::StreamExt;
    use log::{info, warn};
    use tokio::io::{AsyncBufReadExt, BufReader};
    use tokio::sync::Semaphore;

    use crate::app::{fingerprint_url, print_analysis_statistics, validate_and_normalize_url};
    use crate::cache::{AnalysisCache, InMemoryCache};
    use crate::config::{Config, SCRAPE_API_KEY_ENV};
    use crate::error_handling::{InfoType, ProcessingStats};
    use crate::fetch::HttpFetcher;
    use crate::models::{PipelineResult, ResultSource};
    use crate::pipeline::Pipeline;

    /// Results of an analysis run over one or more URLs.
    #[derive(Debug)]
    pub struct AnalysisReport {
        /// Total number of URLs submitted.
        pub total_urls: usize,
        /// Number of URLs that produced a successful analysis.
        pub successful: usize,
        /// Number of URLs that failed (unreachable, rejected, malformed).
        pub failed: usize,
        /// Number of results served from the in-process cache.
        pub cache_hits: usize,
        /// Elapsed wall-clock time in seconds.
        pub elapsed_seconds: f64,
        /// Per-URL result envelopes, in completion order.
        pub results: Vec<(String, PipelineResult)>,
    }

    /// Runs analyses with the provided configuration.
    ///
    /// This is the main entry point for the library. It gathers URLs from the
    /// config (inline and/or from a file), analyzes them concurrently up to
    /// `max_concurrency`, serves repeat URLs from an in-process cache, and
    /// returns the per-URL envelopes plus summary statistics.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration for the run (URLs, concurrency, API key, ...)
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - No URLs were provided at all
    /// - The input file cannot be opened
    /// - The HTTP clients cannot be initialized
    ///
    /// Per-URL failures are not errors; they come back as `success: false`
    /// envelopes in the report.
    pub async fn run_analysis(config: Config) -> Result<AnalysisReport> {
        let mut urls = config.urls.clone();
        if let Some(path) = &config.file {
            let file = tokio::fs::File::open(path)
                .await
                .context("Failed to open input file")?;
            let mut lines = BufReader::new(file).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                let trimmed = line.trim();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    continue;
                }
                urls.push(trimmed.to_string());
            }
        }
        anyhow::ensure!(
            !urls.is_empty(),
            "No URLs to analyze; pass URLs as arguments or via --file"
        );
        info!("Analyzing {} URLs", urls.len());

        let stats = Arc::new(ProcessingStats::new());
        let api_key = config
            .scrape_api_key
            .clone()
            .or_else(|| std::env::var(SCRAPE_API_KEY_ENV).ok());
        let fetcher = HttpFetcher::new(api_key, Arc::clone(&stats))
            .context("Failed to initialize HTTP clients")?;
        let pipeline = Arc::new(Pipeline::new(fetcher, Arc::clone(&stats)));
        let cache: Option<Arc<InMemoryCache>> = if config.no_cache {
            None
        } else {
            Some(Arc::new(InMemoryCache::new()))
        };

        let semaphore = Arc::new(Semaphore::new(config.max_concurrency.max(1)));
        let start_time = std::time::Instant::now();
        let total_urls = urls.len();
        let mut tasks = FuturesUnordered::new();

        for raw_url in urls {
            // Bare domains get an https:// prefix here; anything still
            // malformed is left for the pipeline to reject with an envelope.
            let url = validate_and_normalize_url(&raw_url).unwrap_or(raw_url);

            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .context("Semaphore closed unexpectedly")?;
            let pipeline = Arc::clone(&pipeline);
            let cache = cache.clone();
            let stats = Arc::clone(&stats);

            tasks.push(tokio::spawn(async move {
                let _permit = permit;

                let fingerprint = fingerprint_url(&url);
                if let Some(cache) = &cache {
                    if let Some(mut cached) = cache.get(&fingerprint).await {
                        stats.increment_info(InfoType::CacheHit);
                        cached.source = ResultSource::Cache;
                        return (url, cached);
                    }
                }

                let result = pipeline.run(&url).await;
                if result.success {
                    if let Some(cache) = &cache {
                        cache.put(&fingerprint, "cli", &result).await;
                    }
                }
                (url, result)
            }));
        }

        let mut results = Vec::with_capacity(total_urls);
        let mut successful = 0usize;
        let mut failed = 0usize;
        while let Some(joined) = tasks.next().await {
            match joined {
                Ok((url, result)) => {
                    if result.success {
                        successful += 1;
                    } else {
                        failed += 1;
                    }
                    results.push((url, result));
                }
                Err(e) => {
                    warn!("Analysis task panicked: {e}");
                    failed += 1;
                }
            }
        }

        let elapsed_seconds = start_time.elapsed().as_secs_f64();
        info!(
            "Run complete: {successful} succeeded, {failed} failed in {elapsed_seconds:.2}s"
        );
        print_analysis_statistics(&stats);

        Ok(AnalysisReport {
            total_urls,
            successful,
            failed,
            cache_hits: stats.get_info_count(InfoType::CacheHit),
            elapsed_seconds,
            results,
        })
    }
}
