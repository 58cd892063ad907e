//! The analysis service: cache and credit handling around the pipeline.
//!
//! This is the caller-side glue the surrounding product uses per request:
//! serve from cache when fresh (free), otherwise reserve a credit, run the
//! pipeline, and finalize the reservation - commit on success, release on
//! any failure. Exactly one of commit/release happens per reservation.

use log::{info, warn};
use std::sync::Arc;

use crate::app::fingerprint_url;
use crate::cache::AnalysisCache;
use crate::config::ANALYSIS_COST;
use crate::error_handling::{InfoType, ProcessingStats};
use crate::fetch::PageFetcher;
use crate::ledger::{CreditLedger, LedgerError};
use crate::models::{PipelineResult, ResultSource};
use crate::pipeline::Pipeline;

/// One analysis request's outcome, with its credit accounting.
#[derive(Debug)]
pub struct AnalysisOutcome {
    /// The result envelope (possibly served from cache).
    pub result: PipelineResult,
    /// Credits consumed by this request (0 for cache hits and failures).
    pub credits_used: u32,
    /// The user's balance after the request.
    pub credits_remaining: u32,
}

/// Runs analyses on behalf of identified users, charging credits.
pub struct AnalysisService<F: PageFetcher, L: CreditLedger, C: AnalysisCache> {
    pipeline: Pipeline<F>,
    ledger: L,
    cache: C,
    stats: Arc<ProcessingStats>,
}

impl<F: PageFetcher, L: CreditLedger, C: AnalysisCache> AnalysisService<F, L, C> {
    /// Creates a service around injected collaborators.
    pub fn new(pipeline: Pipeline<F>, ledger: L, cache: C, stats: Arc<ProcessingStats>) -> Self {
        AnalysisService {
            pipeline,
            ledger,
            cache,
            stats,
        }
    }

    /// Analyzes a URL for a user.
    ///
    /// A fresh cached result is returned at no charge with `source: cache`.
    /// Otherwise one credit is reserved up front; a successful analysis
    /// commits the reservation and writes the cache, any failure releases
    /// it. A failed analysis therefore never consumes credits.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InsufficientFunds`] when the user cannot cover the
    /// reservation - raised before any network call.
    pub async fn analyze(&self, user: &str, url: &str) -> Result<AnalysisOutcome, LedgerError> {
        let fingerprint = fingerprint_url(url);

        if let Some(mut cached) = self.cache.get(&fingerprint).await {
            info!("Serving {url} from cache for {user}");
            self.stats.increment_info(InfoType::CacheHit);
            cached.source = ResultSource::Cache;
            return Ok(AnalysisOutcome {
                result: cached,
                credits_used: 0,
                credits_remaining: self.ledger.balance(user).await,
            });
        }

        let reservation = self.ledger.reserve(user, ANALYSIS_COST).await?;

        let result = self.pipeline.run(url).await;

        let credits_used = if result.success {
            if let Err(e) = self.ledger.commit(&reservation).await {
                // The analysis already succeeded; a commit failure is a
                // ledger inconsistency to flag, not a reason to fail the
                // request.
                warn!("Failed to commit reservation {reservation}: {e}");
            }
            self.cache.put(&fingerprint, user, &result).await;
            ANALYSIS_COST
        } else {
            if let Err(e) = self.ledger.release(&reservation).await {
                warn!("Failed to release reservation {reservation}: {e}");
            }
            0
        };

        Ok(AnalysisOutcome {
            result,
            credits_used,
            credits_remaining: self.ledger.balance(user).await,
        })
    }
}
