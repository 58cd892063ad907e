//! The analysis pipeline orchestrator.
//!
//! Sequences fetch -> extract -> validate -> score over a normalized,
//! fingerprinted URL and assembles the result envelope. Each sub-step is
//! best-effort and failures are terminal for the run: there are no retries
//! at this layer, and the caller may simply re-invoke the whole pipeline.

use log::{debug, info};
use std::sync::Arc;

use crate::app::{fingerprint_url, is_fetchable_url, normalize_url};
use crate::error_handling::{AnalysisError, ErrorType, ProcessingStats, WarningType};
use crate::extract::extract_signals;
use crate::fetch::PageFetcher;
use crate::models::{AnalysisData, PipelineResult, ResultSource};
use crate::score::calculate_scores;
use crate::validate::validate_signals;

/// The analysis pipeline.
///
/// The fetcher and statistics tracker are injected at construction - there
/// is no ambient client state, so independent pipelines can run concurrently
/// without sharing anything beyond the counters.
pub struct Pipeline<F: PageFetcher> {
    fetcher: F,
    stats: Arc<ProcessingStats>,
}

impl<F: PageFetcher> Pipeline<F> {
    /// Creates a pipeline around a fetcher.
    pub fn new(fetcher: F, stats: Arc<ProcessingStats>) -> Self {
        Pipeline { fetcher, stats }
    }

    /// Runs one full analysis.
    ///
    /// # Arguments
    ///
    /// * `url` - The sales-page URL (raw; normalized internally)
    ///
    /// # Returns
    ///
    /// A [`PipelineResult`] envelope. `success` is binary: malformed input,
    /// unreachable pages, and rejected extractions all come back as
    /// `success: false` with a user-facing message, never as an `Err`.
    pub async fn run(&self, url: &str) -> PipelineResult {
        let normalized = normalize_url(url);
        let fingerprint = fingerprint_url(url);

        // Reject before any network call; normalization alone is fail-safe
        // and would happily fingerprint junk.
        if !is_fetchable_url(&normalized) {
            self.stats.increment_error(ErrorType::MalformedUrl);
            let error = AnalysisError::MalformedUrl(url.to_string());
            return failure(error.to_string(), ResultSource::Fallback);
        }

        info!("Starting analysis of {normalized}");
        debug!("URL fingerprint: {fingerprint}");

        let page = match self.fetcher.fetch(&normalized).await {
            Ok(page) => page,
            Err(error) => {
                self.stats.increment_error(ErrorType::PageUnreachable);
                return failure(error.to_string(), ResultSource::Fallback);
            }
        };
        let source = ResultSource::from(page.fetch_method);

        let signals = extract_signals(&page.html, &normalized);
        let validation = validate_signals(&signals);
        for _ in &validation.warnings {
            self.stats.increment_warning(WarningType::ValidationWarning);
        }

        if !validation.is_valid {
            self.stats.increment_error(ErrorType::AnalysisRejected);
            let errors = if validation.errors.is_empty() {
                // Low confidence with a clean error list still rejects the
                // run; surface the reason instead of an empty message.
                self.stats.increment_warning(WarningType::LowConfidence);
                vec![format!(
                    "extraction confidence {:.2} below threshold",
                    validation.confidence
                )]
            } else {
                validation.errors.clone()
            };
            let error = AnalysisError::InsufficientData { errors };
            info!("Analysis of {normalized} rejected: {error}");
            return failure(error.to_string(), source);
        }

        let scores = calculate_scores(&signals);
        info!(
            "Analysis of {normalized} complete: conversion {}, risk {}, overall {}",
            scores.conversion_score, scores.risk_score, scores.overall_score
        );

        PipelineResult {
            success: true,
            data: Some(AnalysisData {
                url: normalized,
                url_fingerprint: fingerprint,
                title: signals.title.clone(),
                price: signals.price,
                guarantee_days: signals.guarantee_days,
                installment_count: signals.installment_count,
                platform: signals.platform,
                confidence: validation.confidence,
                conversion_score: scores.conversion_score,
                risk_score: scores.risk_score,
                overall_score: scores.overall_score,
                factors: scores.factors,
                extracted_signals: signals,
                validation,
            }),
            error: None,
            source,
        }
    }
}

fn failure(error: String, source: ResultSource) -> PipelineResult {
    PipelineResult {
        success: false,
        data: None,
        error: Some(error),
        source,
    }
}
