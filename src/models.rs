//! Shared data model for the analysis pipeline.
//!
//! These types flow between the pipeline stages and form the externally
//! visible result envelope. Everything here is created fresh per run and
//! never mutated after being returned.

use serde::Serialize;

use crate::extract::{ExtractedSignals, Platform};
use crate::score::Factors;
use crate::validate::ValidationOutcome;

/// Which fetch strategy produced a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMethod {
    /// The remote scraping service.
    Primary,
    /// The direct HTTP GET fallback.
    Fallback,
}

/// Raw HTML retrieved for a URL. Ephemeral - exists only within one
/// pipeline run.
#[derive(Debug, Clone)]
pub struct RawPage {
    /// The raw HTML markup, exactly as fetched.
    pub html: String,
    /// The (normalized) URL the page was fetched from.
    pub source_url: String,
    /// Which fetch strategy succeeded.
    pub fetch_method: FetchMethod,
}

/// Where a returned result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultSource {
    /// Fetched through the remote scraping service.
    Primary,
    /// Fetched through the direct GET fallback.
    Fallback,
    /// Served from the result cache.
    Cache,
}

impl From<FetchMethod> for ResultSource {
    fn from(method: FetchMethod) -> Self {
        match method {
            FetchMethod::Primary => ResultSource::Primary,
            FetchMethod::Fallback => ResultSource::Fallback,
        }
    }
}

/// The analysis payload of a successful pipeline run.
///
/// Carries the headline fields callers display, plus the full extracted
/// signals and validation outcome for debugging.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisData {
    /// The normalized URL that was analyzed.
    pub url: String,
    /// Fingerprint of the normalized URL (cache/history key).
    pub url_fingerprint: String,
    /// Extracted page title, if found.
    pub title: Option<String>,
    /// Extracted offer price, if found.
    pub price: Option<f64>,
    /// Extracted guarantee period in days, if found.
    pub guarantee_days: Option<u32>,
    /// Extracted installment count, if found.
    pub installment_count: Option<u32>,
    /// Detected checkout platform, if recognized.
    pub platform: Option<Platform>,
    /// The validator's confidence in the extraction, in [0, 1].
    pub confidence: f64,
    /// Conversion potential score in [0, 100].
    pub conversion_score: u8,
    /// Risk score in [0, 100].
    pub risk_score: u8,
    /// Weighted overall score in [0, 100].
    pub overall_score: u8,
    /// Human-readable scoring factors, grouped by category.
    pub factors: Factors,
    /// The complete extracted signal record.
    pub extracted_signals: ExtractedSignals,
    /// The complete validation outcome.
    pub validation: ValidationOutcome,
}

/// The externally visible result envelope of one pipeline run.
///
/// `success` is binary: a low-confidence extraction is a failure with the
/// diagnostics in `error`, never a partial success.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    /// Whether the analysis completed and passed validation.
    pub success: bool,
    /// The analysis payload; present only when `success` is true.
    pub data: Option<AnalysisData>,
    /// A user-facing failure message; present only when `success` is false.
    pub error: Option<String>,
    /// Which strategy produced the result.
    pub source: ResultSource,
}
