//! Error type definitions.
//!
//! This module defines the analysis error taxonomy and the counter types used
//! by [`super::ProcessingStats`].

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing an HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Terminal failures of one analysis run.
///
/// Extraction itself never produces an error; fields it cannot find are left
/// absent and the validator decides whether the result is usable. These
/// variants are the only ways a run can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The input was rejected before any network call was made.
    #[error("Invalid URL: {0}. Expected an http(s) address like https://example.com/offer")]
    MalformedUrl(String),

    /// Both fetch strategies failed or returned an empty body.
    #[error("Could not reach the page. Check that the URL is correct and publicly accessible.")]
    PageUnreachable,

    /// Validation rejected the extracted signals (hard error or low confidence).
    #[error("Insufficient data for analysis: {}", .errors.join(", "))]
    InsufficientData {
        /// The validator's hard errors, or a low-confidence note when there
        /// were none.
        errors: Vec<String>,
    },
}

/// Types of errors that can occur while processing a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    /// The remote scraping service attempt failed (any cause).
    ScrapeApiError,
    /// The direct GET fallback failed (any cause).
    DirectFetchError,
    /// Both fetch strategies failed; the run was abandoned.
    PageUnreachable,
    /// Validation rejected the extracted signals.
    AnalysisRejected,
    /// The input URL was rejected before fetching.
    MalformedUrl,
}

/// Types of warnings that can occur while processing a URL.
///
/// Warnings indicate degraded extraction quality that doesn't by itself
/// prevent an analysis from completing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum WarningType {
    /// The validator emitted a plausibility warning for an extracted field.
    ValidationWarning,
    /// The extraction passed validation checks but confidence fell below the gate.
    LowConfidence,
}

/// Types of informational metrics tracked while processing URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    /// A result was served from the cache without consuming a fetch.
    CacheHit,
    /// The primary scrape-service strategy was skipped or failed and the
    /// direct GET fallback was used.
    FellBackToDirectFetch,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    /// Returns a human-readable string representation of the error type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::ScrapeApiError => "Scrape API error",
            ErrorType::DirectFetchError => "Direct fetch error",
            ErrorType::PageUnreachable => "Page unreachable",
            ErrorType::AnalysisRejected => "Analysis rejected by validation",
            ErrorType::MalformedUrl => "Malformed URL",
        }
    }
}

impl WarningType {
    /// Returns a human-readable string representation of the warning type.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningType::ValidationWarning => "Validation warning",
            WarningType::LowConfidence => "Low extraction confidence",
        }
    }
}

impl InfoType {
    /// Returns a human-readable string representation of the info type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::CacheHit => "Cache hit",
            InfoType::FellBackToDirectFetch => "Fell back to direct fetch",
        }
    }
}
