//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions for the analysis pipeline
//! - Processing statistics tracking (errors, warnings, info metrics)
//!
//! Counter types are categorized into:
//! - **Errors**: Failures that prevent a successful analysis
//! - **Warnings**: Extraction quality issues that don't abort the run
//! - **Info**: Informational metrics (cache hits, fallback fetches, etc.)

mod stats;
mod types;

// Re-export public API
pub use stats::ProcessingStats;
pub use types::{AnalysisError, ErrorType, InfoType, InitializationError, WarningType};
