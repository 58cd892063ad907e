//! Configuration for the analyzer.
//!
//! This module defines the CLI/library configuration struct and the
//! operational constants (timeouts, limits, tuning values) used throughout
//! the application.

pub mod constants;
mod types;

// Re-export public API
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};
