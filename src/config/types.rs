//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument
//! parsing and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Analyzer configuration (CLI options double as the library config).
///
/// Can be constructed programmatically via `Default` for library use:
///
/// ```no_run
/// use offer_score::Config;
///
/// let config = Config {
///     urls: vec!["https://pay.hotmart.com/some-offer".to_string()],
///     max_concurrency: 2,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "offer_score",
    about = "Analyzes affiliate sales pages and scores their conversion potential and risk."
)]
pub struct Config {
    /// Sales-page URLs to analyze
    pub urls: Vec<String>,

    /// Read URLs from a file instead (one per line, `#` comments allowed)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Maximum concurrent analyses
    #[arg(long, default_value_t = 4)]
    pub max_concurrency: usize,

    /// Scraping service API key (falls back to the FIRECRAWL_API_KEY env var)
    #[arg(long)]
    pub scrape_api_key: Option<String>,

    /// Print full result envelopes as JSON instead of the summary lines
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Disable the in-process result cache (repeat URLs are re-fetched)
    #[arg(long, default_value_t = false)]
    pub no_cache: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            urls: Vec::new(),
            file: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            max_concurrency: 4,
            scrape_api_key: None,
            json: false,
            no_cache: false,
        }
    }
}
