//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `offer_score` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use serde_json::json;
use std::process;

use offer_score::initialization::init_logger_with;
use offer_score::{run_analysis, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists) so the
    // scrape API key can be set without exporting it manually.
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let json_output = config.json;
    let report = run_analysis(config).await?;

    if json_output {
        let envelopes: Vec<_> = report
            .results
            .iter()
            .map(|(url, result)| json!({ "url": url, "result": result }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&envelopes)?);
    } else {
        for (url, result) in &report.results {
            match (&result.data, &result.error) {
                (Some(data), _) => {
                    println!(
                        "{} {} - overall {} (conversion {}, risk {}), confidence {:.2}{}",
                        "ok".green().bold(),
                        url,
                        data.overall_score.to_string().bold(),
                        data.conversion_score,
                        data.risk_score,
                        data.confidence,
                        data.platform
                            .map(|platform| format!(", platform {platform}"))
                            .unwrap_or_default(),
                    );
                }
                (None, Some(error)) => {
                    println!("{} {} - {}", "failed".red().bold(), url, error);
                }
                (None, None) => {
                    // A result with neither payload nor error would be a bug
                    // in the pipeline; still, don't crash the summary.
                    println!("{} {} - empty result", "failed".red().bold(), url);
                }
            }
        }
        println!(
            "\nAnalyzed {} URLs in {:.2}s: {} succeeded, {} failed, {} from cache",
            report.total_urls,
            report.elapsed_seconds,
            report.successful.to_string().green(),
            report.failed.to_string().red(),
            report.cache_hits
        );
    }

    if report.successful == 0 && report.total_urls > 0 {
        process::exit(1);
    }
    Ok(())
}
