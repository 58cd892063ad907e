//! Statistics printing.

use colored::*;
use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, InfoType, ProcessingStats, WarningType};

/// Prints the nonzero processing counters accumulated during a run.
///
/// Errors are shown in red, warnings in yellow, and informational metrics in
/// plain text. Counters that stayed at zero are omitted to keep the summary
/// short.
///
/// # Arguments
///
/// * `stats` - The processing statistics tracker to summarize
pub fn print_analysis_statistics(stats: &ProcessingStats) {
    let mut printed_any = false;

    for error_type in ErrorType::iter() {
        let count = stats.get_error_count(error_type);
        if count > 0 {
            info!("{}: {}", error_type.as_str().red(), count);
            printed_any = true;
        }
    }

    for warning_type in WarningType::iter() {
        let count = stats.get_warning_count(warning_type);
        if count > 0 {
            info!("{}: {}", warning_type.as_str().yellow(), count);
            printed_any = true;
        }
    }

    for info_type in InfoType::iter() {
        let count = stats.get_info_count(info_type);
        if count > 0 {
            info!("{}: {}", info_type.as_str(), count);
            printed_any = true;
        }
    }

    if !printed_any {
        info!("No errors, warnings, or notable events recorded");
    }
}
