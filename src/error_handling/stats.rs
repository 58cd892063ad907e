//! Processing statistics tracking.
//!
//! This module provides thread-safe statistics tracking for errors, warnings,
//! and informational metrics during URL processing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::{ErrorType, InfoType, WarningType};

/// Thread-safe processing statistics tracker.
///
/// Tracks errors, warnings, and informational metrics using atomic counters,
/// allowing concurrent access from multiple tasks. All types are initialized
/// to zero on creation.
///
/// # Thread Safety
///
/// This struct is thread-safe and can be shared across multiple tasks using `Arc`.
pub struct ProcessingStats {
    errors: HashMap<ErrorType, AtomicUsize>,
    warnings: HashMap<WarningType, AtomicUsize>,
    info: HashMap<InfoType, AtomicUsize>,
}

impl ProcessingStats {
    /// Creates a tracker with every counter initialized to zero.
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for error in ErrorType::iter() {
            errors.insert(error, AtomicUsize::new(0));
        }

        let mut warnings = HashMap::new();
        for warning in WarningType::iter() {
            warnings.insert(warning, AtomicUsize::new(0));
        }

        let mut info = HashMap::new();
        for info_type in InfoType::iter() {
            info.insert(info_type, AtomicUsize::new(0));
        }

        ProcessingStats {
            errors,
            warnings,
            info,
        }
    }

    /// Increment an error counter.
    ///
    /// All error types are initialized in the constructor, so the lookup can
    /// only miss if a variant was added without re-running `new()` - log and
    /// continue rather than panic.
    pub fn increment_error(&self, error: ErrorType) {
        if let Some(counter) = self.errors.get(&error) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment error counter for {:?} which is not in the map.",
                error
            );
        }
    }

    /// Increment a warning counter.
    pub fn increment_warning(&self, warning: WarningType) {
        if let Some(counter) = self.warnings.get(&warning) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment warning counter for {:?} which is not in the map.",
                warning
            );
        }
    }

    /// Increment an info counter.
    pub fn increment_info(&self, info_type: InfoType) {
        if let Some(counter) = self.info.get(&info_type) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment info counter for {:?} which is not in the map.",
                info_type
            );
        }
    }

    /// Get the count for an error type.
    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors
            .get(&error)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get the count for a warning type.
    pub fn get_warning_count(&self, warning: WarningType) -> usize {
        self.warnings
            .get(&warning)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get the count for an info type.
    pub fn get_info_count(&self, info_type: InfoType) -> usize {
        self.info
            .get(&info_type)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_processing_stats_initialization() {
        let stats = ProcessingStats::new();
        for error_type in ErrorType::iter() {
            assert_eq!(stats.get_error_count(error_type), 0);
        }
        for warning_type in WarningType::iter() {
            assert_eq!(stats.get_warning_count(warning_type), 0);
        }
        for info_type in InfoType::iter() {
            assert_eq!(stats.get_info_count(info_type), 0);
        }
    }

    #[test]
    fn test_increment_counters() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::PageUnreachable);
        stats.increment_error(ErrorType::PageUnreachable);
        stats.increment_warning(WarningType::LowConfidence);
        stats.increment_info(InfoType::CacheHit);

        assert_eq!(stats.get_error_count(ErrorType::PageUnreachable), 2);
        assert_eq!(stats.get_warning_count(WarningType::LowConfidence), 1);
        assert_eq!(stats.get_info_count(InfoType::CacheHit), 1);
        assert_eq!(stats.get_error_count(ErrorType::ScrapeApiError), 0);
    }
}
