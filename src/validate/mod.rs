//! Extraction validation.
//!
//! The validator is the gate between lossy-tolerant extraction and scoring:
//! it checks the extracted record for completeness and sanity, and produces
//! a confidence score plus hard errors and soft warnings. A record with zero
//! errors but confidence below the threshold is still invalid - both
//! conditions are independently necessary.

use serde::Serialize;

use crate::config::{
    MAX_GUARANTEE_DAYS, MAX_INSTALLMENTS, MIN_CONFIDENCE, MIN_TITLE_CHARS, PLAUSIBLE_PRICE_MAX,
    PLAUSIBLE_PRICE_MIN,
};
use crate::extract::ExtractedSignals;

/// Confidence weight granted per present field. The weights sum to 1.0.
const WEIGHT_TITLE: f64 = 0.25;
const WEIGHT_PRICE: f64 = 0.25;
const WEIGHT_GUARANTEE: f64 = 0.10;
const WEIGHT_INSTALLMENTS: f64 = 0.10;
const WEIGHT_PLATFORM: f64 = 0.10;
const WEIGHT_VIDEO: f64 = 0.05;
const WEIGHT_TESTIMONIALS: f64 = 0.05;
const WEIGHT_FAQ: f64 = 0.05;
const WEIGHT_CTA: f64 = 0.05;

/// Confidence penalty per hard error.
const ERROR_PENALTY: f64 = 0.15;
/// Confidence penalty per soft warning.
const WARNING_PENALTY: f64 = 0.05;

/// Number of fields the completeness tally tracks: title, price, guarantee,
/// installments, platform, original price, discount.
const FIELDS_TRACKED: usize = 7;

/// The validator's verdict on one extracted record.
///
/// Derived purely from [`ExtractedSignals`]; it has no independent identity.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationOutcome {
    /// Whether the record may proceed to scoring.
    pub is_valid: bool,
    /// Confidence in the extraction, clamped to [0, 1].
    pub confidence: f64,
    /// Hard errors: missing or invalid required fields.
    pub errors: Vec<String>,
    /// Soft plausibility warnings; these do not block validity on their own.
    pub warnings: Vec<String>,
    /// How many tracked fields were extracted.
    pub fields_extracted: usize,
    /// How many fields the tally tracks.
    pub fields_required: usize,
}

/// Validates an extracted record.
///
/// Required fields are the title (at least 10 characters) and a positive
/// price; anything else missing only costs confidence. Implausible values
/// (price outside [1, 50000], guarantee outside [1, 365], installments
/// outside [1, 24]) produce warnings without invalidating the record.
///
/// # Arguments
///
/// * `signals` - The extracted signal record
///
/// # Returns
///
/// A [`ValidationOutcome`]; `is_valid` requires zero hard errors AND
/// confidence of at least 0.5.
pub fn validate_signals(signals: &ExtractedSignals) -> ValidationOutcome {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut fields_extracted = 0;

    let title_ok = signals
        .title
        .as_deref()
        .is_some_and(|title| title.chars().count() >= MIN_TITLE_CHARS);
    if title_ok {
        fields_extracted += 1;
    } else {
        errors.push(format!(
            "Title missing or too short (minimum {MIN_TITLE_CHARS} characters)"
        ));
    }

    match signals.price {
        Some(price) if price > 0.0 => {
            fields_extracted += 1;
            if price < PLAUSIBLE_PRICE_MIN {
                warnings.push("Price unusually low, may be incorrect".to_string());
            } else if price > PLAUSIBLE_PRICE_MAX {
                warnings.push("Price unusually high, verify it is correct".to_string());
            }
        }
        _ => errors.push("Price not found or invalid".to_string()),
    }

    if let Some(days) = signals.guarantee_days {
        if days < 1 || days > MAX_GUARANTEE_DAYS {
            warnings.push("Guarantee period has an unusual value".to_string());
        }
        fields_extracted += 1;
    }

    if let Some(count) = signals.installment_count {
        if count < 1 || count > MAX_INSTALLMENTS {
            warnings.push("Installment count has an unusual value".to_string());
        }
        fields_extracted += 1;
    }

    if signals.platform.is_some() {
        fields_extracted += 1;
    }
    if signals.original_price.is_some() {
        fields_extracted += 1;
    }
    if signals.discount_percent.is_some() {
        fields_extracted += 1;
    }

    let confidence = calculate_confidence(signals, &errors, &warnings);
    let is_valid = errors.is_empty() && confidence >= MIN_CONFIDENCE;

    ValidationOutcome {
        is_valid,
        confidence,
        errors,
        warnings,
        fields_extracted,
        fields_required: FIELDS_TRACKED,
    }
}

/// Computes the confidence score for an extracted record.
///
/// Fixed weights are added per present field, then penalties subtracted per
/// error and warning. The raw sum can leave [0, 1] (many warnings push it
/// negative); the final clamp is load-bearing, not cosmetic.
fn calculate_confidence(signals: &ExtractedSignals, errors: &[String], warnings: &[String]) -> f64 {
    let mut score = 0.0;

    if signals
        .title
        .as_deref()
        .is_some_and(|title| title.chars().count() >= MIN_TITLE_CHARS)
    {
        score += WEIGHT_TITLE;
    }
    if signals.price.is_some_and(|price| price > 0.0) {
        score += WEIGHT_PRICE;
    }
    if signals.guarantee_days.is_some_and(|days| days > 0) {
        score += WEIGHT_GUARANTEE;
    }
    if signals.installment_count.is_some_and(|count| count > 0) {
        score += WEIGHT_INSTALLMENTS;
    }
    if signals.platform.is_some() {
        score += WEIGHT_PLATFORM;
    }
    if signals.has_video {
        score += WEIGHT_VIDEO;
    }
    if signals.has_testimonials {
        score += WEIGHT_TESTIMONIALS;
    }
    if signals.has_faq {
        score += WEIGHT_FAQ;
    }
    if signals.cta_count > 0 {
        score += WEIGHT_CTA;
    }

    score -= errors.len() as f64 * ERROR_PENALTY;
    score -= warnings.len() as f64 * WARNING_PENALTY;

    score.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rich_signals() -> ExtractedSignals {
        ExtractedSignals {
            title: Some("Amazing Offer That Converts".to_string()),
            price: Some(97.0),
            guarantee_days: Some(30),
            installment_count: Some(3),
            platform: Some(crate::extract::Platform::Hotmart),
            has_video: true,
            has_testimonials: true,
            has_faq: true,
            cta_count: 4,
            ..Default::default()
        }
    }

    #[test]
    fn test_rich_record_is_valid_with_full_confidence() {
        let outcome = validate_signals(&rich_signals());
        assert!(outcome.is_valid);
        assert!(outcome.errors.is_empty());
        assert!(outcome.warnings.is_empty());
        assert!((outcome.confidence - 1.0).abs() < 1e-9);
        assert_eq!(outcome.fields_extracted, 5);
        assert_eq!(outcome.fields_required, 7);
    }

    #[test]
    fn test_missing_price_is_a_hard_error() {
        let mut signals = rich_signals();
        signals.price = None;
        let outcome = validate_signals(&signals);
        assert!(!outcome.is_valid);
        assert!(outcome
            .errors
            .iter()
            .any(|error| error.contains("Price not found")));
    }

    #[test]
    fn test_short_title_is_a_hard_error() {
        let mut signals = rich_signals();
        signals.title = Some("Short".to_string());
        let outcome = validate_signals(&signals);
        assert!(!outcome.is_valid);
        assert!(outcome.errors.iter().any(|error| error.contains("Title")));
    }

    #[test]
    fn test_implausible_price_warns_without_invalidating() {
        let mut signals = rich_signals();
        signals.price = Some(60_000.0);
        let outcome = validate_signals(&signals);
        assert!(outcome.is_valid);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.confidence < 1.0);
    }

    #[test]
    fn test_zero_errors_but_low_confidence_is_invalid() {
        // Title and price alone give 0.5; knock confidence below the gate
        // with a warning while keeping the error list empty.
        let signals = ExtractedSignals {
            title: Some("Amazing Offer That Converts".to_string()),
            price: Some(0.5),
            ..Default::default()
        };
        let outcome = validate_signals(&signals);
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.confidence < MIN_CONFIDENCE);
        assert!(!outcome.is_valid);
    }

    #[test]
    fn test_gate_monotonicity_on_required_fields() {
        // Adding a missing required field can only move is_valid false->true;
        // removing one can only move it true->false.
        let mut signals = rich_signals();
        signals.title = None;
        let without_title = validate_signals(&signals);
        assert!(!without_title.is_valid);

        signals.title = Some("Amazing Offer That Converts".to_string());
        let with_title = validate_signals(&signals);
        assert!(with_title.is_valid);
        assert!(with_title.confidence >= without_title.confidence);
    }

    #[test]
    fn test_confidence_clamped_under_pathological_warnings() {
        // Bare minimum fields plus implausible values on every optional
        // field: the raw arithmetic goes below the weights sum, but the
        // result stays within [0, 1].
        let signals = ExtractedSignals {
            title: Some("Amazing Offer That Converts".to_string()),
            price: Some(0.01),
            guarantee_days: Some(999),
            installment_count: Some(99),
            ..Default::default()
        };
        let outcome = validate_signals(&signals);
        assert!(outcome.confidence >= 0.0 && outcome.confidence <= 1.0);
        assert_eq!(outcome.warnings.len(), 3);
    }

    // Property-based tests using proptest
    use proptest::prelude::*;

    fn arbitrary_signals() -> impl Strategy<Value = ExtractedSignals> {
        (
            proptest::option::of("[a-zA-Z ]{0,40}"),
            proptest::option::of(0.0f64..200_000.0),
            proptest::option::of(0u32..500),
            proptest::option::of(0u32..50),
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            0usize..20,
        )
            .prop_map(
                |(title, price, guarantee, installments, video, testimonials, faq, ctas)| {
                    ExtractedSignals {
                        title,
                        price,
                        guarantee_days: guarantee,
                        installment_count: installments,
                        has_video: video,
                        has_testimonials: testimonials,
                        has_faq: faq,
                        cta_count: ctas,
                        ..Default::default()
                    }
                },
            )
    }

    proptest! {
        #[test]
        fn test_confidence_always_in_unit_interval(signals in arbitrary_signals()) {
            let outcome = validate_signals(&signals);
            prop_assert!(outcome.confidence >= 0.0);
            prop_assert!(outcome.confidence <= 1.0);
        }

        #[test]
        fn test_valid_implies_no_errors_and_confident(signals in arbitrary_signals()) {
            let outcome = validate_signals(&signals);
            if outcome.is_valid {
                prop_assert!(outcome.errors.is_empty());
                prop_assert!(outcome.confidence >= MIN_CONFIDENCE);
            }
        }
    }
}
