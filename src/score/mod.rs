//! Conversion/risk scoring.
//!
//! Scoring is an explicit, auditable rule list, not a trained model: an
//! ordered table of independent predicates over the extracted signals, each
//! contributing score deltas and one categorized factor message (see
//! [`rules`]). Both scores start at a baseline of 50, adjustments compound,
//! and the final values are clamped to [0, 100].

mod rules;

use log::trace;
use serde::Serialize;

use crate::extract::ExtractedSignals;

use rules::{FactorCategory, RULES};

/// Both scores start here before any rule fires.
const BASELINE_SCORE: i32 = 50;
/// Weight of the conversion score in the overall score.
const CONVERSION_WEIGHT: f64 = 0.6;
/// Weight of the inverted risk score in the overall score.
const RISK_WEIGHT: f64 = 0.4;

/// Human-readable scoring factors, grouped by category.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Factors {
    /// Signals that help the offer convert.
    pub positive: Vec<String>,
    /// Signals that hurt conversion or raise risk.
    pub negative: Vec<String>,
    /// Observations worth surfacing without a clear direction.
    pub neutral: Vec<String>,
}

/// The scores derived from one extracted record.
///
/// The overall score is a fixed weighted combination of the other two and is
/// never independently settable:
/// `overall == round(conversion * 0.6 + (100 - risk) * 0.4)`.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreResult {
    /// Conversion potential, in [0, 100].
    pub conversion_score: u8,
    /// Risk, in [0, 100]. Higher is worse.
    pub risk_score: u8,
    /// The fixed weighted combination of the other two.
    pub overall_score: u8,
    /// The factor messages accumulated by the rules that fired.
    pub factors: Factors,
}

/// Scores an extracted record.
///
/// Pure function: evaluates every rule in table order, sums the deltas onto
/// the baselines, collects factor messages, clamps, and derives the overall
/// score.
///
/// # Arguments
///
/// * `signals` - The extracted signal record
pub fn calculate_scores(signals: &ExtractedSignals) -> ScoreResult {
    let mut conversion: i32 = BASELINE_SCORE;
    let mut risk: i32 = BASELINE_SCORE;
    let mut factors = Factors::default();

    for (name, rule) in RULES {
        if let Some(adjustment) = rule(signals) {
            trace!(
                "rule {} fired: conversion {:+}, risk {:+}",
                name,
                adjustment.conversion,
                adjustment.risk
            );
            conversion += adjustment.conversion;
            risk += adjustment.risk;
            match adjustment.category {
                FactorCategory::Positive => factors.positive.push(adjustment.message),
                FactorCategory::Negative => factors.negative.push(adjustment.message),
                FactorCategory::Neutral => factors.neutral.push(adjustment.message),
            }
        }
    }

    let conversion_score = conversion.clamp(0, 100) as u8;
    let risk_score = risk.clamp(0, 100) as u8;
    let overall_score = overall_from(conversion_score, risk_score);

    ScoreResult {
        conversion_score,
        risk_score,
        overall_score,
        factors,
    }
}

/// Derives the overall score from the clamped component scores.
fn overall_from(conversion_score: u8, risk_score: u8) -> u8 {
    let overall = f64::from(conversion_score) * CONVERSION_WEIGHT
        + (100.0 - f64::from(risk_score)) * RISK_WEIGHT;
    overall.round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Platform;

    fn rich_signals() -> ExtractedSignals {
        ExtractedSignals {
            title: Some("Amazing Offer That Converts".to_string()),
            price: Some(97.0),
            original_price: Some(197.0),
            discount_percent: Some(51),
            guarantee_days: Some(30),
            installment_count: Some(3),
            installment_value: Some(32.33),
            platform: Some(Platform::Hotmart),
            has_video: true,
            has_testimonials: true,
            has_faq: true,
            has_countdown: true,
            has_bonuses: true,
            bonus_count: 2,
            page_length: 60_000,
            image_count: 8,
            cta_count: 5,
        }
    }

    #[test]
    fn test_rich_offer_scores_above_baseline() {
        let result = calculate_scores(&rich_signals());
        assert!(result.conversion_score > BASELINE_SCORE as u8);
        assert!(result.risk_score < BASELINE_SCORE as u8);
        assert!(!result.factors.positive.is_empty());
    }

    #[test]
    fn test_guarantee_and_installments_show_up_in_factors() {
        let result = calculate_scores(&rich_signals());
        assert!(result
            .factors
            .positive
            .iter()
            .any(|factor| factor.contains("guarantee")));
        assert!(result
            .factors
            .positive
            .iter()
            .any(|factor| factor.contains("installments")));
    }

    #[test]
    fn test_empty_signals_raise_risk() {
        let result = calculate_scores(&ExtractedSignals::default());
        // No guarantee, no platform, no CTAs, short page: risk compounds.
        assert!(result.risk_score > BASELINE_SCORE as u8);
        assert!(!result.factors.negative.is_empty());
    }

    #[test]
    fn test_signals_compound_independently() {
        // A guarantee of 30 days fires both the trust and the extended rule.
        let signals = ExtractedSignals {
            guarantee_days: Some(30),
            ..Default::default()
        };
        let with_guarantee = calculate_scores(&signals);

        let signals = ExtractedSignals {
            guarantee_days: Some(7),
            ..Default::default()
        };
        let with_short_guarantee = calculate_scores(&signals);

        assert_eq!(
            with_guarantee.conversion_score,
            with_short_guarantee.conversion_score + 5
        );
    }

    #[test]
    fn test_overall_formula_exact() {
        let result = calculate_scores(&rich_signals());
        let expected = (f64::from(result.conversion_score) * 0.6
            + f64::from(100 - result.risk_score) * 0.4)
            .round() as u8;
        assert_eq!(result.overall_score, expected);
    }

    #[test]
    fn test_suspicious_discount_raises_risk() {
        // Base signals keep risk well below the clamp so the delta is exact.
        let mut signals = ExtractedSignals {
            guarantee_days: Some(30),
            platform: Some(Platform::Hotmart),
            cta_count: 4,
            page_length: 10_000,
            ..Default::default()
        };
        let without_discount = calculate_scores(&signals);
        signals.discount_percent = Some(85);
        let with_discount = calculate_scores(&signals);
        assert_eq!(
            with_discount.risk_score,
            without_discount.risk_score + 15
        );
        assert!(with_discount
            .factors
            .negative
            .iter()
            .any(|factor| factor.contains("suspicious")));
    }

    // Property-based tests using proptest
    use proptest::prelude::*;

    fn arbitrary_signals() -> impl Strategy<Value = ExtractedSignals> {
        (
            proptest::option::of(0.0f64..100_000.0),
            proptest::option::of(1u32..365),
            proptest::option::of(1u32..24),
            proptest::option::of(0u8..100),
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            (0usize..100_000, 0usize..30, 0usize..20),
        )
            .prop_map(
                |(
                    price,
                    guarantee,
                    installments,
                    discount,
                    video,
                    testimonials,
                    faq,
                    bonuses,
                    (page_length, image_count, cta_count),
                )| ExtractedSignals {
                    price,
                    guarantee_days: guarantee,
                    installment_count: installments,
                    discount_percent: discount,
                    has_video: video,
                    has_testimonials: testimonials,
                    has_faq: faq,
                    has_bonuses: bonuses,
                    bonus_count: usize::from(bonuses),
                    page_length,
                    image_count,
                    cta_count,
                    ..Default::default()
                },
            )
    }

    proptest! {
        #[test]
        fn test_scores_always_bounded(signals in arbitrary_signals()) {
            let result = calculate_scores(&signals);
            prop_assert!(result.conversion_score <= 100);
            prop_assert!(result.risk_score <= 100);
            prop_assert!(result.overall_score <= 100);
        }

        #[test]
        fn test_overall_always_matches_formula(signals in arbitrary_signals()) {
            let result = calculate_scores(&signals);
            let expected = (f64::from(result.conversion_score) * 0.6
                + f64::from(100 - result.risk_score) * 0.4)
                .round() as u8;
            prop_assert_eq!(result.overall_score, expected);
        }
    }
}
