//! Guarantee and installment-plan extraction.
//!
//! Both run ordered regex lists over the collapsed page text. The guarantee
//! patterns cover Portuguese and English phrasings; installment plans follow
//! the Brazilian "12x de R$ 9,90" convention.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::{MAX_GUARANTEE_DAYS, MAX_INSTALLMENTS};

use super::price::parse_money;

static GUARANTEE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)garantia\s*(?:de\s*)?(\d+)\s*dias?",
        r"(?i)(\d+)\s*dias?\s*(?:de\s*)?garantia",
        r"(?i)(\d+)\s*days?\s*guarantee",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("guarantee pattern is valid"))
    .collect()
});

static INSTALLMENT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(\d{1,2})x\s*(?:de\s*)?R?\$?\s*([\d.,]+)",
        r"(?i)parcel[ao]s?\s*(?:em\s*)?(\d{1,2})x",
        r"(?i)(\d{1,2})\s*parcelas",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("installment pattern is valid"))
    .collect()
});

/// An installment plan stated on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct InstallmentPlan {
    /// Number of installments, in `[1, 24]`.
    pub count: u32,
    /// Per-installment value, when stated next to the count.
    pub value: Option<f64>,
}

/// Extracts the money-back guarantee period in days.
///
/// Tries each pattern in order; the first capture that parses into
/// `(0, 365]` wins.
///
/// # Arguments
///
/// * `text` - Whitespace-collapsed page text
pub fn extract_guarantee(text: &str) -> Option<u32> {
    for pattern in GUARANTEE_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(text) {
            if let Ok(days) = captures[1].parse::<u32>() {
                if days > 0 && days <= MAX_GUARANTEE_DAYS {
                    return Some(days);
                }
            }
        }
    }
    None
}

/// Extracts the installment plan.
///
/// Tries each pattern in order; the first capture with a count in `[1, 24]`
/// wins. The per-installment value is parsed when the pattern captured one,
/// otherwise left absent.
///
/// # Arguments
///
/// * `text` - Whitespace-collapsed page text
pub fn extract_installments(text: &str) -> Option<InstallmentPlan> {
    for pattern in INSTALLMENT_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(text) {
            if let Ok(count) = captures[1].parse::<u32>() {
                if (1..=MAX_INSTALLMENTS).contains(&count) {
                    let value = captures.get(2).and_then(|m| parse_money(m.as_str()));
                    return Some(InstallmentPlan { count, value });
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guarantee_portuguese_phrasings() {
        assert_eq!(extract_guarantee("garantia de 30 dias"), Some(30));
        assert_eq!(extract_guarantee("garantia 7 dias"), Some(7));
        assert_eq!(extract_guarantee("15 dias de garantia"), Some(15));
    }

    #[test]
    fn test_guarantee_english_phrasing() {
        assert_eq!(extract_guarantee("30 days guarantee"), Some(30));
        assert_eq!(extract_guarantee("1 day guarantee"), Some(1));
    }

    #[test]
    fn test_guarantee_out_of_range_rejected() {
        assert_eq!(extract_guarantee("garantia de 0 dias"), None);
        assert_eq!(extract_guarantee("garantia de 999 dias"), None);
    }

    #[test]
    fn test_installments_with_value() {
        let plan = extract_installments("3x de R$ 32,33").expect("plan");
        assert_eq!(plan.count, 3);
        assert_eq!(plan.value, Some(32.33));
    }

    #[test]
    fn test_installments_count_only() {
        let plan = extract_installments("parcelas em 12x no cartão").expect("plan");
        assert_eq!(plan.count, 12);
        assert_eq!(plan.value, None);

        let plan = extract_installments("ou 6 parcelas sem juros").expect("plan");
        assert_eq!(plan.count, 6);
        assert_eq!(plan.value, None);
    }

    #[test]
    fn test_installments_out_of_range_rejected() {
        assert_eq!(extract_installments("48 parcelas"), None);
    }
}
