//! Price and discount extraction.
//!
//! Prices on Brazilian sales pages come in three shapes, tried in order:
//! symbol-prefixed (`R$ 97,00`), thousands-separated bare numbers
//! (`1.297,00`), and plain decimal-comma numbers (`97,00`). The first match
//! that parses cleanly into the accepted range wins - there is no
//! aggregation across the page.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::config::MAX_PRICE;

static PRICE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    // The bare-number patterns are word-bounded so a partial slice of a
    // larger digit run (e.g. the tail of an out-of-range amount) cannot
    // masquerade as a price of its own.
    [
        r"(?i)R\$\s*[\d.,]+",
        r"\b\d{1,3}(?:\.\d{3})*,\d{2}\b",
        r"\b\d+,\d{2}\b",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("price pattern is valid"))
    .collect()
});

static PRICE_ELEMENT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[class*="price"], [class*="valor"], [class*="preco"]"#)
        .expect("price element selector is valid")
});

static FROM_PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)de\s*R?\$").expect("from-price pattern is valid"));

static ORIGINAL_PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)original").expect("original-price pattern is valid"));

/// Parses a Brazilian-format money string into a float.
///
/// Strips everything but digits and separators, drops `.` thousands
/// separators, and normalizes the decimal comma to a point. Returns `None`
/// when nothing numeric remains or the result is not a finite number.
pub(crate) fn parse_money(raw: &str) -> Option<f64> {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    if digits.is_empty() {
        return None;
    }
    let cleaned = digits.replace('.', "").replace(',', ".");
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Extracts the offer price from page text.
///
/// Tries each currency pattern in order and accepts the first match that
/// parses cleanly into `(0, 100000)`. Out-of-range and unparseable matches
/// are skipped, not aggregated.
///
/// # Arguments
///
/// * `text` - Whitespace-collapsed page text
///
/// # Returns
///
/// The first valid price found, or `None`.
pub fn extract_price(text: &str) -> Option<f64> {
    for pattern in PRICE_PATTERNS.iter() {
        for matched in pattern.find_iter(text) {
            if let Some(value) = parse_money(matched.as_str()) {
                if value > 0.0 && value < MAX_PRICE {
                    return Some(value);
                }
            }
        }
    }
    None
}

/// Extracts the struck-through "from" price and derives the discount.
///
/// Scans elements whose class hints at a price (`price`, `valor`, `preco`)
/// for text that reads like an original price ("de R$ ..." or "original").
/// The first such element whose price is strictly greater than the offer
/// price wins; the discount is `round((original - price) / original * 100)`.
/// With no offer price, or no qualifying element, both stay absent - there
/// is no fallback heuristic.
///
/// # Arguments
///
/// * `document` - The parsed HTML document
/// * `price` - The already-extracted offer price
///
/// # Returns
///
/// `(original_price, discount_percent)`, both absent unless a qualifying
/// strike-through price was found.
pub fn extract_original_price(document: &Html, price: Option<f64>) -> (Option<f64>, Option<u8>) {
    let Some(price) = price else {
        return (None, None);
    };

    for element in document.select(&PRICE_ELEMENT_SELECTOR) {
        let text: String = element.text().collect();
        if !FROM_PRICE_RE.is_match(&text) && !ORIGINAL_PRICE_RE.is_match(&text) {
            continue;
        }
        if let Some(original) = extract_price(&text) {
            if original > price {
                let discount = (((original - price) / original) * 100.0).round() as u8;
                return (Some(original), Some(discount));
            }
        }
    }
    (None, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_money_brazilian_formats() {
        assert_eq!(parse_money("R$ 97,00"), Some(97.0));
        assert_eq!(parse_money("1.297,00"), Some(1297.0));
        assert_eq!(parse_money("32,33"), Some(32.33));
        assert_eq!(parse_money("no digits"), None);
    }

    #[test]
    fn test_extract_price_symbol_prefixed_wins_first() {
        assert_eq!(extract_price("por apenas R$ 97,00 ou 3x de R$ 32,33"), Some(97.0));
    }

    #[test]
    fn test_extract_price_bare_decimal_comma() {
        assert_eq!(extract_price("valor promocional 197,00 hoje"), Some(197.0));
    }

    #[test]
    fn test_extract_price_rejects_out_of_range() {
        // An eight-digit amount is not a plausible price, and its tail must
        // not be re-read as one either.
        assert_eq!(extract_price("R$ 99999999,00"), None);
        assert_eq!(extract_price("R$ 0,00"), None);
    }

    #[test]
    fn test_extract_price_skips_invalid_then_accepts_valid() {
        assert_eq!(
            extract_price("de R$ 99999999,00 por R$ 497,00"),
            Some(497.0)
        );
    }

    #[test]
    fn test_extract_original_price_requires_greater_value() {
        let html = r#"<html><body>
            <div class="price-box"><span>de R$ 197,00</span> por R$ 97,00</div>
        </body></html>"#;
        let document = Html::parse_document(html);
        let (original, discount) = extract_original_price(&document, Some(97.0));
        assert_eq!(original, Some(197.0));
        assert_eq!(discount, Some(51));
    }

    #[test]
    fn test_extract_original_price_ignores_smaller_strikethrough() {
        let html = r#"<html><body>
            <div class="price"><span>de R$ 50,00</span></div>
        </body></html>"#;
        let document = Html::parse_document(html);
        assert_eq!(extract_original_price(&document, Some(97.0)), (None, None));
    }

    #[test]
    fn test_extract_original_price_absent_without_offer_price() {
        let html = r#"<html><body><div class="price">de R$ 197,00</div></body></html>"#;
        let document = Html::parse_document(html);
        assert_eq!(extract_original_price(&document, None), (None, None));
    }
}
