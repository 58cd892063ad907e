//! Checkout platform detection.
//!
//! The platform is matched against the URL, not the page markup: checkout
//! domains are a far more reliable signal than anything a page template
//! says about itself. The pattern table is small and closed - extend it by
//! adding entries, never by inferring.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use strum_macros::Display;

/// The checkout platforms this analyzer recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Platform {
    /// hotmart.com and its go/pay subdomains.
    Hotmart,
    /// kiwify.com.br and pay.kiwify.
    Kiwify,
    /// monetizze.com.br and app.monetizze.
    Monetizze,
    /// eduzz.com, sun.eduzz, and the nutror.com member area.
    Eduzz,
    /// braip.com and checkout.braip.
    Braip,
}

static PLATFORM_PATTERNS: LazyLock<Vec<(Platform, Vec<Regex>)>> = LazyLock::new(|| {
    let table: [(Platform, &[&str]); 5] = [
        (
            Platform::Hotmart,
            &[r"hotmart\.com", r"go\.hotmart", r"pay\.hotmart"],
        ),
        (Platform::Kiwify, &[r"kiwify\.com\.br", r"pay\.kiwify"]),
        (
            Platform::Monetizze,
            &[r"monetizze\.com\.br", r"app\.monetizze"],
        ),
        (
            Platform::Eduzz,
            &[r"eduzz\.com", r"sun\.eduzz", r"nutror\.com"],
        ),
        (Platform::Braip, &[r"braip\.com", r"checkout\.braip"]),
    ];
    table
        .into_iter()
        .map(|(platform, patterns)| {
            let compiled = patterns
                .iter()
                .map(|pattern| Regex::new(pattern).expect("platform pattern is valid"))
                .collect();
            (platform, compiled)
        })
        .collect()
});

/// Detects the checkout platform from a URL.
///
/// The URL is lowercased and matched against each platform's patterns in
/// table order; the first matching platform wins.
///
/// # Arguments
///
/// * `url` - The sales-page URL
///
/// # Returns
///
/// The matching [`Platform`], or `None` if no pattern matches.
pub fn detect_platform(url: &str) -> Option<Platform> {
    let lower_url = url.to_lowercase();
    for (platform, patterns) in PLATFORM_PATTERNS.iter() {
        if patterns.iter().any(|pattern| pattern.is_match(&lower_url)) {
            return Some(*platform);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_known_platforms() {
        assert_eq!(
            detect_platform("https://pay.hotmart.com/X12345"),
            Some(Platform::Hotmart)
        );
        assert_eq!(
            detect_platform("https://pay.kiwify.com.br/abc"),
            Some(Platform::Kiwify)
        );
        assert_eq!(
            detect_platform("https://app.monetizze.com.br/r/AAA"),
            Some(Platform::Monetizze)
        );
        assert_eq!(
            detect_platform("https://sun.eduzz.com/12345"),
            Some(Platform::Eduzz)
        );
        assert_eq!(
            detect_platform("https://checkout.braip.com/ref?pl=xyz"),
            Some(Platform::Braip)
        );
    }

    #[test]
    fn test_detect_platform_is_case_insensitive() {
        assert_eq!(
            detect_platform("https://PAY.HOTMART.COM/X12345"),
            Some(Platform::Hotmart)
        );
    }

    #[test]
    fn test_unknown_domain_yields_none() {
        assert_eq!(detect_platform("https://shop.example.com/offer"), None);
    }

    #[test]
    fn test_platform_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Platform::Hotmart).unwrap(),
            "\"hotmart\""
        );
        assert_eq!(Platform::Eduzz.to_string(), "eduzz");
    }
}
