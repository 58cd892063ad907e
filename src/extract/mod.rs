//! Signal extraction from sales-page markup.
//!
//! This module turns raw HTML into a fixed [`ExtractedSignals`] record:
//! price and discount, guarantee period, installment plan, checkout
//! platform, persuasion signals (video, testimonials, FAQ, countdown,
//! bonuses), and structural counts.
//!
//! Extraction is a deterministic, pure function of its inputs and never
//! fails: the parser is lenient, and any field it cannot find is simply left
//! absent. All "is this enough signal" judgment lives in the validator.
//!
//! All parsing is done using CSS selectors via the `scraper` crate plus
//! ordered regex lists over the page's collapsed body text.

mod offer_terms;
mod platform;
mod price;
mod signals;
mod title;

use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde::Serialize;

// Re-export public API
pub use offer_terms::{extract_guarantee, extract_installments, InstallmentPlan};
pub use platform::{detect_platform, Platform};
pub use price::extract_price;
pub use title::extract_title;

static BODY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("body selector is valid"));

/// The structured signal record extracted from one sales page.
///
/// Created once per pipeline run and immutable afterward. Every numeric
/// field is either a domain-valid value or `None` - never NaN, never
/// negative where semantically impossible.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractedSignals {
    /// Page or product title (10–200 characters), if found.
    pub title: Option<String>,
    /// Offer price, first valid currency match on the page.
    pub price: Option<f64>,
    /// Struck-through "from" price, when greater than the offer price.
    pub original_price: Option<f64>,
    /// Discount percent derived from `original_price` vs `price`.
    pub discount_percent: Option<u8>,
    /// Money-back guarantee period in days.
    pub guarantee_days: Option<u32>,
    /// Number of installments offered.
    pub installment_count: Option<u32>,
    /// Per-installment value, when stated next to the count.
    pub installment_value: Option<f64>,
    /// Recognized checkout platform, detected from the URL.
    pub platform: Option<Platform>,
    /// A sales video or embedded player is present.
    pub has_video: bool,
    /// Testimonials / social proof wording is present.
    pub has_testimonials: bool,
    /// An FAQ section is present.
    pub has_faq: bool,
    /// An urgency countdown/timer element is present.
    pub has_countdown: bool,
    /// Bonus offers are mentioned.
    pub has_bonuses: bool,
    /// Number of numbered bonus mentions (1 if bonuses exist unnumbered).
    pub bonus_count: usize,
    /// Length of the raw HTML. A deliberate proxy for page richness -
    /// markup weight, not visible text.
    pub page_length: usize,
    /// Number of image elements.
    pub image_count: usize,
    /// Number of buy-button / call-to-action elements.
    pub cta_count: usize,
}

/// Extracts the full signal record from a page.
///
/// # Arguments
///
/// * `html` - The raw HTML markup
/// * `source_url` - The (normalized) URL the page came from; used for
///   platform detection only
///
/// # Returns
///
/// An [`ExtractedSignals`] record. Fields that cannot be found are absent;
/// this function does not fail on malformed markup.
pub fn extract_signals(html: &str, source_url: &str) -> ExtractedSignals {
    let document = Html::parse_document(html);

    // Collapse the body text to single-spaced tokens so the regex passes see
    // "R$ 97,00" even when the markup splits it across inline elements.
    let body_text = document
        .select(&BODY_SELECTOR)
        .next()
        .map(|body| body.text().collect::<String>())
        .unwrap_or_default();
    let body_text = body_text.split_whitespace().collect::<Vec<_>>().join(" ");
    let lower_text = body_text.to_lowercase();

    let title = title::extract_title(&document);
    let price = price::extract_price(&body_text);
    let (original_price, discount_percent) = price::extract_original_price(&document, price);
    let guarantee_days = offer_terms::extract_guarantee(&body_text);
    let installments = offer_terms::extract_installments(&body_text);

    let has_bonuses = signals::detect_bonuses(&lower_text);

    ExtractedSignals {
        title,
        price,
        original_price,
        discount_percent,
        guarantee_days,
        installment_count: installments.as_ref().map(|plan| plan.count),
        installment_value: installments.as_ref().and_then(|plan| plan.value),
        platform: platform::detect_platform(source_url),
        has_video: signals::detect_video(&document),
        has_testimonials: signals::detect_testimonials(&lower_text),
        has_faq: signals::detect_faq(&lower_text),
        has_countdown: signals::detect_countdown(&document),
        has_bonuses,
        bonus_count: signals::count_bonuses(&lower_text, has_bonuses),
        page_length: html.len(),
        image_count: signals::count_images(&document),
        cta_count: signals::count_ctas(&document),
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
