//! The scoring rule table.
//!
//! Each rule is an independent predicate over the extracted signals that may
//! produce one [`Adjustment`]: a pair of score deltas plus a categorized,
//! human-readable factor message. Rules are evaluated in table order and are
//! not mutually exclusive - signals compound.
//!
//! The numeric thresholds are domain tuning constants carried over from the
//! operators' field experience with Brazilian info-product offers. They have
//! no derivation; change them here if the market moves.

use crate::extract::ExtractedSignals;

/// Price band considered the conversion sweet spot (inclusive).
const PRICE_SWEET_SPOT_MIN: f64 = 47.0;
const PRICE_SWEET_SPOT_MAX: f64 = 497.0;
/// Prices above this are treated as high-ticket.
const PRICE_HIGH_TICKET: f64 = 997.0;
/// Guarantee length that starts building trust.
const GUARANTEE_TRUST_DAYS: u32 = 7;
/// Guarantee length considered extended.
const GUARANTEE_EXTENDED_DAYS: u32 = 30;
/// Minimum installment count that meaningfully eases purchase.
const INSTALLMENTS_EASING_MIN: u32 = 3;
/// Discount band that reads as genuine urgency (inclusive).
const DISCOUNT_URGENCY_MIN: u8 = 10;
const DISCOUNT_URGENCY_MAX: u8 = 50;
/// Discounts above this read as suspicious.
const DISCOUNT_SUSPICIOUS: u8 = 70;
/// CTA count above which the page counts as multi-CTA.
const MULTI_CTA: usize = 3;
/// Image count above which the page counts as visually rich.
const RICH_IMAGE_COUNT: usize = 5;
/// Raw HTML length above which the page counts as long copy.
const LONG_PAGE_LENGTH: usize = 50_000;
/// Raw HTML length below which the page counts as suspiciously thin.
const SHORT_PAGE_LENGTH: usize = 5_000;

/// Which factor list a rule's message lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FactorCategory {
    Positive,
    Negative,
    Neutral,
}

/// One rule's contribution to the scores.
pub(super) struct Adjustment {
    /// Delta applied to the conversion score.
    pub conversion: i32,
    /// Delta applied to the risk score.
    pub risk: i32,
    /// Which factor list the message belongs to.
    pub category: FactorCategory,
    /// The human-readable explanation for this adjustment.
    pub message: String,
}

impl Adjustment {
    fn positive(conversion: i32, risk: i32, message: impl Into<String>) -> Self {
        Adjustment {
            conversion,
            risk,
            category: FactorCategory::Positive,
            message: message.into(),
        }
    }

    fn negative(conversion: i32, risk: i32, message: impl Into<String>) -> Self {
        Adjustment {
            conversion,
            risk,
            category: FactorCategory::Negative,
            message: message.into(),
        }
    }

    fn neutral(conversion: i32, risk: i32, message: impl Into<String>) -> Self {
        Adjustment {
            conversion,
            risk,
            category: FactorCategory::Neutral,
            message: message.into(),
        }
    }
}

type Rule = fn(&ExtractedSignals) -> Option<Adjustment>;

/// The ordered rule table. Every rule fires independently of the others.
pub(super) const RULES: &[(&str, Rule)] = &[
    ("price_band", price_band),
    ("guarantee_trust", guarantee_trust),
    ("guarantee_extended", guarantee_extended),
    ("guarantee_missing", guarantee_missing),
    ("installment_easing", installment_easing),
    ("discount_band", discount_band),
    ("video_presence", video_presence),
    ("testimonials", testimonials),
    ("faq", faq),
    ("countdown", countdown),
    ("bonuses", bonuses),
    ("cta_density", cta_density),
    ("platform_recognition", platform_recognition),
    ("image_richness", image_richness),
    ("page_length", page_length),
];

fn price_band(signals: &ExtractedSignals) -> Option<Adjustment> {
    let price = signals.price?;
    if (PRICE_SWEET_SPOT_MIN..=PRICE_SWEET_SPOT_MAX).contains(&price) {
        Some(Adjustment::positive(
            10,
            0,
            "Price in the ideal conversion band",
        ))
    } else if price < PRICE_SWEET_SPOT_MIN {
        Some(Adjustment::neutral(
            5,
            0,
            "Low price may mean a smaller ticket",
        ))
    } else if price > PRICE_HIGH_TICKET {
        Some(Adjustment::negative(0, 10, "High price may reduce conversions"))
    } else {
        None
    }
}

fn guarantee_trust(signals: &ExtractedSignals) -> Option<Adjustment> {
    let days = signals.guarantee_days?;
    if days >= GUARANTEE_TRUST_DAYS {
        Some(Adjustment::positive(
            15,
            -10,
            format!("{days}-day guarantee builds trust"),
        ))
    } else {
        None
    }
}

fn guarantee_extended(signals: &ExtractedSignals) -> Option<Adjustment> {
    let days = signals.guarantee_days?;
    if days >= GUARANTEE_EXTENDED_DAYS {
        Some(Adjustment::positive(5, 0, "Extended guarantee is excellent"))
    } else {
        None
    }
}

fn guarantee_missing(signals: &ExtractedSignals) -> Option<Adjustment> {
    if signals.guarantee_days.is_none() {
        Some(Adjustment::negative(
            0,
            15,
            "No guarantee visible on the page",
        ))
    } else {
        None
    }
}

fn installment_easing(signals: &ExtractedSignals) -> Option<Adjustment> {
    let count = signals.installment_count?;
    if count >= INSTALLMENTS_EASING_MIN {
        Some(Adjustment::positive(
            10,
            0,
            format!("Payment in {count}x installments eases purchase"),
        ))
    } else {
        None
    }
}

fn discount_band(signals: &ExtractedSignals) -> Option<Adjustment> {
    let discount = signals.discount_percent?;
    if discount == 0 {
        None
    } else if (DISCOUNT_URGENCY_MIN..=DISCOUNT_URGENCY_MAX).contains(&discount) {
        Some(Adjustment::positive(
            10,
            0,
            format!("{discount}% discount can add urgency"),
        ))
    } else if discount > DISCOUNT_SUSPICIOUS {
        Some(Adjustment::negative(
            0,
            15,
            "Very high discount may look suspicious",
        ))
    } else {
        None
    }
}

fn video_presence(signals: &ExtractedSignals) -> Option<Adjustment> {
    if signals.has_video {
        Some(Adjustment::positive(15, 0, "Sales video present"))
    } else {
        Some(Adjustment::neutral(0, 0, "No sales video detected"))
    }
}

fn testimonials(signals: &ExtractedSignals) -> Option<Adjustment> {
    if signals.has_testimonials {
        Some(Adjustment::positive(
            10,
            -5,
            "Testimonials/social proof present",
        ))
    } else {
        None
    }
}

fn faq(signals: &ExtractedSignals) -> Option<Adjustment> {
    if signals.has_faq {
        Some(Adjustment::positive(5, -5, "FAQ section present"))
    } else {
        None
    }
}

fn countdown(signals: &ExtractedSignals) -> Option<Adjustment> {
    if signals.has_countdown {
        Some(Adjustment::neutral(5, 0, "Urgency countdown detected"))
    } else {
        None
    }
}

fn bonuses(signals: &ExtractedSignals) -> Option<Adjustment> {
    if signals.has_bonuses {
        Some(Adjustment::positive(
            10,
            0,
            format!("Bonuses offered ({} detected)", signals.bonus_count),
        ))
    } else {
        None
    }
}

fn cta_density(signals: &ExtractedSignals) -> Option<Adjustment> {
    if signals.cta_count > MULTI_CTA {
        Some(Adjustment::positive(5, 0, "Multiple CTAs on the page"))
    } else if signals.cta_count == 0 {
        Some(Adjustment::negative(0, 10, "Few or no CTAs detected"))
    } else {
        None
    }
}

fn platform_recognition(signals: &ExtractedSignals) -> Option<Adjustment> {
    match signals.platform {
        Some(platform) => Some(Adjustment::positive(
            0,
            -10,
            format!("Known checkout platform: {platform}"),
        )),
        None => Some(Adjustment::negative(
            0,
            10,
            "Checkout platform not identified",
        )),
    }
}

fn image_richness(signals: &ExtractedSignals) -> Option<Adjustment> {
    if signals.image_count > RICH_IMAGE_COUNT {
        Some(Adjustment::positive(5, 0, "Image-rich page"))
    } else {
        None
    }
}

fn page_length(signals: &ExtractedSignals) -> Option<Adjustment> {
    if signals.page_length > LONG_PAGE_LENGTH {
        Some(Adjustment::neutral(5, 0, "Long page (detailed copy)"))
    } else if signals.page_length < SHORT_PAGE_LENGTH {
        Some(Adjustment::negative(0, 10, "Page is very short"))
    } else {
        None
    }
}
