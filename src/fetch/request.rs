//! HTTP request building for the direct-GET fallback.
//!
//! Checkout and sales pages are aggressive about blocking non-browser
//! traffic, so the fallback request carries realistic browser headers and a
//! user agent rotated per request from a small fixed pool.

use rand::prelude::*;

use crate::config::USER_AGENTS;

/// Picks a random browser identity from the fixed pool.
pub(crate) fn random_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

/// Realistic browser request headers for the fallback GET.
///
/// Accept-Language leads with pt-BR because the target pages are Brazilian
/// info-product offers; a pt-first browser profile draws less bot-detection
/// attention there than an en-only one.
pub(crate) struct RequestHeaders;

impl RequestHeaders {
    /// Applies the standard request headers to a `reqwest::RequestBuilder`.
    pub(crate) fn apply_to_request_builder(
        builder: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        builder
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            )
            .header(
                reqwest::header::ACCEPT_LANGUAGE,
                "pt-BR,pt;q=0.9,en-US;q=0.8,en;q=0.7",
            )
            .header(reqwest::header::ACCEPT_ENCODING, "gzip, deflate, br")
            .header(reqwest::header::UPGRADE_INSECURE_REQUESTS, "1")
            .header(reqwest::header::CACHE_CONTROL, "max-age=0")
    }
}
