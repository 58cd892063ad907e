//! URL validation, normalization, and fingerprinting utilities.
//!
//! Two URLs that differ only by tracking parameters, a trailing slash, or a
//! fragment must map to the same normalized form, and therefore to the same
//! fingerprint. The fingerprint is the cache/history key for an analysis.

use log::warn;
use sha2::{Digest, Sha256};

use crate::config::{FINGERPRINT_LENGTH, MAX_URL_LENGTH, TRACKING_PARAMS};

fn is_tracking_param(name: &str) -> bool {
    name.starts_with("utm_") || TRACKING_PARAMS.contains(&name)
}

/// Normalizes a URL for fingerprinting and fetching.
///
/// Strips the fragment, removes tracking query parameters (`utm_*`, `fbclid`,
/// `gclid`, `ref`, `src`), and removes a trailing slash. Malformed URLs are
/// returned unchanged - normalization fails safe rather than erroring, and
/// callers must tolerate fingerprints computed from non-canonical input.
///
/// # Arguments
///
/// * `url` - The URL string to normalize
///
/// # Returns
///
/// The normalized URL, or the input string unchanged if it does not parse.
pub fn normalize_url(url: &str) -> String {
    let Ok(mut parsed) = url::Url::parse(url) else {
        return url.to_string();
    };

    parsed.set_fragment(None);

    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(name, _)| !is_tracking_param(name))
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();
    if kept.is_empty() {
        parsed.set_query(None);
    } else {
        let mut pairs = parsed.query_pairs_mut();
        pairs.clear();
        for (name, value) in &kept {
            pairs.append_pair(name, value);
        }
    }

    let mut normalized = parsed.to_string();
    if normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

/// Computes the deterministic fingerprint of a URL.
///
/// The fingerprint is the first [`FINGERPRINT_LENGTH`] hex characters of the
/// SHA-256 digest of the normalized URL. It is a pure function of the
/// normalized form: URLs differing only by tracking parameters, trailing
/// slash, or fragment fingerprint identically.
///
/// # Arguments
///
/// * `url` - The URL to fingerprint (normalized internally)
///
/// # Returns
///
/// A fixed-length lowercase hex string used as the cache/history key.
pub fn fingerprint_url(url: &str) -> String {
    let normalized = normalize_url(url);
    let digest = Sha256::digest(normalized.as_bytes());
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        hex.push_str(&format!("{byte:02x}"));
    }
    hex.truncate(FINGERPRINT_LENGTH);
    hex
}

/// Checks whether a URL can be fetched at all.
///
/// A fetchable URL parses, uses the http or https scheme, and has a host.
/// The pipeline rejects anything else before making a network call.
pub fn is_fetchable_url(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some()
        }
        Err(_) => false,
    }
}

/// Validates and normalizes a URL supplied on the command line.
///
/// Adds an https:// prefix if missing, then validates that the URL is
/// syntactically valid and uses an http/https scheme. Rejects URLs longer
/// than [`MAX_URL_LENGTH`] to prevent DoS. Logs a warning and returns `None`
/// if the URL is invalid, too long, or uses an unsupported scheme.
///
/// # Arguments
///
/// * `url` - The URL string to validate and normalize
///
/// # Returns
///
/// `Some(normalized_url)` if the URL should be processed, `None` otherwise.
pub fn validate_and_normalize_url(url: &str) -> Option<String> {
    if url.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping URL exceeding maximum length ({} > {}): {}...",
            url.len(),
            MAX_URL_LENGTH,
            &url[..50.min(url.len())]
        );
        return None;
    }

    let prefixed = if !url.starts_with("http://") && !url.starts_with("https://") {
        format!("https://{url}")
    } else {
        url.to_string()
    };

    if prefixed.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping normalized URL exceeding maximum length ({} > {})",
            prefixed.len(),
            MAX_URL_LENGTH
        );
        return None;
    }

    if !is_fetchable_url(&prefixed) {
        warn!("Skipping invalid URL: {url}");
        return None;
    }

    Some(normalize_url(&prefixed))
}
