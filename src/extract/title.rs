//! Title extraction.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::config::{MAX_TITLE_CHARS, MIN_TITLE_CHARS};

/// Candidate selectors in priority order: specific product-title classes
/// first, then generic headings, then the document title, then Open Graph.
/// The last entry is a meta tag whose `content` attribute holds the text.
const TITLE_SELECTOR_STRS: [(&str, bool); 6] = [
    ("h1.product-title", false),
    (r#"h1[class*="title"]"#, false),
    (".product-name h1", false),
    ("h1", false),
    ("title", false),
    (r#"meta[property="og:title"]"#, true),
];

static TITLE_SELECTORS: LazyLock<Vec<(Selector, bool)>> = LazyLock::new(|| {
    TITLE_SELECTOR_STRS
        .iter()
        .map(|(selector_str, is_meta)| {
            (
                Selector::parse(selector_str).expect("title selector is valid"),
                *is_meta,
            )
        })
        .collect()
});

/// Extracts the page title.
///
/// Tries each candidate selector in priority order and accepts the first
/// whose trimmed text is at least [`MIN_TITLE_CHARS`] characters, truncated
/// to [`MAX_TITLE_CHARS`]. Short candidates (like a bare `<title>Page</title>`)
/// are passed over rather than accepted.
///
/// # Arguments
///
/// * `document` - The parsed HTML document
///
/// # Returns
///
/// The title, or `None` if no candidate met the length bar.
pub fn extract_title(document: &Html) -> Option<String> {
    for (selector, is_meta) in TITLE_SELECTORS.iter() {
        let candidate = if *is_meta {
            document
                .select(selector)
                .next()
                .and_then(|element| element.value().attr("content").map(str::to_string))
        } else {
            document
                .select(selector)
                .next()
                .map(|element| element.text().collect::<String>())
        };

        if let Some(raw) = candidate {
            let trimmed = raw.trim();
            if trimmed.chars().count() >= MIN_TITLE_CHARS {
                return Some(trimmed.chars().take(MAX_TITLE_CHARS).collect());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_title_class_preferred_over_h1() {
        let html = r#"<html><body>
            <h1>Some Generic Headline Here</h1>
            <h1 class="product-title">Amazing Offer That Converts</h1>
        </body></html>"#;
        let document = Html::parse_document(html);
        assert_eq!(
            extract_title(&document),
            Some("Amazing Offer That Converts".to_string())
        );
    }

    #[test]
    fn test_short_candidates_are_passed_over() {
        let html = r#"<html><head><title>Page</title></head><body>
            <h1>Short</h1>
            <meta property="og:title" content="A Sufficiently Long Social Title">
        </body></html>"#;
        let document = Html::parse_document(html);
        assert_eq!(
            extract_title(&document),
            Some("A Sufficiently Long Social Title".to_string())
        );
    }

    #[test]
    fn test_no_candidate_meets_length_bar() {
        let html = "<html><head><title>Page</title></head><body><h1>Hi</h1></body></html>";
        let document = Html::parse_document(html);
        assert_eq!(extract_title(&document), None);
    }

    #[test]
    fn test_title_truncated_to_limit() {
        let long = "x".repeat(500);
        let html = format!("<html><body><h1>{long}</h1></body></html>");
        let document = Html::parse_document(&html);
        let title = extract_title(&document).expect("title");
        assert_eq!(title.chars().count(), MAX_TITLE_CHARS);
    }
}
