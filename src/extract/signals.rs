//! Persuasion signals and structural counts.
//!
//! Boolean signals are plain existence tests - matching DOM elements or
//! keyword hits on the lowercased page text - not scored. Counts are raw
//! element tallies.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

static VIDEO_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"video, iframe[src*="youtube"], iframe[src*="vimeo"], [class*="video"]"#)
        .expect("video selector is valid")
});

static COUNTDOWN_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[class*="countdown"], [class*="timer"], [class*="contador"]"#)
        .expect("countdown selector is valid")
});

static IMAGE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img").expect("image selector is valid"));

static CTA_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"button, a[class*="buy"], a[class*="comprar"], [class*="cta"]"#)
        .expect("cta selector is valid")
});

static TESTIMONIALS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"depoimento|testemunho|testimonial|o que.*dizem")
        .expect("testimonials pattern is valid")
});

static FAQ_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"perguntas?\s*frequentes?|faq|dúvidas").expect("faq pattern is valid")
});

static BONUS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"bônus|bonus|brinde|grátis|gratuito").expect("bonus pattern is valid")
});

static NUMBERED_BONUS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"bônus\s*\d+|bonus\s*\d+").expect("numbered bonus pattern is valid"));

/// A sales video or embedded player is present.
pub(super) fn detect_video(document: &Html) -> bool {
    document.select(&VIDEO_SELECTOR).next().is_some()
}

/// An urgency countdown/timer element is present.
pub(super) fn detect_countdown(document: &Html) -> bool {
    document.select(&COUNTDOWN_SELECTOR).next().is_some()
}

/// Testimonials / social proof wording appears in the page text.
pub(super) fn detect_testimonials(lower_text: &str) -> bool {
    TESTIMONIALS_RE.is_match(lower_text)
}

/// FAQ wording appears in the page text.
pub(super) fn detect_faq(lower_text: &str) -> bool {
    FAQ_RE.is_match(lower_text)
}

/// Bonus wording appears in the page text.
pub(super) fn detect_bonuses(lower_text: &str) -> bool {
    BONUS_RE.is_match(lower_text)
}

/// Counts numbered bonus mentions ("bônus 1", "bonus 2", ...).
///
/// Defaults to 1 when bonuses were detected without numbered mentions,
/// else 0.
pub(super) fn count_bonuses(lower_text: &str, has_bonuses: bool) -> usize {
    let numbered = NUMBERED_BONUS_RE.find_iter(lower_text).count();
    if numbered > 0 {
        numbered
    } else if has_bonuses {
        1
    } else {
        0
    }
}

/// Counts image elements.
pub(super) fn count_images(document: &Html) -> usize {
    document.select(&IMAGE_SELECTOR).count()
}

/// Counts buy-button / call-to-action elements.
pub(super) fn count_ctas(document: &Html) -> usize {
    document.select(&CTA_SELECTOR).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_video_by_iframe_source() {
        let html = r#"<html><body>
            <iframe src="https://www.youtube.com/embed/abc123"></iframe>
        </body></html>"#;
        let document = Html::parse_document(html);
        assert!(detect_video(&document));
    }

    #[test]
    fn test_detect_video_absent() {
        let document = Html::parse_document("<html><body><p>texto</p></body></html>");
        assert!(!detect_video(&document));
    }

    #[test]
    fn test_detect_countdown_by_class_substring() {
        let html = r#"<html><body><div class="offer-countdown-box"></div></body></html>"#;
        let document = Html::parse_document(html);
        assert!(detect_countdown(&document));
    }

    #[test]
    fn test_text_signals() {
        assert!(detect_testimonials("veja os depoimentos dos alunos"));
        assert!(detect_testimonials("o que nossos clientes dizem"));
        assert!(detect_faq("perguntas frequentes sobre o curso"));
        assert!(detect_faq("tire suas dúvidas"));
        assert!(detect_bonuses("você ainda leva 3 brindes"));
        assert!(!detect_faq("nenhuma seção relevante aqui"));
    }

    #[test]
    fn test_count_bonuses_numbered_and_default() {
        assert_eq!(count_bonuses("bônus 1: planilha bônus 2: aulas", true), 2);
        assert_eq!(count_bonuses("muitos bônus inclusos", true), 1);
        assert_eq!(count_bonuses("sem nada aqui", false), 0);
    }

    #[test]
    fn test_count_ctas_by_tag_and_class() {
        let html = r##"<html><body>
            <button>Quero agora</button>
            <a class="buy-now" href="#">Comprar</a>
            <div class="cta-wrapper"><a class="comprar-btn" href="#">Garantir vaga</a></div>
        </body></html>"##;
        let document = Html::parse_document(html);
        assert_eq!(count_ctas(&document), 4);
    }
}
