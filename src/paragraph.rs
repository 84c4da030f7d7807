use lazy_static::lazy_static;
use scraper::{Html, Selector};
use tracing::debug;

lazy_static! {
    static ref PARAGRAPH: Selector = Selector::parse("p").expect("`p` is a valid selector");
}

/// Picks the biography paragraph of a Wikipedia page.
///
/// The first `<p>` whose text contains `birth_year` wins. Without a match the
/// last non-empty paragraph is returned, and an empty string when the page has
/// no paragraph text at all. Text is returned as the parser renders it,
/// citation markers included.
pub fn first_paragraph(html: &str, birth_year: &str) -> String {
    let document = Html::parse_document(html);
    let mut fallback = String::new();

    for element in document.select(&PARAGRAPH) {
        let text: String = element.text().collect();
        if text.is_empty() {
            continue;
        }
        if text.contains(birth_year) {
            debug!(birth_year, "paragraph matched birth year");
            return text;
        }
        fallback = text;
    }

    debug!(birth_year, found = !fallback.is_empty(), "no paragraph matched birth year");
    fallback
}
