//! Paragraph text extraction
//!
//! The visible text of every `<p>` element is collected in document order,
//! each block followed by a newline. A page with no paragraphs yields an
//! empty string, which is a valid result rather than an error.

use scraper::{Html, Selector};

/// Extracts the concatenated paragraph text from an HTML document
///
/// The text of a paragraph includes the text of all of its descendants
/// (links, emphasis, and so on) exactly as it appears in the markup.
///
/// # Example
///
/// ```
/// use paragraph_crawl::crawler::extract_paragraph_text;
///
/// let html = "<html><body><p>Hello <b>world</b></p><div>skip</div><p>Bye</p></body></html>";
/// assert_eq!(extract_paragraph_text(html), "Hello world\nBye\n");
/// ```
pub fn extract_paragraph_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut text = String::new();

    if let Ok(selector) = Selector::parse("p") {
        for paragraph in document.select(&selector) {
            text.extend(paragraph.text());
            text.push('\n');
        }
    }

    text
}
