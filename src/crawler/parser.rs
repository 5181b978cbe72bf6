//! HTML parser for extracting links and the page title
//!
//! Parsing is best effort: html5ever recovers from malformed markup, so a
//! broken document yields partial or empty results instead of an error.

use scraper::{Html, Selector};

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// The page title (empty if the page has none)
    pub title: String,

    /// Raw `href` values of anchor elements, unresolved, in document order
    pub links: Vec<String>,
}

/// Extracts the title and link targets from a response body
pub trait Extractor: Send + Sync {
    /// Returns the text of the page's `<title>`, or an empty string
    fn extract_title(&self, body: &str) -> String;

    /// Returns the raw `href` of every `<a>` element in document order
    fn extract_links(&self, body: &str) -> Vec<String>;

    /// Extracts both at once
    fn extract(&self, body: &str) -> ParsedPage {
        ParsedPage {
            title: self.extract_title(body),
            links: self.extract_links(body),
        }
    }
}

/// Extractor backed by `scraper`
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlExtractor;

impl Extractor for HtmlExtractor {
    fn extract_title(&self, body: &str) -> String {
        extract_title(&Html::parse_document(body))
    }

    fn extract_links(&self, body: &str) -> Vec<String> {
        extract_links(&Html::parse_document(body))
    }

    fn extract(&self, body: &str) -> ParsedPage {
        parse_html(body)
    }
}

/// Parses HTML content and extracts the title and raw link targets
///
/// # Link Extraction Rules
///
/// Every `<a>` element carrying an `href` contributes its attribute value
/// exactly as written. Nothing is resolved, filtered or deduplicated here:
/// scheme filtering and scope checks belong to the page processor, and the
/// unfiltered count is what a result reports as its link count.
///
/// # Example
///
/// ```
/// use site_crawler::crawler::parse_html;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let parsed = parse_html(html);
/// assert_eq!(parsed.title, "Test");
/// assert_eq!(parsed.links, vec!["/page".to_string()]);
/// ```
pub fn parse_html(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        links: extract_links(&document),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> String {
    let Ok(title_selector) = Selector::parse("title") else {
        return String::new();
    };

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Extracts all anchor targets from the HTML document
fn extract_links(document: &Html) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}
