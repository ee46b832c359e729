//! Tolerant HTML parsing with a typed query surface.
//!
//! Parsing never fails: html5ever recovers from unterminated tags and bad
//! nesting, and whatever errors it records are dropped after logging. Queries
//! return `Option` for single nodes and `Vec` for node lists, so "not found" is
//! an empty value rather than an error.

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::{debug, trace};

const UTF8_BOM: char = '\u{feff}';

// Bytes scanned for a `<meta>` charset declaration, as browsers do.
const META_PRESCAN_LIMIT: usize = 1024;

static HEADER_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?\s*([A-Za-z0-9._:-]+)"#).unwrap_or_else(|e| panic!("{}", e))
});

// Matches both `<meta charset=..>` and the `http-equiv` content form.
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s[^>]*?charset\s*=\s*["']?\s*([A-Za-z0-9._:-]+)"#)
        .unwrap_or_else(|e| panic!("{}", e))
});

pub struct ParsedDocument {
    html: Html,
}

impl ParsedDocument {
    pub fn parse(html: &str) -> Self {
        let normalized = normalize_input(html);
        let html = Html::parse_document(&normalized);

        if !html.errors.is_empty() {
            trace!("Discarded {} HTML parse errors", html.errors.len());
        }

        Self { html }
    }

    /// Parses raw bytes in whatever encoding their BOM or `<meta>` declares.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::parse(&decode_html(bytes, None))
    }

    pub fn select_first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.html.select(selector).next()
    }

    /// All matches in document order.
    pub fn select_all(&self, selector: &Selector) -> Vec<ElementRef<'_>> {
        self.html.select(selector).collect()
    }
}

/// Decodes a page body to UTF-8.
///
/// The encoding comes from the `Content-Type` charset, then a byte order mark,
/// then a `<meta>` declaration near the top of the document, falling back to
/// UTF-8. Malformed sequences become U+FFFD.
pub fn decode_html(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(charset_from_content_type)
        .or_else(|| Encoding::for_bom(bytes).map(|(encoding, _)| encoding))
        .or_else(|| charset_from_meta(bytes))
        .unwrap_or(UTF_8);

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        debug!("Replaced malformed {} sequences while decoding page", used.name());
    }
    text.into_owned()
}

fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    let label = HEADER_CHARSET.captures(content_type)?.get(1)?;
    Encoding::for_label(label.as_str().as_bytes())
}

fn charset_from_meta(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(META_PRESCAN_LIMIT)];
    let head = String::from_utf8_lossy(head);
    let label = META_CHARSET.captures(&head)?.get(1)?;
    let encoding = Encoding::for_label(label.as_str().as_bytes())?;

    // A document that could be read as ASCII to find this tag is not UTF-16.
    if encoding == UTF_16LE || encoding == UTF_16BE {
        return Some(UTF_8);
    }
    Some(encoding)
}

/// Concatenated text of every descendant text node, untrimmed.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// First direct child element with the given tag name.
pub fn child_element<'a>(element: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .find(|child| child.value().name().eq_ignore_ascii_case(tag))
}

fn normalize_input(html: &str) -> String {
    html.trim_start_matches(UTF8_BOM)
        .chars()
        .filter(|c| *c != '\0')
        .collect()
}
