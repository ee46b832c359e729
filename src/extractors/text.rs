use scraper::Selector;
use std::sync::LazyLock;
use tracing::warn;

use crate::document::{element_text, ParsedDocument};
use crate::extractors::compile;

static TITLE: LazyLock<Selector> = LazyLock::new(|| compile(r#"h1[class*="product_title"]"#));
static DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| compile("div#tab-description"));

/// Text of the first product-title heading, trimmed. Empty when absent.
pub fn extract_title(document: &ParsedDocument) -> String {
    match document.select_first(&TITLE) {
        Some(node) => element_text(node).trim().to_string(),
        None => {
            warn!("Product title not found");
            String::new()
        }
    }
}

/// Text content of the description tab, trimmed. Empty when absent.
pub fn extract_description(document: &ParsedDocument) -> String {
    document
        .select_first(&DESCRIPTION)
        .map(|node| element_text(node).trim().to_string())
        .unwrap_or_default()
}
