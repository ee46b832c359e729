use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

use crate::document::{child_element, element_text, ParsedDocument};
use crate::extractors::compile;
use crate::models::AttributeMap;

static ATTRIBUTE_ROWS: LazyLock<Selector> = LazyLock::new(|| {
    compile(r#"table[class="woocommerce-product-attributes shop_attributes"] tr"#)
});

// WooCommerce renders multi-valued attributes as "Red, Blue".
static OPTION_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[,|]\s*").unwrap_or_else(|e| panic!("{}", e)));

/// Attribute table rows as name -> options. Rows with a blank name or value are skipped.
pub fn extract_attributes(document: &ParsedDocument) -> AttributeMap {
    let mut attributes = AttributeMap::new();

    for row in document.select_all(&ATTRIBUTE_ROWS) {
        let name = child_element(row, "th")
            .map(element_text)
            .unwrap_or_default();
        let value = child_element(row, "td")
            .map(element_text)
            .unwrap_or_default();

        let name = name.trim();
        let options = split_options(&value);
        if name.is_empty() || options.is_empty() {
            continue;
        }

        // A repeated name keeps only its last row.
        attributes.insert(name.to_string(), options);
    }

    attributes
}

fn split_options(value: &str) -> Vec<String> {
    OPTION_SEPARATOR
        .split(value.trim())
        .map(str::trim)
        .filter(|option| !option.is_empty())
        .map(str::to_string)
        .collect()
}
