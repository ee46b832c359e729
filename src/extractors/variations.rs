use scraper::Selector;
use std::sync::LazyLock;

use crate::document::{element_text, ParsedDocument};
use crate::extractors::compile;
use crate::models::VariationOption;

static VARIATION_OPTIONS: LazyLock<Selector> = LazyLock::new(|| {
    compile(r#"form[class="variations_form cart"] select[class="product-variations"] > option"#)
});

/// Selectable options of the variations form. Placeholder options without a value are skipped.
pub fn extract_variations(document: &ParsedDocument) -> Vec<VariationOption> {
    document
        .select_all(&VARIATION_OPTIONS)
        .into_iter()
        .filter_map(|option| {
            let value = option.value().attr("value").unwrap_or_default();
            let label = element_text(option).trim().to_string();
            if value.is_empty() || label.is_empty() {
                return None;
            }
            Some(VariationOption {
                value: value.to_string(),
                label,
            })
        })
        .collect()
}
