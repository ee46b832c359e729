//! Field extractors for the storefront's product page markup.
//!
//! Each extractor is a free function over a [`ParsedDocument`] and owns its
//! selector, so a markup change on the storefront touches exactly one of them.
//! None of them fail: a missing node yields an empty value.

pub mod attributes;
pub mod images;
pub mod price;
pub mod text;
pub mod variations;

use scraper::Selector;
use tracing::debug;

use crate::document::ParsedDocument;
use crate::models::ExtractedFields;

pub use attributes::extract_attributes;
pub use images::extract_images;
pub use price::{extract_price, latin_digits, normalize_price, price_decimal};
pub use text::{extract_description, extract_title};
pub use variations::extract_variations;

/// Compiles one of the fixed selectors below.
pub(crate) fn compile(css: &'static str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector '{}': {:?}", css, e))
}

/// Runs every extractor; none of them short-circuits the others.
pub fn extract_fields(document: &ParsedDocument) -> ExtractedFields {
    let fields = ExtractedFields {
        title: extract_title(document),
        description: extract_description(document),
        price: extract_price(document),
        images: extract_images(document),
        attributes: extract_attributes(document),
        variations: extract_variations(document),
    };

    debug!(
        title = %fields.title,
        price = %fields.price,
        images = fields.images.len(),
        attributes = fields.attributes.len(),
        variations = fields.variations.len(),
        "Extracted product fields"
    );

    fields
}
