use scraper::Selector;
use std::sync::LazyLock;

use crate::document::ParsedDocument;
use crate::extractors::compile;

static GALLERY_IMAGES: LazyLock<Selector> = LazyLock::new(|| {
    compile(r#"figure[class="woocommerce-product-gallery__image"] img[src]"#)
});

/// Gallery image sources in document order; the first one is the gallery's primary image.
pub fn extract_images(document: &ParsedDocument) -> Vec<String> {
    document
        .select_all(&GALLERY_IMAGES)
        .into_iter()
        .filter_map(|img| img.value().attr("src"))
        .map(str::to_string)
        .collect()
}
