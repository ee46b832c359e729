use async_trait::async_trait;

use crate::models::{AttachmentId, ProductId, ProductRecord};
use crate::utils::error::CatalogError;

/// Trait for the commerce platform that persists imported products.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    /// Backend metadata
    fn name(&self) -> &'static str;

    /// Persists the record's core fields and returns the new product id.
    async fn create_product(&self, record: &ProductRecord) -> Result<ProductId, CatalogError>;

    /// Downloads the image at `image_url` and attaches it to the product.
    async fn attach_image(
        &self,
        product_id: ProductId,
        image_url: &str,
    ) -> Result<AttachmentId, CatalogError>;

    /// Makes an attached image the product's main image.
    async fn set_representative_image(
        &self,
        product_id: ProductId,
        attachment_id: AttachmentId,
    ) -> Result<(), CatalogError>;
}
