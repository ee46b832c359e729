use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tokio::sync::RwLock;

use super::traits::CatalogBackend;
use crate::models::{AttachmentId, ProductId, ProductRecord};
use crate::utils::error::CatalogError;

/// A product as held by [`InMemoryCatalog`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredProduct {
    pub id: ProductId,
    pub record: ProductRecord,
    /// Attachments in the order they were made, with their source URL.
    pub attachments: Vec<(AttachmentId, String)>,
    pub image_id: Option<AttachmentId>,
}

#[derive(Default)]
struct CatalogState {
    next_id: u64,
    products: Vec<StoredProduct>,
}

/// Catalog kept in process memory. Used for dry runs and tests.
#[derive(Default)]
pub struct InMemoryCatalog {
    state: RwLock<CatalogState>,
    unreachable_images: HashSet<String>,
    creation_failure: Option<String>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaching this URL will fail, as if the image could not be downloaded.
    pub fn with_unreachable_image(mut self, url: impl Into<String>) -> Self {
        self.unreachable_images.insert(url.into());
        self
    }

    /// Every product creation will be rejected with `message`.
    pub fn rejecting_products(mut self, message: impl Into<String>) -> Self {
        self.creation_failure = Some(message.into());
        self
    }

    pub async fn get(&self, id: ProductId) -> Option<StoredProduct> {
        let state = self.state.read().await;
        state.products.iter().find(|p| p.id == id).cloned()
    }

    pub async fn products(&self) -> Vec<StoredProduct> {
        self.state.read().await.products.clone()
    }

    fn allocate(state: &mut CatalogState) -> u64 {
        state.next_id += 1;
        state.next_id
    }
}

#[async_trait]
impl CatalogBackend for InMemoryCatalog {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn create_product(&self, record: &ProductRecord) -> Result<ProductId, CatalogError> {
        if let Some(message) = &self.creation_failure {
            return Err(CatalogError::Rejected(message.clone()));
        }

        let mut state = self.state.write().await;
        let id = ProductId(Self::allocate(&mut state));
        state.products.push(StoredProduct {
            id,
            record: record.clone(),
            attachments: Vec::new(),
            image_id: None,
        });
        Ok(id)
    }

    async fn attach_image(
        &self,
        product_id: ProductId,
        image_url: &str,
    ) -> Result<AttachmentId, CatalogError> {
        if self.unreachable_images.contains(image_url) {
            return Err(CatalogError::Rejected(format!(
                "Could not download image {}",
                image_url
            )));
        }

        let mut state = self.state.write().await;
        // Attachments and products share one id sequence, as in WordPress.
        let attachment_id = AttachmentId(Self::allocate(&mut state));
        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| CatalogError::Rejected(format!("Unknown product {}", product_id)))?;
        product.attachments.push((attachment_id, image_url.to_string()));
        Ok(attachment_id)
    }

    async fn set_representative_image(
        &self,
        product_id: ProductId,
        attachment_id: AttachmentId,
    ) -> Result<(), CatalogError> {
        let mut state = self.state.write().await;
        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| CatalogError::Rejected(format!("Unknown product {}", product_id)))?;

        if !product.attachments.iter().any(|(id, _)| *id == attachment_id) {
            return Err(CatalogError::Rejected(format!(
                "Attachment {} does not belong to product {}",
                attachment_id, product_id
            )));
        }

        product.image_id = Some(attachment_id);
        Ok(())
    }
}
