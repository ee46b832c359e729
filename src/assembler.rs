use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::CatalogBackend;
use crate::config::RepresentativeImage;
use crate::models::{
    AttachmentId, AttributeDescriptor, ExtractedFields, ProductData, ProductId, ProductRecord,
};
use crate::utils::error::ImportError;

/// Outcome of handing a record to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedProduct {
    pub product_id: ProductId,
    pub attached_images: Vec<AttachmentId>,
    pub representative_image: Option<AttachmentId>,
}

/// Builds the canonical record. The shape depends only on whether variations exist.
pub fn assemble(fields: ExtractedFields) -> ProductRecord {
    let ExtractedFields {
        title,
        description,
        price,
        images,
        attributes,
        variations,
    } = fields;

    let product = ProductData {
        name: title,
        description,
        price,
        images,
    };

    if variations.is_empty() {
        return ProductRecord::Simple(product);
    }

    let attributes = attributes
        .into_iter()
        .map(|(name, options)| AttributeDescriptor::for_variation(name, options))
        .collect();

    ProductRecord::Variable {
        product,
        attributes,
        variations,
    }
}

/// Creates the product, then attaches its images in gallery order.
///
/// Only creation can fail the run. A failed image is logged and skipped; the
/// representative image is chosen among the successful attachments by `policy`.
pub async fn publish<B>(
    record: &ProductRecord,
    backend: &B,
    policy: RepresentativeImage,
) -> Result<PublishedProduct, ImportError>
where
    B: CatalogBackend + ?Sized,
{
    let product_id = backend.create_product(record).await.map_err(|e| {
        warn!("Error creating product: {}", e);
        ImportError::from(e)
    })?;
    debug!("Saved {} product {}", record.kind(), product_id);

    let mut attached_images = Vec::new();
    let mut representative_image = None;

    for image_url in record.images() {
        let attachment_id = match backend.attach_image(product_id, image_url).await {
            Ok(id) => id,
            Err(e) => {
                warn!("Skipping image {} for product {}: {}", image_url, product_id, e);
                continue;
            }
        };
        attached_images.push(attachment_id);

        let becomes_representative = match policy {
            RepresentativeImage::First => representative_image.is_none(),
            RepresentativeImage::Last => true,
        };
        if !becomes_representative {
            continue;
        }

        match backend.set_representative_image(product_id, attachment_id).await {
            Ok(()) => representative_image = Some(attachment_id),
            Err(e) => warn!(
                "Could not set image {} as main image of product {}: {}",
                attachment_id, product_id, e
            ),
        }
    }

    Ok(PublishedProduct {
        product_id,
        attached_images,
        representative_image,
    })
}
