//! WooCommerce REST backend.
//!
//! Products go through `wc/v3/products`. Images are downloaded and uploaded to
//! the WordPress media library (`wp/v2/media`) with the product as parent,
//! which is what sideloading does inside WordPress. Both APIs accept Basic
//! auth with an application password.

use async_trait::async_trait;
use percent_encoding::percent_decode_str;
use regex::Regex;
use reqwest::{header, Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;

use super::traits::CatalogBackend;
use crate::config::CatalogConfig;
use crate::extractors::{latin_digits, price_decimal};
use crate::models::{AttachmentId, ProductId, ProductRecord};
use crate::utils::error::CatalogError;

static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._-]+").unwrap_or_else(|e| panic!("{}", e)));

#[derive(Debug, Serialize)]
struct ProductPayload<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    status: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    regular_price: Option<String>,
    attributes: Vec<AttributePayload<'a>>,
}

#[derive(Debug, Serialize)]
struct AttributePayload<'a> {
    name: &'a str,
    options: &'a [String],
    visible: bool,
    variation: bool,
}

#[derive(Debug, Deserialize)]
struct CreatedResource {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

pub struct WooCommerceCatalog {
    client: Client,
    base_url: String,
    username: String,
    password: String,
    product_status: String,
}

impl WooCommerceCatalog {
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let base_url = config
            .base_url
            .as_deref()
            .ok_or_else(|| CatalogError::Rejected("Catalog base_url is not configured".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            username: config.username.clone().unwrap_or_default(),
            password: config.application_password.clone().unwrap_or_default(),
            product_status: config.product_status.clone(),
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.username, Some(&self.password))
    }

    fn product_payload<'a>(&'a self, record: &'a ProductRecord) -> ProductPayload<'a> {
        let product = record.product();
        ProductPayload {
            name: &product.name,
            kind: record.kind(),
            status: &self.product_status,
            description: &product.description,
            // The store only accepts Latin digits; an unparsable price is left unset.
            regular_price: price_decimal(&product.price).map(|_| latin_digits(&product.price)),
            attributes: record
                .attributes()
                .iter()
                .map(|attribute| AttributePayload {
                    name: &attribute.name,
                    options: &attribute.options,
                    visible: attribute.visible,
                    variation: attribute.used_for_variation,
                })
                .collect(),
        }
    }

    async fn read_created(response: Response) -> Result<u64, CatalogError> {
        let response = Self::check_status(response).await?;
        let created: CreatedResource = response
            .json()
            .await
            .map_err(|e| CatalogError::InvalidResponse(e.to_string()))?;
        Ok(created.id)
    }

    async fn check_status(response: Response) -> Result<Response, CatalogError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|e| e.message)
            .unwrap_or_else(|_| format!("Unexpected HTTP status {} from catalog", status.as_u16()));

        Err(CatalogError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// File name for an uploaded image, derived from the last path segment of its URL.
fn image_filename(image_url: &str) -> String {
    let segment = url::Url::parse(image_url)
        .ok()
        .and_then(|url| {
            url.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .unwrap_or_default();
    let segment = percent_decode_str(&segment).decode_utf8_lossy();

    let sanitized = UNSAFE_FILENAME_CHARS.replace_all(&segment, "-");
    let sanitized = sanitized.trim_matches('-');
    if sanitized.is_empty() {
        "image".to_string()
    } else {
        sanitized.to_string()
    }
}

#[async_trait]
impl CatalogBackend for WooCommerceCatalog {
    fn name(&self) -> &'static str {
        "woocommerce"
    }

    async fn create_product(&self, record: &ProductRecord) -> Result<ProductId, CatalogError> {
        let url = format!("{}/wp-json/wc/v3/products", self.base_url);
        let response = self
            .authorized(self.client.post(&url))
            .json(&self.product_payload(record))
            .send()
            .await?;

        let id = Self::read_created(response).await?;
        debug!("Created {} product {}", record.kind(), id);
        Ok(ProductId(id))
    }

    async fn attach_image(
        &self,
        product_id: ProductId,
        image_url: &str,
    ) -> Result<AttachmentId, CatalogError> {
        let download = self.client.get(image_url).send().await?;
        if !download.status().is_success() {
            return Err(CatalogError::Rejected(format!(
                "Could not download image {}: HTTP {}",
                image_url,
                download.status().as_u16()
            )));
        }

        let content_type = download
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = download.bytes().await?;

        let url = format!("{}/wp-json/wp/v2/media", self.base_url);
        let response = self
            .authorized(self.client.post(&url))
            .query(&[("post", product_id.0)])
            .header(header::CONTENT_TYPE, content_type)
            .header(
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", image_filename(image_url)),
            )
            .body(bytes)
            .send()
            .await?;

        let id = Self::read_created(response).await?;
        Ok(AttachmentId(id))
    }

    async fn set_representative_image(
        &self,
        product_id: ProductId,
        attachment_id: AttachmentId,
    ) -> Result<(), CatalogError> {
        let url = format!("{}/wp-json/wc/v3/products/{}", self.base_url, product_id);
        let response = self
            .authorized(self.client.put(&url))
            .json(&serde_json::json!({ "images": [{ "id": attachment_id.0 }] }))
            .send()
            .await?;

        Self::check_status(response).await?;
        Ok(())
    }
}
