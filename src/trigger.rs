//! Entry point for callers that start an import from a single `url` parameter.
//!
//! Produces the `{ "success": .., "data": .. }` payload the admin screen expects:
//! the created product id on success, a human-readable reason otherwise.

use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

use crate::catalog::CatalogBackend;
use crate::importer::ProductImporter;
use crate::models::ProductId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutcomeData {
    Created { product_id: ProductId },
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub success: bool,
    pub data: OutcomeData,
}

impl ImportOutcome {
    pub fn created(product_id: ProductId) -> Self {
        Self {
            success: true,
            data: OutcomeData::Created { product_id },
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            data: OutcomeData::Failed(reason.into()),
        }
    }

    pub fn product_id(&self) -> Option<ProductId> {
        match &self.data {
            OutcomeData::Created { product_id } => Some(*product_id),
            OutcomeData::Failed(_) => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match &self.data {
            OutcomeData::Created { .. } => None,
            OutcomeData::Failed(reason) => Some(reason),
        }
    }
}

/// Accepts only absolute http(s) URLs.
pub fn validate_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw.trim()).ok()?;
    match url.scheme() {
        "http" | "https" if url.host().is_some() => Some(url),
        _ => None,
    }
}

pub async fn handle_import<B: CatalogBackend>(
    importer: &ProductImporter<B>,
    url_param: &str,
) -> ImportOutcome {
    let Some(url) = validate_url(url_param) else {
        warn!("Rejected import request with invalid URL: {:?}", url_param);
        return ImportOutcome::failed("Invalid URL");
    };

    importer.run(url.as_str()).await
}
