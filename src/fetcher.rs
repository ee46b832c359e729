use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

use crate::config::FetcherConfig;
use crate::document::decode_html;
use crate::utils::error::FetchError;

/// HTML of a fetched product page together with the URL it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPage {
    pub url: String,
    pub html: String,
}

/// Single-attempt page fetcher with a bounded timeout and browser identity.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self { client })
    }

    pub async fn fetch(&self, url: &str) -> Result<RawPage, FetchError> {
        info!("Starting import from URL: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Error fetching URL {}: {}", url, e);
            FetchError::Network(e.to_string())
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("Unexpected response code from {}: {}", url, status.as_u16());
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.bytes().await.map_err(|e| {
            warn!("Error reading body from {}: {}", url, e);
            FetchError::Network(e.to_string())
        })?;

        if body.is_empty() {
            warn!("Empty content received from URL {}", url);
            return Err(FetchError::EmptyBody);
        }

        // The parser always sees UTF-8, whatever the page was served in.
        let html = decode_html(&body, content_type.as_deref());

        Ok(RawPage {
            url: url.to_string(),
            html,
        })
    }
}
