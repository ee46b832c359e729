use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use url::Url;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub fetcher: FetcherConfig,
    pub catalog: CatalogConfig,
    pub import: ImportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Seconds before a page fetch is abandoned.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Connection settings for the WooCommerce store receiving imported products.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub application_password: Option<String>,
    pub product_status: String,
    pub request_timeout: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            username: None,
            application_password: None,
            product_status: "publish".to_string(),
            request_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    pub representative_image: RepresentativeImage,
    /// Enables verbose diagnostics for import runs.
    pub debug: bool,
}

/// Which successfully attached gallery image becomes the product's main image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepresentativeImage {
    #[default]
    First,
    Last,
}

impl AppConfig {
    pub fn from_env() -> crate::Result<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add local config (ignored by git)
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("IMPORTER").separator("__"))
            .build()?;

        let config: AppConfig = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a single explicit config file, still allowing env overrides.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let s = Config::builder()
            .add_source(File::from(path))
            .add_source(Environment::with_prefix("IMPORTER").separator("__"))
            .build()?;

        let config: AppConfig = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fetcher.timeout_secs == 0 {
            return Err(ConfigError::Message("Fetcher timeout_secs must be greater than 0".into()));
        }

        if self.fetcher.user_agent.trim().is_empty() {
            return Err(ConfigError::Message("Fetcher user_agent must not be empty".into()));
        }

        if let Some(base_url) = &self.catalog.base_url {
            match Url::parse(base_url) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {}
                _ => return Err(ConfigError::Message("Invalid catalog base URL format".into())),
            }

            if self.catalog.username.is_none() || self.catalog.application_password.is_none() {
                return Err(ConfigError::Message(
                    "Catalog username and application_password are required when base_url is set".into(),
                ));
            }
        }

        if self.catalog.request_timeout == 0 {
            return Err(ConfigError::Message("Catalog request_timeout must be greater than 0".into()));
        }

        if self.catalog.product_status.trim().is_empty() {
            return Err(ConfigError::Message("Catalog product_status must not be empty".into()));
        }

        Ok(())
    }
}
