use thiserror::Error;

/// Failures while retrieving the product page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Failed to fetch the URL: {0}")]
    Network(String),

    #[error("Unexpected HTTP response code: {0}")]
    HttpStatus(u16),

    #[error("No content found at the URL.")]
    EmptyBody,
}

/// Failures reported by a catalog backend.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Invalid response from catalog: {0}")]
    InvalidResponse(String),

    #[error("{0}")]
    Rejected(String),
}

/// Terminal failures of a single import run.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Could not find product title.")]
    MissingTitle,

    #[error("{0}")]
    Creation(String),
}

impl From<CatalogError> for ImportError {
    fn from(err: CatalogError) -> Self {
        ImportError::Creation(err.to_string())
    }
}

/// Failures that stop the importer from starting or reporting.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Fetcher setup failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
