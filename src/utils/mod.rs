pub mod error;

pub use error::{AppError, CatalogError, FetchError, ImportError};
