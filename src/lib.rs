pub mod assembler;
pub mod catalog;
pub mod config;
pub mod document;
pub mod extractors;
pub mod fetcher;
pub mod importer;
pub mod models;
pub mod trigger;
pub mod utils;

// Re-export commonly used types
pub use config::AppConfig;
pub use importer::{ImportedProduct, ProductImporter};
pub use trigger::{handle_import, ImportOutcome};
pub use utils::error::{AppError, Result};
