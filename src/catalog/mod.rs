pub mod memory;
pub mod traits;
pub mod woocommerce;

pub use memory::{InMemoryCatalog, StoredProduct};
pub use traits::CatalogBackend;
pub use woocommerce::WooCommerceCatalog;

#[cfg(test)]
pub use traits::MockCatalogBackend;
