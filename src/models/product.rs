use serde::{Deserialize, Serialize};

use crate::models::VariationOption;

/// Fields shared by both product shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductData {
    pub name: String,
    pub description: String,
    pub price: String,
    pub images: Vec<String>,
}

/// A named, visible, variation-eligible set of option values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    pub name: String,
    pub options: Vec<String>,
    pub visible: bool,
    pub used_for_variation: bool,
}

impl AttributeDescriptor {
    pub fn for_variation(name: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            name: name.into(),
            options,
            visible: true,
            used_for_variation: true,
        }
    }
}

/// Canonical catalog entry produced from a scraped page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProductRecord {
    Simple(ProductData),
    Variable {
        #[serde(flatten)]
        product: ProductData,
        attributes: Vec<AttributeDescriptor>,
        // Carried as scraped; no per-variation entries are created from these.
        variations: Vec<VariationOption>,
    },
}

impl ProductRecord {
    pub fn product(&self) -> &ProductData {
        match self {
            ProductRecord::Simple(product) => product,
            ProductRecord::Variable { product, .. } => product,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ProductRecord::Simple(_) => "simple",
            ProductRecord::Variable { .. } => "variable",
        }
    }

    pub fn attributes(&self) -> &[AttributeDescriptor] {
        match self {
            ProductRecord::Simple(_) => &[],
            ProductRecord::Variable { attributes, .. } => attributes,
        }
    }

    pub fn images(&self) -> &[String] {
        &self.product().images
    }
}
