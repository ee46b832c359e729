use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute name to the option values listed for it on the page.
pub type AttributeMap = BTreeMap<String, Vec<String>>;

/// One selectable entry of the storefront's variation `<select>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationOption {
    pub value: String,
    pub label: String,
}

/// Every field pulled from a product page, already normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    pub title: String,
    pub description: String,
    pub price: String,
    pub images: Vec<String>,
    pub attributes: AttributeMap,
    pub variations: Vec<VariationOption>,
}

impl ExtractedFields {
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }

    pub fn is_variable(&self) -> bool {
        !self.variations.is_empty()
    }
}
