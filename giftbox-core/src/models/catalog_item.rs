use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A purchasable unit from the catalog.
///
/// Selected items are copied into the builder state, so a saved design keeps
/// the price it was configured with even if the catalog changes later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub price: Decimal,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub popular: bool,
    #[serde(default)]
    pub is_new: bool,
}

impl CatalogItem {
    /// Item with only the fields pricing cares about; display fields are empty.
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        price: Decimal,
    ) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            description: String::new(),
            category: category.into(),
            price,
            tags: Vec::new(),
            popular: false,
            is_new: false,
        }
    }
}
