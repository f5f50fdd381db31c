use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Highest unit price the catalog accepts.
pub const MAX_PRICE: f64 = 1_000_000.0;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(
        rename = "data-ai-hint",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub hint: Option<String>,
}

impl Product {
    pub fn new(name: &str, sku: &str, price: f64, quantity: u32, image_url: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            sku: sku.to_string(),
            price,
            quantity,
            image_url: image_url.filter(|url| !url.is_empty()),
            hint: hint_for(name),
        }
    }

    pub fn rename(&mut self, name: &str) {
        self.name = name.to_string();
        self.hint = hint_for(name);
    }

    /// Case-insensitive substring match on name or SKU.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();

        self.name.to_lowercase().contains(&term) || self.sku.to_lowercase().contains(&term)
    }
}

/// Image hint: lowercased first word of the product name.
pub fn hint_for(name: &str) -> Option<String> {
    name.split_whitespace().next().map(str::to_lowercase)
}
