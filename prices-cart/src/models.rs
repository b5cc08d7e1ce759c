use chrono::{DateTime, Utc};
use prices_catalog::Item;
use serde::{Deserialize, Serialize};

/// Read-only view of one cart line handed to pricing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub item_id: String,
    /// Always at least 1
    pub quantity: u32,
}

impl CartLine {
    pub fn new(item_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            item_id: item_id.into(),
            quantity,
        }
    }
}

/// An item the user picked, with how many of it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartEntry {
    #[serde(flatten)]
    pub item: Item,
    pub quantity: u32,
}

impl CartEntry {
    pub fn line(&self) -> CartLine {
        CartLine::new(self.item.id.clone(), self.quantity)
    }
}

/// Persisted form of the cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub items: Vec<CartEntry>,
    pub saved_at: DateTime<Utc>,
}

impl CartSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
