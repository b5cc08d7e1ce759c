use std::time::Duration;

use async_trait::async_trait;
use crate::filter::search_items;
use crate::product::{Item, ItemWithPrices, StorePrice};
use crate::source::{CatalogError, CatalogSource};

struct DemoStore {
    name: &'static str,
    location: &'static str,
    multiplier: f64,
}

const DEMO_STORES: [DemoStore; 4] = [
    DemoStore { name: "SuperMart", location: "Downtown", multiplier: 1.05 },
    DemoStore { name: "FreshGrocer", location: "Westside", multiplier: 1.10 },
    DemoStore { name: "ValueMart", location: "Eastside", multiplier: 0.95 },
    DemoStore { name: "OrganicMarket", location: "Northside", multiplier: 1.25 },
];

const DEMO_ITEMS: [(&str, &str, &str, f64); 12] = [
    ("1", "Bananas", "Fresh, ripe bananas. Sold by the pound.", 0.59),
    ("2", "Apples", "Fresh, crisp apples. Sold by the pound.", 1.29),
    ("3", "Milk", "Fresh whole milk. 1 gallon.", 2.99),
    ("4", "Bread", "Freshly baked white bread. 1 loaf.", 2.49),
    ("5", "Eggs", "Farm fresh eggs. 1 dozen.", 3.49),
    ("6", "Chicken Breast", "Boneless, skinless chicken breast. Price per pound.", 5.99),
    ("7", "Ground Beef", "80% lean ground beef. Price per pound.", 4.99),
    ("8", "Pasta", "Spaghetti pasta. 16 oz package.", 1.49),
    ("9", "Rice", "Long grain white rice. 2 lb bag.", 2.19),
    ("10", "Cereal", "Breakfast cereal. 18 oz box.", 3.99),
    ("11", "Orange Juice", "100% pure orange juice. 64 oz bottle.", 3.29),
    ("12", "Yogurt", "Plain yogurt. 32 oz container.", 1.79),
];

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Every demo store stocks every item; prices derive from the base price.
fn consistent_prices(base_price: f64) -> Vec<StorePrice> {
    DEMO_STORES
        .iter()
        .map(|store| StorePrice {
            price: round_cents(base_price * store.multiplier),
            store: store.name.to_string(),
            location: Some(store.location.to_string()),
            url: Some("#".to_string()),
        })
        .collect()
}

/// In-memory catalog used for development and tests
pub struct DemoCatalog {
    items: Vec<ItemWithPrices>,
    latency: Duration,
}

impl DemoCatalog {
    pub fn new() -> Self {
        let items = DEMO_ITEMS
            .iter()
            .map(|(id, name, description, base)| ItemWithPrices {
                id: id.to_string(),
                name: name.to_string(),
                description: Some(description.to_string()),
                image: None,
                prices: consistent_prices(*base),
            })
            .collect();
        Self::from_items(items)
    }

    pub fn from_items(items: Vec<ItemWithPrices>) -> Self {
        Self {
            items,
            latency: Duration::ZERO,
        }
    }

    /// Simulate network delay on every request
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn delay(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for DemoCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogSource for DemoCatalog {
    async fn list_items(&self, query: Option<&str>) -> Result<Vec<Item>, CatalogError> {
        self.delay().await;
        let items: Vec<Item> = self.items.iter().map(ItemWithPrices::summary).collect();
        Ok(search_items(items, query))
    }

    async fn item_details(&self, id: &str) -> Result<ItemWithPrices, CatalogError> {
        self.delay().await;
        self.items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("Item with ID {} not found", id)))
    }
}
