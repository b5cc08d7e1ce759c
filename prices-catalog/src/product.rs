use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Catalog entry as shown in item listings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Informational only, never used for cart pricing
    pub lowest_price: f64,
}

/// One store's price for one item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorePrice {
    pub price: f64,
    pub store: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl StorePrice {
    pub fn new(store: impl Into<String>, price: f64) -> Self {
        Self {
            price,
            store: store.into(),
            location: None,
            url: None,
        }
    }

    /// Stores compare case-insensitively; this is the aggregation key.
    pub fn store_key(&self) -> String {
        store_key(&self.store)
    }
}

pub fn store_key(store: &str) -> String {
    store.to_lowercase()
}

/// Item detail with its full price list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemWithPrices {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub prices: Vec<StorePrice>,
}

impl ItemWithPrices {
    /// Listing view of this item
    pub fn summary(&self) -> Item {
        let lowest_price = lowest_price(self.prices.iter().map(|p| p.price));
        Item {
            id: self.id.clone(),
            name: self.name.clone(),
            image: self.image.clone(),
            lowest_price,
        }
    }
}

/// Item details keyed by item id
pub type PriceBook = BTreeMap<String, ItemWithPrices>;

/// Index details by id. A later duplicate id replaces an earlier one.
pub fn price_book(items: impl IntoIterator<Item = ItemWithPrices>) -> PriceBook {
    items.into_iter().map(|item| (item.id.clone(), item)).collect()
}

/// Price entry as served by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiStorePrice {
    pub price: f64,
    pub store: String,
}

/// Item as served by `/items` and `/prices/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiItem {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub prices: Vec<ApiStorePrice>,
}

impl ApiItem {
    /// Normalize into the listing shape
    pub fn to_item(&self) -> Item {
        Item {
            id: self.id.to_string(),
            name: capitalize_words(&self.name),
            image: Some(placeholder_image(&self.name)),
            lowest_price: lowest_price(self.prices.iter().map(|p| p.price)),
        }
    }

    /// Normalize into the detail shape
    pub fn to_details(&self) -> ItemWithPrices {
        let name = capitalize_words(&self.name);
        let prices = self
            .prices
            .iter()
            .map(|p| {
                let store = capitalize_words(&p.store);
                StorePrice {
                    price: p.price,
                    location: Some(format!("{} Store", store)),
                    url: Some("#".to_string()),
                    store,
                }
            })
            .collect::<Vec<_>>();

        ItemWithPrices {
            id: self.id.to_string(),
            description: Some(format!("{} - Available at {} stores", name, prices.len())),
            name,
            image: Some(placeholder_image(&self.name)),
            prices,
        }
    }
}

fn lowest_price(prices: impl Iterator<Item = f64>) -> f64 {
    prices.fold(None, |min: Option<f64>, p| match min {
        Some(m) if m <= p => Some(m),
        _ => Some(p),
    })
    .unwrap_or(0.0)
}

fn placeholder_image(name: &str) -> String {
    let encoded: String = name
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{:02X}", b),
        })
        .collect();
    format!("/placeholder.svg?height=400&width=400&text={}", encoded)
}

/// Capitalize the first letter of each space-separated word, lowercase the rest.
pub fn capitalize_words(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_milk() -> ApiItem {
        ApiItem {
            id: 3,
            name: "whole MILK".to_string(),
            prices: vec![
                ApiStorePrice { price: 3.0, store: "lidl".to_string() },
                ApiStorePrice { price: 2.5, store: "super valu".to_string() },
            ],
        }
    }

    #[test]
    fn test_capitalize_words() {
        assert_eq!(capitalize_words("super VALU"), "Super Valu");
        assert_eq!(capitalize_words(""), "");
        assert_eq!(capitalize_words("a  b"), "A  B");
    }

    #[test]
    fn test_api_item_to_item() {
        let item = api_milk().to_item();
        assert_eq!(item.id, "3");
        assert_eq!(item.name, "Whole Milk");
        assert_eq!(item.lowest_price, 2.5);
        assert_eq!(
            item.image.as_deref(),
            Some("/placeholder.svg?height=400&width=400&text=whole%20MILK")
        );
    }

    #[test]
    fn test_api_item_without_prices_has_zero_lowest() {
        let item = ApiItem { id: 1, name: "salt".to_string(), prices: vec![] }.to_item();
        assert_eq!(item.lowest_price, 0.0);
    }

    #[test]
    fn test_api_item_to_details() {
        let details = api_milk().to_details();
        assert_eq!(details.description.as_deref(), Some("Whole Milk - Available at 2 stores"));
        assert_eq!(details.prices[1].store, "Super Valu");
        assert_eq!(details.prices[1].location.as_deref(), Some("Super Valu Store"));
        assert_eq!(details.prices[1].url.as_deref(), Some("#"));
    }

    #[test]
    fn test_store_key_ignores_case() {
        assert_eq!(StorePrice::new("Lidl", 1.0).store_key(), StorePrice::new("LIDL", 2.0).store_key());
    }

    #[test]
    fn test_item_deserialization() {
        let json = r#"{ "id": "7", "name": "Ground Beef", "lowestPrice": 4.99 }"#;
        let item: Item = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(item.lowest_price, 4.99);
        assert!(item.image.is_none());
    }
}
