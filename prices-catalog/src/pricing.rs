use serde::{Deserialize, Serialize};
use crate::product::{capitalize_words, StorePrice};

/// Store reported when an item has no price data
pub const UNKNOWN_STORE: &str = "Unknown";

/// Default display currency
pub const CURRENCY_SYMBOL: &str = "€";

/// Lowest price for one item and where to get it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheapestPrice {
    pub price: f64,
    pub store: String,
}

impl CheapestPrice {
    /// Sentinel for "no price data"
    pub fn unknown() -> Self {
        Self {
            price: 0.0,
            store: UNKNOWN_STORE.to_string(),
        }
    }

    /// True for the no-data sentinel. Callers must not show its price as real.
    pub fn is_unknown(&self) -> bool {
        self.store == UNKNOWN_STORE && self.price == 0.0
    }

    /// Store name with each word capitalized, for display only
    pub fn display_store(&self) -> String {
        capitalize_words(&self.store)
    }
}

/// Resolve the cheapest entry of a price list.
///
/// Ties keep the first minimum in input order. An empty list yields
/// [`CheapestPrice::unknown`].
pub fn cheapest_price(prices: &[StorePrice]) -> CheapestPrice {
    prices
        .iter()
        .min_by(|a, b| a.price.total_cmp(&b.price))
        .map(|p| CheapestPrice {
            price: p.price,
            store: p.store.clone(),
        })
        .unwrap_or_else(CheapestPrice::unknown)
}

/// Price list sorted lowest first, keeping input order between equal prices
pub fn sorted_by_price(prices: &[StorePrice]) -> Vec<StorePrice> {
    let mut sorted = prices.to_vec();
    sorted.sort_by(|a, b| a.price.total_cmp(&b.price));
    sorted
}

/// Fixed two-decimal display with the default currency symbol
pub fn format_price(price: f64) -> String {
    format_price_with(CURRENCY_SYMBOL, price)
}

pub fn format_price_with(symbol: &str, price: f64) -> String {
    format!("{}{:.2}", symbol, price)
}
