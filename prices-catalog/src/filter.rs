use std::collections::HashSet;

use crate::product::{store_key, Item, StorePrice};

/// Keep items whose name contains the query, ignoring case and surrounding
/// whitespace. A missing or blank query keeps everything.
pub fn search_items(items: Vec<Item>, query: Option<&str>) -> Vec<Item> {
    let query = match query.map(str::trim) {
        Some(q) if !q.is_empty() => q.to_lowercase(),
        _ => return items,
    };

    items
        .into_iter()
        .filter(|item| item.name.to_lowercase().contains(&query))
        .collect()
}

/// Distinct stores of a price list in first-seen order
pub fn stores_of(prices: &[StorePrice]) -> Vec<String> {
    let mut seen = HashSet::new();
    prices
        .iter()
        .filter(|p| seen.insert(p.store_key()))
        .map(|p| p.store.clone())
        .collect()
}

/// Restrict a price list to the selected stores. No selection means no filter.
pub fn filter_by_stores(prices: &[StorePrice], selected: &[String]) -> Vec<StorePrice> {
    if selected.is_empty() {
        return prices.to_vec();
    }

    let keys: HashSet<String> = selected.iter().map(|s| store_key(s)).collect();
    prices
        .iter()
        .filter(|p| keys.contains(&p.store_key()))
        .cloned()
        .collect()
}
