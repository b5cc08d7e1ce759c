use std::collections::HashMap;

use prices_cart::CartLine;
use prices_catalog::{PriceBook, StorePrice};
use serde::{Deserialize, Serialize};

/// A cart item a store does not stock
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MissingItem {
    pub id: String,
    pub name: String,
}

/// What the cart costs at one store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoreTotal {
    pub store: String,
    pub location: String,
    /// Sum of price × quantity over the cart items this store carries
    pub total: f64,
    pub is_cheapest: bool,
    /// Full coverage badge. Cleared on the cheapest store, see [`store_totals`].
    pub has_all_items: bool,
    pub missing_items: Vec<MissingItem>,
}

impl StoreTotal {
    fn open(entry: &StorePrice) -> Self {
        Self {
            store: entry.store.clone(),
            location: entry
                .location
                .clone()
                .unwrap_or_else(|| format!("{} Store", entry.store)),
            total: 0.0,
            is_cheapest: false,
            has_all_items: true,
            missing_items: Vec::new(),
        }
    }

    /// True coverage, independent of the badge precedence
    pub fn is_complete(&self) -> bool {
        self.missing_items.is_empty()
    }
}

/// Price the cart at every store found in the price book.
///
/// Cart lines without an entry in `book` are skipped: they add nothing to any
/// total and are never reported missing. The result is sorted by total
/// ascending; equal totals keep store discovery order (price book order, then
/// price list order). The first entry is the cheapest. If that store also
/// stocks everything, its `has_all_items` badge is cleared since the cheapest
/// badge takes precedence; [`StoreTotal::is_complete`] still reports it.
///
/// Returns an empty list for an empty cart or when no store has data.
pub fn store_totals(lines: &[CartLine], book: &PriceBook) -> Vec<StoreTotal> {
    if lines.is_empty() {
        return Vec::new();
    }

    let mut priced: Vec<&CartLine> = lines
        .iter()
        .filter(|line| {
            let known = book.contains_key(&line.item_id);
            if !known {
                tracing::debug!("No price data for item {}, skipping", line.item_id);
            }
            known
        })
        .collect();
    // Fixed accumulation order keeps totals independent of cart ordering
    priced.sort_by(|a, b| a.item_id.cmp(&b.item_id));

    let mut keys: Vec<String> = Vec::new();
    let mut totals: Vec<StoreTotal> = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();
    for item in book.values() {
        for entry in &item.prices {
            let key = entry.store_key();
            if !seen.contains_key(&key) {
                seen.insert(key.clone(), totals.len());
                keys.push(key);
                totals.push(StoreTotal::open(entry));
            }
        }
    }

    if totals.is_empty() {
        return totals;
    }

    for line in priced {
        let Some(item) = book.get(&line.item_id) else {
            continue;
        };
        // Duplicate stores in one list: last seen wins
        let carried: HashMap<String, f64> = item
            .prices
            .iter()
            .map(|p| (p.store_key(), p.price))
            .collect();

        for (key, total) in keys.iter().zip(totals.iter_mut()) {
            match carried.get(key) {
                Some(price) => total.total += price * f64::from(line.quantity),
                None => {
                    total.has_all_items = false;
                    total.missing_items.push(MissingItem {
                        id: item.id.clone(),
                        name: item.name.clone(),
                    });
                }
            }
        }
    }

    totals.sort_by(|a, b| a.total.total_cmp(&b.total));

    if let Some(first) = totals.first_mut() {
        first.is_cheapest = true;
        first.has_all_items = false;
    }

    tracing::debug!("Computed totals for {} stores", totals.len());
    totals
}

/// The store flagged cheapest, if any
pub fn cheapest_store(totals: &[StoreTotal]) -> Option<&StoreTotal> {
    totals.iter().find(|t| t.is_cheapest)
}

/// Stores that stock every priced cart item, cheapest first
pub fn complete_stores(totals: &[StoreTotal]) -> Vec<&StoreTotal> {
    totals.iter().filter(|t| t.is_complete()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use prices_catalog::{price_book, ItemWithPrices};

    fn details(id: &str, name: &str, prices: &[(&str, f64)]) -> ItemWithPrices {
        ItemWithPrices {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            image: None,
            prices: prices.iter().map(|(s, p)| StorePrice::new(*s, *p)).collect(),
        }
    }

    fn milk_and_bread() -> PriceBook {
        price_book(vec![
            details("milk", "Milk", &[("StoreA", 3.0), ("StoreB", 2.5)]),
            details("bread", "Bread", &[("StoreA", 2.0)]),
        ])
    }

    fn find<'a>(totals: &'a [StoreTotal], store: &str) -> &'a StoreTotal {
        totals.iter().find(|t| t.store == store).unwrap()
    }

    #[test]
    fn test_milk_and_bread() {
        let lines = vec![CartLine::new("milk", 2), CartLine::new("bread", 1)];
        let totals = store_totals(&lines, &milk_and_bread());

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].store, "StoreB");
        assert!(totals[0].is_cheapest);
        assert_eq!(totals[0].total, 5.0);
        assert!(!totals[0].has_all_items);
        assert_eq!(
            totals[0].missing_items,
            vec![MissingItem { id: "bread".to_string(), name: "Bread".to_string() }]
        );

        let a = find(&totals, "StoreA");
        assert_eq!(a.total, 8.0);
        assert!(!a.is_cheapest);
        assert!(a.has_all_items);
        assert!(a.missing_items.is_empty());
        assert_eq!(a.location, "StoreA Store");
    }

    #[test]
    fn test_empty_cart_yields_nothing() {
        assert!(store_totals(&[], &milk_and_bread()).is_empty());
    }

    #[test]
    fn test_no_price_data_yields_nothing() {
        let lines = vec![CartLine::new("milk", 1)];
        assert!(store_totals(&lines, &PriceBook::new()).is_empty());
    }

    #[test]
    fn test_item_without_price_data_is_ignored() {
        let lines = vec![
            CartLine::new("milk", 2),
            CartLine::new("bread", 1),
            CartLine::new("caviar", 4),
        ];
        let totals = store_totals(&lines, &milk_and_bread());

        assert_eq!(find(&totals, "StoreA").total, 8.0);
        assert_eq!(find(&totals, "StoreB").total, 5.0);
        assert!(totals
            .iter()
            .all(|t| t.missing_items.iter().all(|m| m.id != "caviar")));
    }

    #[test]
    fn test_cheapest_full_coverage_badge_is_demoted() {
        let book = price_book(vec![
            details("milk", "Milk", &[("StoreA", 1.0), ("StoreB", 2.5)]),
            details("bread", "Bread", &[("StoreA", 1.0)]),
        ]);
        let lines = vec![CartLine::new("milk", 1), CartLine::new("bread", 1)];
        let totals = store_totals(&lines, &book);

        let a = &totals[0];
        assert_eq!(a.store, "StoreA");
        assert!(a.is_cheapest);
        assert!(!a.has_all_items);
        assert!(a.is_complete());
        assert_eq!(complete_stores(&totals).len(), 1);
    }

    #[test]
    fn test_exactly_one_cheapest_with_minimum_total() {
        let book = price_book(vec![
            details("1", "Bananas", &[("Aldi", 0.5), ("Lidl", 0.45), ("Tesco", 0.6)]),
            details("2", "Eggs", &[("Aldi", 3.0), ("Tesco", 2.9)]),
            details("3", "Rice", &[("Lidl", 2.0), ("Tesco", 2.2)]),
        ]);
        let lines = vec![CartLine::new("1", 6), CartLine::new("2", 1), CartLine::new("3", 2)];
        let totals = store_totals(&lines, &book);

        assert_eq!(totals.iter().filter(|t| t.is_cheapest).count(), 1);
        let cheapest = cheapest_store(&totals).unwrap();
        assert!(totals.iter().all(|t| cheapest.total <= t.total));

        for t in &totals {
            assert_eq!(t.has_all_items, t.missing_items.is_empty() && !t.is_cheapest);
        }
    }

    #[test]
    fn test_order_independent() {
        let book = price_book(vec![
            details("1", "Bananas", &[("Aldi", 0.5), ("Lidl", 0.25)]),
            details("2", "Eggs", &[("Aldi", 3.0), ("Tesco", 2.75)]),
            details("3", "Rice", &[("Lidl", 2.0), ("Tesco", 2.25)]),
        ]);
        let forward = vec![CartLine::new("1", 4), CartLine::new("2", 1), CartLine::new("3", 2)];
        let mut backward = forward.clone();
        backward.reverse();

        assert_eq!(store_totals(&forward, &book), store_totals(&backward, &book));
    }

    #[test]
    fn test_store_names_compare_case_insensitively() {
        let book = price_book(vec![
            details("1", "Bananas", &[("lidl", 0.5)]),
            details("2", "Eggs", &[("LIDL", 3.0), ("Aldi", 2.0)]),
        ]);
        let lines = vec![CartLine::new("1", 2), CartLine::new("2", 1)];
        let totals = store_totals(&lines, &book);

        assert_eq!(totals.len(), 2);
        let lidl = find(&totals, "lidl");
        assert_eq!(lidl.total, 4.0);
        assert!(lidl.is_complete());
    }

    #[test]
    fn test_duplicate_store_last_price_wins() {
        let book = price_book(vec![details("1", "Bananas", &[("Aldi", 0.5), ("Aldi", 0.75)])]);
        let totals = store_totals(&[CartLine::new("1", 2)], &book);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].total, 1.5);
    }

    #[test]
    fn test_ties_keep_discovery_order() {
        let book = price_book(vec![details("1", "Bananas", &[("Tesco", 1.0), ("Aldi", 1.0)])]);
        let totals = store_totals(&[CartLine::new("1", 1)], &book);
        assert_eq!(totals[0].store, "Tesco");
        assert!(totals[0].is_cheapest);
        assert!(!totals[1].is_cheapest);
    }

    #[test]
    fn test_stores_from_every_priced_item_are_included() {
        let book = price_book(vec![
            details("milk", "Milk", &[("StoreA", 3.0)]),
            details("eggs", "Eggs", &[("StoreC", 3.0)]),
        ]);
        let totals = store_totals(&[CartLine::new("milk", 1)], &book);

        assert_eq!(totals.len(), 2);
        let c = find(&totals, "StoreC");
        assert_eq!(c.total, 0.0);
        assert_eq!(
            c.missing_items,
            vec![MissingItem { id: "milk".to_string(), name: "Milk".to_string() }]
        );
        assert!(c.is_cheapest);

        let a = find(&totals, "StoreA");
        assert_eq!(a.total, 3.0);
        assert!(a.is_complete());
        assert!(a.has_all_items);
    }
}
