use prices_catalog::{cheapest_price, format_price, PriceBook};

use crate::models::CartEntry;

/// Plain-text shopping list, one line per cart entry priced at the item's
/// cheapest store. Items without details show a zero price.
pub fn shopping_list(entries: &[CartEntry], details: &PriceBook) -> String {
    let lines: Vec<String> = entries
        .iter()
        .map(|entry| {
            let price = details
                .get(&entry.item.id)
                .map(|d| cheapest_price(&d.prices).price)
                .unwrap_or(0.0);
            format!("  - {}, {}, {}", entry.item.name, entry.quantity, format_price(price))
        })
        .collect();

    format!("Shopping List:\n{}", lines.join("\n"))
}
