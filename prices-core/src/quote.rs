use prices_cart::CartEntry;
use prices_catalog::{cheapest_price, CheapestPrice, PriceBook};
use serde::{Deserialize, Serialize};

/// Cart line priced at its cheapest store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineQuote {
    pub item_id: String,
    pub name: String,
    pub quantity: u32,
    pub cheapest: CheapestPrice,
    pub line_total: f64,
}

impl LineQuote {
    /// No store had a price for this line
    pub fn is_unpriced(&self) -> bool {
        self.cheapest.is_unknown()
    }
}

pub fn quote_lines(entries: &[CartEntry], book: &PriceBook) -> Vec<LineQuote> {
    entries
        .iter()
        .map(|entry| {
            let cheapest = book
                .get(&entry.item.id)
                .map(|details| cheapest_price(&details.prices))
                .unwrap_or_else(CheapestPrice::unknown);
            LineQuote {
                item_id: entry.item.id.clone(),
                name: entry.item.name.clone(),
                quantity: entry.quantity,
                line_total: cheapest.price * f64::from(entry.quantity),
                cheapest,
            }
        })
        .collect()
}
