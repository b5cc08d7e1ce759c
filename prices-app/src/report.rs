use std::fmt::Write;

use prices_cart::CartEntry;
use prices_catalog::pricing::format_price_with;
use prices_catalog::PriceBook;
use prices_core::{quote_lines, StoreTotal};

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Text rendering of the cart and per-store totals
pub struct Report<'a> {
    pub entries: &'a [CartEntry],
    pub book: &'a PriceBook,
    pub totals: &'a [StoreTotal],
    pub currency_symbol: &'a str,
}

impl Report<'_> {
    fn price(&self, value: f64) -> String {
        format_price_with(self.currency_symbol, value)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.entries.is_empty() {
            out.push_str("Your cart is empty\n");
            return out;
        }

        let count: u64 = self.entries.iter().map(|e| u64::from(e.quantity)).sum();
        let _ = writeln!(out, "Cart ({} items)", count);
        for quote in quote_lines(self.entries, self.book) {
            if quote.is_unpriced() {
                let _ = writeln!(out, "  {} x{}  no price data", quote.name, quote.quantity);
            } else {
                let _ = writeln!(
                    out,
                    "  {} x{}  {}  cheapest at {} ({} each)",
                    quote.name,
                    quote.quantity,
                    self.price(quote.line_total),
                    capitalize_first(&quote.cheapest.store),
                    self.price(quote.cheapest.price),
                );
            }
        }

        out.push('\n');
        if self.totals.is_empty() {
            out.push_str("No store totals available\n");
            return out;
        }

        out.push_str("Store Totals\n");
        for total in self.totals {
            let marker = if total.is_cheapest { "*" } else { " " };
            let badge = if total.is_cheapest {
                "Best Value".to_string()
            } else if total.has_all_items {
                "All items".to_string()
            } else {
                let names: Vec<&str> = total.missing_items.iter().map(|m| m.name.as_str()).collect();
                format!("Missing: {}", names.join(", "))
            };
            let _ = writeln!(
                out,
                "{} {} ({})  {}  {}",
                marker,
                capitalize_first(&total.store),
                capitalize_first(&total.location),
                self.price(total.total),
                badge,
            );
        }
        out.push_str("\n* Totals are calculated based on the current items in your cart and their quantities.\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prices_catalog::{price_book, Item, ItemWithPrices, StorePrice};
    use prices_core::store_totals;

    fn entry(id: &str, name: &str, quantity: u32) -> CartEntry {
        CartEntry {
            item: Item { id: id.to_string(), name: name.to_string(), image: None, lowest_price: 0.0 },
            quantity,
        }
    }

    fn details(id: &str, name: &str, prices: Vec<StorePrice>) -> ItemWithPrices {
        ItemWithPrices { id: id.to_string(), name: name.to_string(), description: None, image: None, prices }
    }

    #[test]
    fn test_render_report() {
        let entries = vec![entry("milk", "Milk", 2), entry("bread", "Bread", 1)];
        let book = price_book(vec![
            details("milk", "Milk", vec![StorePrice::new("storeA", 3.0), StorePrice::new("storeB", 2.5)]),
            details("bread", "Bread", vec![StorePrice::new("storeA", 2.0)]),
        ]);
        let lines: Vec<_> = entries.iter().map(CartEntry::line).collect();
        let totals = store_totals(&lines, &book);

        let text = Report { entries: &entries, book: &book, totals: &totals, currency_symbol: "€" }.render();

        assert!(text.starts_with("Cart (3 items)\n"));
        assert!(text.contains("  Milk x2  €5.00  cheapest at StoreB (€2.50 each)\n"));
        assert!(text.contains("* StoreB (StoreB Store)  €5.00  Best Value\n"));
        assert!(text.contains("  StoreA (StoreA Store)  €8.00  All items\n"));
    }

    #[test]
    fn test_render_empty_cart() {
        let book = PriceBook::new();
        let text = Report { entries: &[], book: &book, totals: &[], currency_symbol: "€" }.render();
        assert_eq!(text, "Your cart is empty\n");
    }

    #[test]
    fn test_render_without_totals() {
        let entries = vec![entry("x", "Saffron", 1)];
        let book = PriceBook::new();
        let text = Report { entries: &entries, book: &book, totals: &[], currency_symbol: "$" }.render();
        assert!(text.contains("Saffron x1  no price data"));
        assert!(text.contains("No store totals available"));
    }
}
