use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use prices_cart::CartLine;
use prices_catalog::PriceBook;

use crate::totals::{store_totals, StoreTotal};

/// Remembers the last store totals and recomputes only when the cart or the
/// price data changed. Totals are a pure function of both, so this never
/// changes results.
#[derive(Debug, Default)]
pub struct TotalsCache {
    key: Option<u64>,
    totals: Vec<StoreTotal>,
    hits: u64,
    misses: u64,
}

impl TotalsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(&mut self, lines: &[CartLine], book: &PriceBook) -> &[StoreTotal] {
        let key = signature(lines, book);
        if self.key == Some(key) {
            self.hits += 1;
        } else {
            self.misses += 1;
            self.totals = store_totals(lines, book);
            self.key = Some(key);
            tracing::debug!("Store totals recomputed ({} misses)", self.misses);
        }
        &self.totals
    }

    pub fn invalidate(&mut self) {
        self.key = None;
        self.totals.clear();
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

fn signature(lines: &[CartLine], book: &PriceBook) -> u64 {
    let mut hasher = DefaultHasher::new();

    let mut sorted: Vec<&CartLine> = lines.iter().collect();
    sorted.sort_by(|a, b| a.item_id.cmp(&b.item_id).then(a.quantity.cmp(&b.quantity)));
    sorted.hash(&mut hasher);

    for (id, details) in book {
        id.hash(&mut hasher);
        details.name.hash(&mut hasher);
        for entry in &details.prices {
            entry.store.hash(&mut hasher);
            entry.price.to_bits().hash(&mut hasher);
            entry.location.hash(&mut hasher);
        }
    }

    hasher.finish()
}
