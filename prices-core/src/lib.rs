pub mod totals;
pub mod quote;
pub mod cache;

pub use totals::{cheapest_store, complete_stores, store_totals, MissingItem, StoreTotal};
pub use quote::{quote_lines, LineQuote};
pub use cache::TotalsCache;
