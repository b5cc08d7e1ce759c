pub mod product;
pub mod pricing;
pub mod source;
pub mod demo;
pub mod filter;
pub mod history;

pub use product::{price_book, ApiItem, ApiStorePrice, Item, ItemWithPrices, PriceBook, StorePrice};
pub use pricing::{cheapest_price, format_price, CheapestPrice, UNKNOWN_STORE};
pub use source::{CatalogError, CatalogSource, ErrorKind, FetchPolicy, RetryingSource};
pub use demo::DemoCatalog;
