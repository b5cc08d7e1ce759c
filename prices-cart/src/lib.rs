pub mod models;
pub mod manager;
pub mod export;

pub use models::{CartEntry, CartLine, CartSnapshot};
pub use manager::{CartError, CartStore};
pub use export::shopping_list;
