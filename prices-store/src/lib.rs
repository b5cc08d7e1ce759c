pub mod app_config;
pub mod catalog_repo;
pub mod cart_repo;

pub use catalog_repo::JsonFileCatalog;
pub use cart_repo::{CartRepository, SnapshotError};
