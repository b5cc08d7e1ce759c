pub mod resolve;
pub mod report;
pub mod commands;

use prices_catalog::{CatalogSource, DemoCatalog, RetryingSource};
use prices_store::app_config::Config;
use prices_store::JsonFileCatalog;

/// Catalog for the configured data file, or the demo data set, wrapped in
/// the configured timeout and retry policy.
pub fn catalog_source(config: &Config) -> Box<dyn CatalogSource> {
    let policy = config.catalog.fetch_policy();
    match &config.catalog.data_file {
        Some(path) => {
            tracing::info!("Using catalog file {}", path);
            Box::new(RetryingSource::new(JsonFileCatalog::new(path), policy))
        }
        None => {
            tracing::info!("No catalog file configured, using demo catalog");
            Box::new(RetryingSource::new(DemoCatalog::new(), policy))
        }
    }
}
