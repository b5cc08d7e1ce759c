use std::path::{Path, PathBuf};

use async_trait::async_trait;
use prices_catalog::filter::search_items;
use prices_catalog::{ApiItem, CatalogError, CatalogSource, Item, ItemWithPrices};

/// Catalog backed by a JSON file in the backend `/items` shape.
/// The file is re-read on every request so edits show up immediately.
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<ApiItem>, CatalogError> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let items: Vec<ApiItem> = serde_json::from_str(&raw)?;
        tracing::info!("Received {} items from {}", items.len(), self.path.display());

        Ok(items.into_iter().map(sanitize).collect())
    }
}

/// Negative prices are feed errors and never reach pricing
fn sanitize(mut item: ApiItem) -> ApiItem {
    let before = item.prices.len();
    item.prices.retain(|p| p.price.is_finite() && p.price >= 0.0);
    if item.prices.len() != before {
        tracing::warn!(
            "Dropped {} invalid price entries for item {}",
            before - item.prices.len(),
            item.id
        );
    }
    item
}

#[async_trait]
impl CatalogSource for JsonFileCatalog {
    async fn list_items(&self, query: Option<&str>) -> Result<Vec<Item>, CatalogError> {
        let items: Vec<Item> = self
            .load()
            .await?
            .iter()
            // Items without a single price are not listed
            .filter(|item| !item.prices.is_empty())
            .map(ApiItem::to_item)
            .collect();
        Ok(search_items(items, query))
    }

    async fn item_details(&self, id: &str) -> Result<ItemWithPrices, CatalogError> {
        tracing::debug!("Fetching details for item {}...", id);
        self.load()
            .await?
            .iter()
            .find(|item| item.id.to_string() == id)
            .map(ApiItem::to_details)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }
}
