use std::path::{Path, PathBuf};

use prices_cart::{CartSnapshot, CartStore};

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Cart snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cart snapshot malformed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Local file holding the last cart snapshot
pub struct CartRepository {
    path: PathBuf,
}

impl CartRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Restore the saved cart. A missing or unreadable snapshot gives an
    /// empty cart.
    pub async fn load(&self) -> CartStore {
        match self.try_load().await {
            Ok(Some(snapshot)) => CartStore::from_snapshot(snapshot),
            Ok(None) => CartStore::new(),
            Err(e) => {
                tracing::error!("Failed to parse cart from {}: {}", self.path.display(), e);
                CartStore::new()
            }
        }
    }

    pub async fn try_load(&self) -> Result<Option<CartSnapshot>, SnapshotError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(CartSnapshot::from_json(&raw)?))
    }

    pub async fn save(&self, cart: &CartStore) -> Result<(), SnapshotError> {
        let json = cart.snapshot().to_json()?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, json).await?;
        tracing::debug!("Saved cart with {} lines to {}", cart.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prices_cart::CartLine;
    use prices_catalog::Item;

    fn bananas() -> Item {
        Item { id: "1".to_string(), name: "Bananas".to_string(), image: None, lowest_price: 0.56 }
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let repo = CartRepository::new(dir.path().join("nested").join("cart.json"));

        let mut cart = CartStore::new();
        cart.add_item(&bananas());
        cart.add_item(&bananas());
        repo.save(&cart).await.unwrap();

        let restored = repo.load().await;
        assert_eq!(restored.lines(), vec![CartLine::new("1", 2)]);
        assert_eq!(restored.entries()[0].item.name, "Bananas");
    }

    #[tokio::test]
    async fn test_missing_snapshot_is_empty_cart() {
        let dir = tempfile::tempdir().unwrap();
        let repo = CartRepository::new(dir.path().join("cart.json"));
        assert!(repo.try_load().await.unwrap().is_none());
        assert!(repo.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_is_empty_cart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        std::fs::write(&path, "[[[").unwrap();

        let repo = CartRepository::new(path);
        assert!(repo.try_load().await.is_err());
        assert!(repo.load().await.is_empty());
    }
}
