use chrono::Utc;
use prices_catalog::Item;

use crate::models::{CartEntry, CartLine, CartSnapshot};

/// Owns the user's cart. Pricing only ever sees [`CartStore::lines`].
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    entries: Vec<CartEntry>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore from a saved snapshot, dropping lines with zero quantity
    pub fn from_snapshot(snapshot: CartSnapshot) -> Self {
        let entries = snapshot
            .items
            .into_iter()
            .filter(|entry| entry.quantity > 0)
            .collect();
        Self { entries }
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.entries.clone(),
            saved_at: Utc::now(),
        }
    }

    /// Add one of `item`, bumping the quantity if it is already in the cart
    pub fn add_item(&mut self, item: &Item) {
        match self.entries.iter_mut().find(|e| e.item.id == item.id) {
            Some(entry) => entry.quantity = entry.quantity.saturating_add(1),
            None => self.entries.push(CartEntry {
                item: item.clone(),
                quantity: 1,
            }),
        }
        tracing::debug!("Added item {} to cart", item.id);
    }

    /// Remove a line. Removing an absent item is a no-op.
    pub fn remove_item(&mut self, item_id: &str) {
        self.entries.retain(|e| e.item.id != item_id);
    }

    /// Set a line's quantity. Zero or below removes the line.
    pub fn update_quantity(&mut self, item_id: &str, quantity: i64) -> Result<(), CartError> {
        if quantity <= 0 {
            self.remove_item(item_id);
            return Ok(());
        }

        let quantity = u32::try_from(quantity).map_err(|_| CartError::InvalidQuantity(quantity))?;
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.item.id == item_id)
            .ok_or_else(|| CartError::NotFound(item_id.to_string()))?;
        entry.quantity = quantity;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Sum of quantities over all lines
    pub fn item_count(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.quantity)).sum()
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Snapshot read of the current lines
    pub fn lines(&self) -> Vec<CartLine> {
        self.entries.iter().map(CartEntry::line).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error("Item not in cart: {0}")]
    NotFound(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),
}
