use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use crate::product::{Item, ItemWithPrices};

/// Read access to the item catalog
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// List items, optionally filtered by a name query
    async fn list_items(&self, query: Option<&str>) -> Result<Vec<Item>, CatalogError>;

    /// Fetch one item with all its store prices
    async fn item_details(&self, id: &str) -> Result<ItemWithPrices, CatalogError>;
}

/// Catalog access errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Catalog read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog data malformed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog request failed: {0}")]
    Unknown(String),
}

/// Coarse category surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Timeout,
    NotFound,
    Unknown,
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Timeout(_) => ErrorKind::Timeout,
            CatalogError::NotFound(_) => ErrorKind::NotFound,
            CatalogError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => ErrorKind::NotFound,
            CatalogError::Io(e) if e.kind() == std::io::ErrorKind::TimedOut => ErrorKind::Timeout,
            _ => ErrorKind::Unknown,
        }
    }
}

/// Timeout and retry budget for catalog requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Limit for a single attempt
    pub timeout: Duration,
    /// Extra attempts after a timed out one
    pub retries: u32,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(15_000),
            retries: 2,
        }
    }
}

/// Wraps a source with a per-attempt timeout. Only timeouts are retried.
pub struct RetryingSource<S> {
    inner: S,
    policy: FetchPolicy,
}

impl<S: CatalogSource> RetryingSource<S> {
    pub fn new(inner: S, policy: FetchPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    async fn run<T, F, Fut>(&self, what: &str, mut attempt: F) -> Result<T, CatalogError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, CatalogError>>,
    {
        let mut retries_left = self.policy.retries;
        loop {
            tracing::debug!("Fetching: {}", what);
            let outcome = match tokio::time::timeout(self.policy.timeout, attempt()).await {
                Ok(result) => result,
                Err(_) => Err(CatalogError::Timeout(format!(
                    "{} exceeded {}ms",
                    what,
                    self.policy.timeout.as_millis()
                ))),
            };

            match outcome {
                Err(err) if err.kind() == ErrorKind::Timeout && retries_left > 0 => {
                    tracing::warn!(
                        "Request timed out, retrying... ({} retries left)",
                        retries_left
                    );
                    retries_left -= 1;
                }
                Err(err) => {
                    tracing::error!("API Error: {}: {}", what, err);
                    return Err(err);
                }
                Ok(value) => return Ok(value),
            }
        }
    }
}

#[async_trait]
impl<S: CatalogSource> CatalogSource for RetryingSource<S> {
    async fn list_items(&self, query: Option<&str>) -> Result<Vec<Item>, CatalogError> {
        self.run("items", move || self.inner.list_items(query)).await
    }

    async fn item_details(&self, id: &str) -> Result<ItemWithPrices, CatalogError> {
        let what = format!("details for item {}", id);
        self.run(&what, move || self.inner.item_details(id)).await
    }
}
