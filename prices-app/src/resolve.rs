use futures_util::future::join_all;
use prices_cart::CartLine;
use prices_catalog::{CatalogSource, PriceBook};

/// Fetch details for every cart line in parallel. Items that fail to load are
/// logged and left out, so pricing treats them as having no price data.
pub async fn fetch_price_book(source: &dyn CatalogSource, lines: &[CartLine]) -> PriceBook {
    let requests = lines.iter().map(|line| async move {
        (line.item_id.as_str(), source.item_details(&line.item_id).await)
    });

    let mut book = PriceBook::new();
    for (id, result) in join_all(requests).await {
        match result {
            Ok(details) => {
                book.insert(id.to_string(), details);
            }
            Err(e) => tracing::error!("Failed to fetch details for item {}: {}", id, e),
        }
    }
    book
}

#[cfg(test)]
mod tests {
    use super::*;
    use prices_catalog::DemoCatalog;

    #[tokio::test]
    async fn test_fetch_price_book_skips_failures() {
        let catalog = DemoCatalog::new();
        let lines = vec![CartLine::new("3", 1), CartLine::new("404", 1), CartLine::new("4", 2)];
        let book = fetch_price_book(&catalog, &lines).await;

        assert_eq!(book.len(), 2);
        assert!(book.contains_key("3"));
        assert!(book.contains_key("4"));
        assert!(!book.contains_key("404"));
    }
}
