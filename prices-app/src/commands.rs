use std::fmt::Write;
use std::sync::Mutex;

use anyhow::Context;
use prices_cart::{shopping_list, CartLine, CartStore};
use prices_catalog::history::{price_bounds, simulate_price_history};
use prices_catalog::pricing::{format_price_with, sorted_by_price};
use prices_catalog::{CatalogSource, PriceBook, StorePrice};
use prices_core::{StoreTotal, TotalsCache};
use prices_store::CartRepository;

use crate::report::Report;
use crate::resolve::fetch_price_book;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Cart lines and store totals
    Report,
    /// Catalog listing with an optional name filter
    List(Option<String>),
    /// Per-store prices for one item, optionally restricted to some stores
    Show { id: String, stores: Vec<String> },
    /// Simulated 30-day price history for one item at one store
    History { id: String, store: String },
    Add(Vec<String>),
    Remove(String),
    Set { id: String, quantity: i64 },
    Clear,
    /// Shopping list text
    Export,
    /// Store totals as JSON
    Totals,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),
}

impl Command {
    pub fn parse(args: &[String]) -> Result<Self, CommandError> {
        let Some((name, rest)) = args.split_first() else {
            return Ok(Command::Report);
        };

        match name.as_str() {
            "report" => Ok(Command::Report),
            "list" => Ok(Command::List(
                Some(rest.join(" ")).filter(|q| !q.trim().is_empty()),
            )),
            "show" => {
                let (id, stores) = rest.split_first().ok_or(CommandError::MissingArgument("item id"))?;
                Ok(Command::Show { id: id.clone(), stores: stores.to_vec() })
            }
            "history" => match rest {
                [id, store, ..] => Ok(Command::History { id: id.clone(), store: store.clone() }),
                [_] => Err(CommandError::MissingArgument("store")),
                [] => Err(CommandError::MissingArgument("item id")),
            },
            "add" if rest.is_empty() => Err(CommandError::MissingArgument("item id")),
            "add" => Ok(Command::Add(rest.to_vec())),
            "remove" => rest
                .first()
                .map(|id| Command::Remove(id.clone()))
                .ok_or(CommandError::MissingArgument("item id")),
            "set" => match rest {
                [id, quantity, ..] => {
                    let quantity = quantity
                        .parse()
                        .map_err(|_| CommandError::InvalidQuantity(quantity.clone()))?;
                    Ok(Command::Set { id: id.clone(), quantity })
                }
                [_] => Err(CommandError::MissingArgument("quantity")),
                [] => Err(CommandError::MissingArgument("item id")),
            },
            "clear" => Ok(Command::Clear),
            "export" => Ok(Command::Export),
            "totals" => Ok(Command::Totals),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Everything a command needs. Store totals are memoized across commands.
pub struct Session<'a> {
    pub source: &'a dyn CatalogSource,
    pub carts: &'a CartRepository,
    pub currency_symbol: &'a str,
    totals: Mutex<TotalsCache>,
}

impl<'a> Session<'a> {
    pub fn new(source: &'a dyn CatalogSource, carts: &'a CartRepository, currency_symbol: &'a str) -> Self {
        Self {
            source,
            carts,
            currency_symbol,
            totals: Mutex::new(TotalsCache::new()),
        }
    }

    /// (hits, misses) of the store totals cache
    pub fn cache_stats(&self) -> (u64, u64) {
        let cache = self.totals.lock().unwrap_or_else(|e| e.into_inner());
        (cache.hits(), cache.misses())
    }

    fn store_totals(&self, lines: &[CartLine], book: &PriceBook) -> Vec<StoreTotal> {
        let mut cache = self.totals.lock().unwrap_or_else(|e| e.into_inner());
        cache.get_or_compute(lines, book).to_vec()
    }

    fn price(&self, value: f64) -> String {
        format_price_with(self.currency_symbol, value)
    }

    pub async fn run(&self, command: Command) -> anyhow::Result<String> {
        let mut cart = self.carts.load().await;

        match command {
            Command::Report => self.report(&cart).await,
            Command::List(query) => {
                let items = self
                    .source
                    .list_items(query.as_deref())
                    .await
                    .context("Failed to fetch items")?;
                let mut out = String::new();
                for item in items {
                    let _ = writeln!(out, "{:>4}  {}  from {}", item.id, item.name, self.price(item.lowest_price));
                }
                Ok(out)
            }
            Command::Show { id, stores } => {
                let details = self
                    .source
                    .item_details(&id)
                    .await
                    .with_context(|| format!("Failed to fetch details for item {}", id))?;
                let prices = prices_catalog::filter::filter_by_stores(&details.prices, &stores);
                Ok(self.render_prices(&details.name, &sorted_by_price(&prices)))
            }
            Command::History { id, store } => {
                let details = self
                    .source
                    .item_details(&id)
                    .await
                    .with_context(|| format!("Failed to fetch details for item {}", id))?;
                let current = prices_catalog::filter::filter_by_stores(&details.prices, &[store.clone()])
                    .pop()
                    .with_context(|| format!("{} has no price at {}", details.name, store))?;
                let history = simulate_price_history(current.price);
                let mut out = format!("30-Day Price History at {}\n", current.store);
                for point in &history {
                    let _ = writeln!(out, "  {}  {}", point.date, self.price(point.price));
                }
                if let Some((lo, hi)) = price_bounds(&history) {
                    let _ = writeln!(out, "  range {} - {}", self.price(lo), self.price(hi));
                }
                Ok(out)
            }
            Command::Add(ids) => {
                for id in &ids {
                    let details = self
                        .source
                        .item_details(id)
                        .await
                        .with_context(|| format!("Failed to fetch details for item {}", id))?;
                    cart.add_item(&details.summary());
                }
                self.carts.save(&cart).await?;
                Ok(format!("Cart now holds {} items\n", cart.item_count()))
            }
            Command::Remove(id) => {
                cart.remove_item(&id);
                self.carts.save(&cart).await?;
                Ok(format!("Cart now holds {} items\n", cart.item_count()))
            }
            Command::Set { id, quantity } => {
                cart.update_quantity(&id, quantity)?;
                self.carts.save(&cart).await?;
                Ok(format!("Cart now holds {} items\n", cart.item_count()))
            }
            Command::Clear => {
                cart.clear();
                self.carts.save(&cart).await?;
                Ok("Cart cleared\n".to_string())
            }
            Command::Export => {
                let book = fetch_price_book(self.source, &cart.lines()).await;
                Ok(shopping_list(cart.entries(), &book) + "\n")
            }
            Command::Totals => {
                let lines = cart.lines();
                let book = fetch_price_book(self.source, &lines).await;
                let totals = self.store_totals(&lines, &book);
                Ok(serde_json::to_string_pretty(&totals)? + "\n")
            }
        }
    }

    async fn report(&self, cart: &CartStore) -> anyhow::Result<String> {
        let lines = cart.lines();
        let book = fetch_price_book(self.source, &lines).await;
        let totals = self.store_totals(&lines, &book);

        Ok(Report {
            entries: cart.entries(),
            book: &book,
            totals: &totals,
            currency_symbol: self.currency_symbol,
        }
        .render())
    }

    fn render_prices(&self, name: &str, prices: &[StorePrice]) -> String {
        let mut out = format!("{}\n", name);
        for (i, entry) in prices.iter().enumerate() {
            let location = entry.location.as_deref().unwrap_or("");
            let tag = if i == 0 { "  lowest" } else { "" };
            let _ = writeln!(out, "  {}  {}  {}{}", self.price(entry.price), entry.store, location, tag);
        }
        out
    }
}
