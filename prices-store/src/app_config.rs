use serde::Deserialize;
use std::env;
use std::time::Duration;

use prices_catalog::FetchPolicy;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub cart: CartConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// JSON file in the backend `/items` shape. Demo data when unset.
    pub data_file: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_retries")]
    pub retries: u32,
}

impl CatalogConfig {
    pub fn fetch_policy(&self) -> FetchPolicy {
        FetchPolicy {
            timeout: Duration::from_millis(self.timeout_ms),
            retries: self.retries,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            timeout_ms: default_timeout_ms(),
            retries: default_retries(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CartConfig {
    #[serde(default = "default_snapshot_file")]
    pub snapshot_file: String,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self { snapshot_file: default_snapshot_file() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { currency_symbol: default_currency_symbol() }
    }
}

fn default_timeout_ms() -> u64 { 15_000 }
fn default_retries() -> u32 { 2 }
fn default_snapshot_file() -> String { "groceryCart.json".to_string() }
fn default_currency_symbol() -> String { prices_catalog::pricing::CURRENCY_SYMBOL.to_string() }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    pub fn load_from(dir: &str) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name(&format!("{}/default", dir)).required(false))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("{}/{}", dir, run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name(&format!("{}/local", dir)).required(false))
            // Eg. `PRICES__CATALOG__RETRIES=5`
            .add_source(config::Environment::with_prefix("PRICES").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
