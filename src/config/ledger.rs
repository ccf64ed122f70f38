//! Seed ledger loading from ledger.toml
//!
//! The record store lives in memory only, so a TOML file is the way to start a session
//! with data already in place. Sellers carry explicit ids so orders can reference them;
//! the file is applied to the store by [`crate::core::seed::seed_ledger`].

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire ledger.toml file
#[derive(Debug, Default, Deserialize)]
pub struct LedgerConfig {
    /// Sellers to insert, in file order
    #[serde(default)]
    pub sellers: Vec<SellerConfig>,
    /// Orders to insert, in file order
    #[serde(default)]
    pub orders: Vec<OrderConfig>,
}

/// Configuration for a single seller
#[derive(Debug, Deserialize, Clone)]
pub struct SellerConfig {
    /// Seller id referenced by `[[orders]]` entries
    pub id: i64,
    /// Display name
    pub name: String,
    /// Charge per cubic metre
    pub rate_per_cubic_meter: f64,
    /// Charge per order with 3 or fewer products
    pub rate_under_three: f64,
    /// Charge per order with more than 3 products
    pub rate_over_three: f64,
}

/// Configuration for a single monthly order record
#[derive(Debug, Deserialize, Clone)]
pub struct OrderConfig {
    /// Id of the seller the order is billed to
    pub seller_id: i64,
    /// Month key (`YYYY-MM`)
    pub month: String,
    #[serde(default)]
    pub quantity_under_three: i64,
    #[serde(default)]
    pub quantity_over_three: i64,
    /// Shipped volume in cubic metres
    pub volume: f64,
}

/// Loads a seed ledger from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<LedgerConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load ledger from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read ledger file {}: {e}", path_ref.display()),
    })?;

    parse_config(&contents)
}

/// Parses a seed ledger from TOML text
pub fn parse_config(contents: &str) -> Result<LedgerConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse ledger.toml: {e}"),
    })
}

/// Loads the seed ledger from the default location (./ledger.toml)
pub fn load_default_config() -> Result<LedgerConfig> {
    load_config("ledger.toml")
}
