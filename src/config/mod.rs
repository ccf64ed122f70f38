/// Record store connection and table creation
pub mod database;

/// Seed ledger loading from ledger.toml
pub mod ledger;
