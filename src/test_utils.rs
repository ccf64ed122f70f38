//! Shared test utilities for the sales ledger.
//!
//! This module provides helpers for setting up an empty record store and creating
//! sellers and orders with sensible defaults, plus plain models for the pure
//! aggregation tests.

use crate::{
    core::{
        order::{self, NewOrder},
        seller::{self, SellerRates},
    },
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Default rates: 10000 per m³, 5000 per order with ≤3 products, 8000 per order with >3.
#[must_use]
pub const fn test_rates() -> SellerRates {
    SellerRates {
        per_cubic_meter: 10000.0,
        under_three: 5000.0,
        over_three: 8000.0,
    }
}

/// Creates a test seller with [`test_rates`].
pub async fn create_test_seller(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::seller::Model> {
    seller::create_seller(db, name, test_rates()).await
}

/// Creates a test seller with custom rates.
pub async fn create_custom_seller(
    db: &DatabaseConnection,
    name: &str,
    per_cubic_meter: f64,
    under_three: f64,
    over_three: f64,
) -> Result<entities::seller::Model> {
    seller::create_seller(
        db,
        name,
        SellerRates {
            per_cubic_meter,
            under_three,
            over_three,
        },
    )
    .await
}

/// Creates a test order with sensible defaults.
///
/// # Defaults
/// * `quantity_under_three`: 2
/// * `quantity_over_three`: 1
/// * `volume`: 1.5
pub async fn create_test_order(
    db: &DatabaseConnection,
    seller_id: i64,
    month: &str,
) -> Result<entities::order::Model> {
    create_custom_order(db, seller_id, month, 2, 1, 1.5).await
}

/// Creates a test order with custom quantities and volume.
pub async fn create_custom_order(
    db: &DatabaseConnection,
    seller_id: i64,
    month: &str,
    quantity_under_three: i64,
    quantity_over_three: i64,
    volume: f64,
) -> Result<entities::order::Model> {
    order::create_order(
        db,
        NewOrder {
            seller_id,
            month: month.to_string(),
            quantity_under_three,
            quantity_over_three,
            volume,
        },
    )
    .await
}

/// Sets up a complete test environment with one seller.
/// Returns (db, seller) for common test scenarios.
pub async fn setup_with_seller() -> Result<(DatabaseConnection, entities::seller::Model)> {
    let db = setup_test_db().await?;
    let seller = create_test_seller(&db, "Test Seller").await?;
    Ok((db, seller))
}

/// Builds a seller model without touching a database.
#[must_use]
pub fn seller_model(
    id: i64,
    name: &str,
    rate_per_cubic_meter: f64,
    rate_under_three: f64,
    rate_over_three: f64,
) -> entities::seller::Model {
    entities::seller::Model {
        id,
        name: name.to_string(),
        rate_per_cubic_meter,
        rate_under_three,
        rate_over_three,
    }
}

/// Builds an order model without touching a database.
#[must_use]
pub fn order_model(
    id: i64,
    seller_id: i64,
    month: &str,
    quantity_under_three: i64,
    quantity_over_three: i64,
    volume: f64,
) -> entities::order::Model {
    entities::order::Model {
        id,
        seller_id,
        month: month.to_string(),
        quantity_under_three,
        quantity_over_three,
        volume,
        created_at: chrono::Utc::now(),
    }
}
