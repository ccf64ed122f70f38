//! Seller business logic - Handles all seller-related record store operations.
//!
//! This module provides functions for creating, retrieving, updating and deleting sellers.
//! Deleting a seller cascades to every order billed to it, inside a single database
//! transaction, so no report can observe a seller's orders without the seller.

use crate::{
    entities::{Order, Seller, order, seller},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// The three billing rates of a seller, as entered on the seller form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SellerRates {
    /// Charge per cubic metre of shipped volume
    pub per_cubic_meter: f64,
    /// Charge per order with 3 or fewer products
    pub under_three: f64,
    /// Charge per order with more than 3 products
    pub over_three: f64,
}

/// Retrieves all sellers in the order they were created.
pub async fn get_all_sellers<C>(db: &C) -> Result<Vec<seller::Model>>
where
    C: ConnectionTrait,
{
    Seller::find()
        .order_by_asc(seller::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a seller by its unique ID, returning None if it does not exist.
pub async fn get_seller_by_id<C>(db: &C, seller_id: i64) -> Result<Option<seller::Model>>
where
    C: ConnectionTrait,
{
    Seller::find_by_id(seller_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Validates a seller name and its rates, returning the trimmed name.
///
/// Rates must be finite and non-negative.
pub(crate) fn validate_seller(name: &str, rates: &SellerRates) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Seller name cannot be empty".to_string(),
        });
    }

    for rate in [rates.per_cubic_meter, rates.under_three, rates.over_three] {
        if !rate.is_finite() || rate < 0.0 {
            return Err(Error::InvalidAmount { amount: rate });
        }
    }

    Ok(name.to_string())
}

/// Creates a new seller, performing input validation.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - Any rate is negative or not finite (NaN, infinity)
/// - The database insert operation fails
pub async fn create_seller(
    db: &DatabaseConnection,
    name: &str,
    rates: SellerRates,
) -> Result<seller::Model> {
    let name = validate_seller(name, &rates)?;

    let seller = seller::ActiveModel {
        name: Set(name),
        rate_per_cubic_meter: Set(rates.per_cubic_meter),
        rate_under_three: Set(rates.under_three),
        rate_over_three: Set(rates.over_three),
        ..Default::default()
    };

    let created = seller.insert(db).await?;
    info!("Created seller {} ({})", created.id, created.name);
    Ok(created)
}

/// Updates a seller's name and rates. The id never changes.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - Any rate is negative or not finite
/// - The seller does not exist
/// - The database update operation fails
pub async fn update_seller(
    db: &DatabaseConnection,
    seller_id: i64,
    name: &str,
    rates: SellerRates,
) -> Result<seller::Model> {
    let name = validate_seller(name, &rates)?;

    let mut seller: seller::ActiveModel = Seller::find_by_id(seller_id)
        .one(db)
        .await?
        .ok_or(Error::SellerNotFound { id: seller_id })?
        .into();

    seller.name = Set(name);
    seller.rate_per_cubic_meter = Set(rates.per_cubic_meter);
    seller.rate_under_three = Set(rates.under_three);
    seller.rate_over_three = Set(rates.over_three);

    seller.update(db).await.map_err(Into::into)
}

/// Deletes a seller together with every order billed to it.
///
/// Both deletions run in one transaction: either the seller and all of its orders
/// disappear, or nothing changes.
///
/// # Returns
/// The number of orders removed by the cascade
pub async fn delete_seller(db: &DatabaseConnection, seller_id: i64) -> Result<u64> {
    let txn = db.begin().await?;

    let seller = Seller::find_by_id(seller_id)
        .one(&txn)
        .await?
        .ok_or(Error::SellerNotFound { id: seller_id })?;

    let removed_orders = Order::delete_many()
        .filter(order::Column::SellerId.eq(seller_id))
        .exec(&txn)
        .await?
        .rows_affected;

    Seller::delete_by_id(seller_id).exec(&txn).await?;

    txn.commit().await?;

    info!(
        "Deleted seller {} ({}) and {} associated orders",
        seller.id, seller.name, removed_orders
    );
    Ok(removed_orders)
}
