//! Order business logic - Handles all order-related record store operations.
//!
//! An order is one monthly record of shipped volume and order counts for a seller.
//! Creating or editing an order validates the same things the order form did: a well-formed
//! month key, at least one positive quantity, a non-negative volume and a known seller.

use crate::{
    core::{month::parse_month_key, seller::get_seller_by_id},
    entities::{Order, order},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info};

/// Cubic centimetres per cubic metre
const CM3_PER_M3: f64 = 1_000_000.0;

/// Fields of an order as entered on the order form.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    /// Seller the order is billed to
    pub seller_id: i64,
    /// Month key in `YYYY-MM` format
    pub month: String,
    /// Number of orders with 3 or fewer products
    pub quantity_under_three: i64,
    /// Number of orders with more than 3 products
    pub quantity_over_three: i64,
    /// Shipped volume in cubic metres
    pub volume: f64,
}

/// Validates the order fields that do not need the database.
pub(crate) fn validate_order_fields(order: &NewOrder) -> Result<()> {
    parse_month_key(&order.month)?;

    if order.quantity_under_three < 0 || order.quantity_over_three < 0 {
        return Err(Error::Validation {
            message: "Order quantities cannot be negative".to_string(),
        });
    }

    if order.quantity_under_three == 0 && order.quantity_over_three == 0 {
        return Err(Error::EmptyOrder);
    }

    if !order.volume.is_finite() || order.volume < 0.0 {
        return Err(Error::InvalidAmount {
            amount: order.volume,
        });
    }

    Ok(())
}

/// Validates an order and checks that its seller exists.
async fn validate_order(db: &DatabaseConnection, order: &NewOrder) -> Result<()> {
    validate_order_fields(order)?;

    if get_seller_by_id(db, order.seller_id).await?.is_none() {
        return Err(Error::SellerNotFound {
            id: order.seller_id,
        });
    }

    Ok(())
}

/// Retrieves all orders in the order they were recorded.
pub async fn get_all_orders<C>(db: &C) -> Result<Vec<order::Model>>
where
    C: ConnectionTrait,
{
    Order::find()
        .order_by_asc(order::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all orders billed to one seller, oldest first.
pub async fn get_orders_for_seller(
    db: &DatabaseConnection,
    seller_id: i64,
) -> Result<Vec<order::Model>> {
    Order::find()
        .filter(order::Column::SellerId.eq(seller_id))
        .order_by_asc(order::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific order by its unique ID.
pub async fn get_order_by_id(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Option<order::Model>> {
    Order::find_by_id(order_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Records a new order.
///
/// # Errors
/// Returns an error if:
/// - The month is not a `YYYY-MM` key
/// - A quantity is negative, or both quantities are zero
/// - The volume is negative or not finite
/// - The seller does not exist
/// - The database insert operation fails
pub async fn create_order(db: &DatabaseConnection, new_order: NewOrder) -> Result<order::Model> {
    validate_order(db, &new_order).await?;

    let order = order::ActiveModel {
        seller_id: Set(new_order.seller_id),
        month: Set(new_order.month),
        quantity_under_three: Set(new_order.quantity_under_three),
        quantity_over_three: Set(new_order.quantity_over_three),
        volume: Set(new_order.volume),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let created = order.insert(db).await?;
    debug!(
        "Recorded order {} for seller {} in {}",
        created.id, created.seller_id, created.month
    );
    Ok(created)
}

/// Replaces every editable field of an order, including its seller and month.
///
/// The creation timestamp is preserved.
pub async fn update_order(
    db: &DatabaseConnection,
    order_id: i64,
    changes: NewOrder,
) -> Result<order::Model> {
    let mut order: order::ActiveModel = Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?
        .into();

    validate_order(db, &changes).await?;

    order.seller_id = Set(changes.seller_id);
    order.month = Set(changes.month);
    order.quantity_under_three = Set(changes.quantity_under_three);
    order.quantity_over_three = Set(changes.quantity_over_three);
    order.volume = Set(changes.volume);

    order.update(db).await.map_err(Into::into)
}

/// Deletes an order.
pub async fn delete_order(db: &DatabaseConnection, order_id: i64) -> Result<()> {
    let result = Order::delete_by_id(order_id).exec(db).await?;

    if result.rows_affected == 0 {
        return Err(Error::OrderNotFound { id: order_id });
    }

    info!("Deleted order {order_id}");
    Ok(())
}

/// Converts package dimensions in centimetres to a volume in cubic metres.
///
/// # Errors
/// Returns `Error::InvalidAmount` for a negative or non-finite dimension.
pub fn volume_from_dimensions_cm(length: f64, width: f64, height: f64) -> Result<f64> {
    for dimension in [length, width, height] {
        if !dimension.is_finite() || dimension < 0.0 {
            return Err(Error::InvalidAmount { amount: dimension });
        }
    }

    Ok(length * width * height / CM3_PER_M3)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn order_for(seller_id: i64) -> NewOrder {
        NewOrder {
            seller_id,
            month: "2024-01".to_string(),
            quantity_under_three: 2,
            quantity_over_three: 1,
            volume: 1.5,
        }
    }

    #[tokio::test]
    async fn test_create_order_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        // Malformed month
        let result = create_order(
            &db,
            NewOrder {
                month: "January".to_string(),
                ..order_for(1)
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::InvalidMonth { .. }));

        // Both quantities zero
        let result = create_order(
            &db,
            NewOrder {
                quantity_under_three: 0,
                quantity_over_three: 0,
                ..order_for(1)
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::EmptyOrder));

        // Negative quantity
        let result = create_order(
            &db,
            NewOrder {
                quantity_under_three: -1,
                ..order_for(1)
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        // Negative volume
        let result = create_order(
            &db,
            NewOrder {
                volume: -0.5,
                ..order_for(1)
            },
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidAmount { amount } if amount == -0.5
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_integration() -> Result<()> {
        let (db, seller) = setup_with_seller().await?;

        let order = create_order(&db, order_for(seller.id)).await?;

        assert_eq!(order.seller_id, seller.id);
        assert_eq!(order.month, "2024-01");
        assert_eq!(order.quantity_under_three, 2);
        assert_eq!(order.quantity_over_three, 1);
        assert_eq!(order.volume, 1.5);

        let retrieved = get_order_by_id(&db, order.id).await?;
        assert_eq!(retrieved, Some(order));

        Ok(())
    }

    #[tokio::test]
    async fn test_single_tier_order_is_valid() -> Result<()> {
        let (db, seller) = setup_with_seller().await?;

        let order = create_order(
            &db,
            NewOrder {
                quantity_under_three: 0,
                quantity_over_three: 5,
                volume: 0.0,
                ..order_for(seller.id)
            },
        )
        .await?;
        assert_eq!(order.quantity_over_three, 5);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_unknown_seller() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_order(&db, order_for(7)).await;
        assert!(matches!(result.unwrap_err(), Error::SellerNotFound { id: 7 }));
        assert!(get_all_orders(&db).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_volume_keeps_six_decimals() -> Result<()> {
        let (db, seller) = setup_with_seller().await?;

        let order = create_order(
            &db,
            NewOrder {
                volume: 0.000_123,
                ..order_for(seller.id)
            },
        )
        .await?;
        assert_eq!(order.volume, 0.000_123);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_order_changes_all_fields() -> Result<()> {
        let (db, first) = setup_with_seller().await?;
        let second = create_test_seller(&db, "Second").await?;
        let order = create_order(&db, order_for(first.id)).await?;

        let updated = update_order(
            &db,
            order.id,
            NewOrder {
                seller_id: second.id,
                month: "2025-06".to_string(),
                quantity_under_three: 0,
                quantity_over_three: 9,
                volume: 3.25,
            },
        )
        .await?;

        assert_eq!(updated.id, order.id);
        assert_eq!(updated.seller_id, second.id);
        assert_eq!(updated.month, "2025-06");
        assert_eq!(updated.quantity_under_three, 0);
        assert_eq!(updated.quantity_over_three, 9);
        assert_eq!(updated.volume, 3.25);
        assert_eq!(updated.created_at, order.created_at);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_order_not_found() -> Result<()> {
        let (db, seller) = setup_with_seller().await?;

        let result = update_order(&db, 999, order_for(seller.id)).await;
        assert!(matches!(result.unwrap_err(), Error::OrderNotFound { id: 999 }));

        // A missing order is reported even when the new seller is missing too
        let result = update_order(&db, 999, order_for(404)).await;
        assert!(matches!(result.unwrap_err(), Error::OrderNotFound { id: 999 }));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_order_unknown_seller_keeps_order() -> Result<()> {
        let (db, seller) = setup_with_seller().await?;
        let order = create_order(&db, order_for(seller.id)).await?;

        let result = update_order(&db, order.id, order_for(404)).await;
        assert!(matches!(result.unwrap_err(), Error::SellerNotFound { id: 404 }));
        assert_eq!(get_order_by_id(&db, order.id).await?, Some(order));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_order() -> Result<()> {
        let (db, seller) = setup_with_seller().await?;
        let first = create_order(&db, order_for(seller.id)).await?;
        let second = create_order(&db, order_for(seller.id)).await?;

        delete_order(&db, first.id).await?;

        assert_eq!(get_orders_for_seller(&db, seller.id).await?, vec![second]);
        assert!(matches!(
            delete_order(&db, first.id).await.unwrap_err(),
            Error::OrderNotFound { .. }
        ));

        Ok(())
    }

    #[test]
    fn test_volume_from_dimensions_cm() {
        // 100cm cube is exactly one cubic metre
        assert_eq!(volume_from_dimensions_cm(100.0, 100.0, 100.0).unwrap(), 1.0);

        let volume = volume_from_dimensions_cm(30.0, 20.0, 10.0).unwrap();
        assert!((volume - 0.006).abs() < 1e-12);

        assert!(matches!(
            volume_from_dimensions_cm(-1.0, 1.0, 1.0),
            Err(Error::InvalidAmount { .. })
        ));
        assert!(volume_from_dimensions_cm(1.0, f64::INFINITY, 1.0).is_err());
    }
}
