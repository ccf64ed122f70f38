//! Seeding the in-memory record store from a [`LedgerConfig`].
//!
//! This is the import path of the ledger. Sellers keep the ids given in the file so that
//! orders can refer to them. Field validation matches the interactive operations, with one
//! exception: an order whose seller id is unknown is imported anyway and reported as
//! "Unknown" (zero revenue) by the reports.

use crate::{
    config::ledger::LedgerConfig,
    core::{
        order::{NewOrder, validate_order_fields},
        seller::{SellerRates, validate_seller},
    },
    entities::{order, seller},
    errors::{Error, Result},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set, TransactionTrait};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Counts of records inserted by [`seed_ledger`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub sellers: usize,
    pub orders: usize,
    /// Orders whose seller id matched no seeded seller
    pub orphaned_orders: usize,
}

/// Inserts every seller and order from the configuration in a single transaction.
///
/// # Errors
/// Returns an error, leaving the store unchanged, if:
/// - Two sellers share an id
/// - A seller or order fails field validation
/// - A database insert fails
pub async fn seed_ledger(db: &DatabaseConnection, config: &LedgerConfig) -> Result<SeedSummary> {
    info!(
        "Seeding ledger with {} sellers and {} orders",
        config.sellers.len(),
        config.orders.len()
    );

    let txn = db.begin().await?;
    let mut summary = SeedSummary::default();
    let mut seller_ids = HashSet::new();

    for cfg_seller in &config.sellers {
        if !seller_ids.insert(cfg_seller.id) {
            return Err(Error::Config {
                message: format!("Duplicate seller id {} in ledger", cfg_seller.id),
            });
        }

        let rates = SellerRates {
            per_cubic_meter: cfg_seller.rate_per_cubic_meter,
            under_three: cfg_seller.rate_under_three,
            over_three: cfg_seller.rate_over_three,
        };
        let name = validate_seller(&cfg_seller.name, &rates)?;

        debug!("Inserting seller {} ({})", cfg_seller.id, name);
        seller::ActiveModel {
            id: Set(cfg_seller.id),
            name: Set(name),
            rate_per_cubic_meter: Set(rates.per_cubic_meter),
            rate_under_three: Set(rates.under_three),
            rate_over_three: Set(rates.over_three),
        }
        .insert(&txn)
        .await?;
        summary.sellers += 1;
    }

    let now = chrono::Utc::now();
    for cfg_order in &config.orders {
        let new_order = NewOrder {
            seller_id: cfg_order.seller_id,
            month: cfg_order.month.clone(),
            quantity_under_three: cfg_order.quantity_under_three,
            quantity_over_three: cfg_order.quantity_over_three,
            volume: cfg_order.volume,
        };
        validate_order_fields(&new_order)?;

        if !seller_ids.contains(&new_order.seller_id) {
            warn!(
                "Order for {} references unknown seller {}; importing it without revenue",
                new_order.month, new_order.seller_id
            );
            summary.orphaned_orders += 1;
        }

        order::ActiveModel {
            seller_id: Set(new_order.seller_id),
            month: Set(new_order.month),
            quantity_under_three: Set(new_order.quantity_under_three),
            quantity_over_three: Set(new_order.quantity_over_three),
            volume: Set(new_order.volume),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        summary.orders += 1;
    }

    txn.commit().await?;
    info!(
        "Finished seeding ledger: {} sellers, {} orders ({} orphaned)",
        summary.sellers, summary.orders, summary.orphaned_orders
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{
        config::ledger::parse_config,
        core::{
            order::{create_order, get_all_orders},
            report::{compute_monthly_stats, load_snapshot},
            seller::{create_seller, get_all_sellers},
        },
        test_utils::*,
    };

    const LEDGER: &str = r#"
        [[sellers]]
        id = 10
        name = "Toko Maju"
        rate_per_cubic_meter = 10000.0
        rate_under_three = 5000.0
        rate_over_three = 8000.0

        [[sellers]]
        id = 20
        name = "Gudang Jaya"
        rate_per_cubic_meter = 12000.0
        rate_under_three = 4000.0
        rate_over_three = 7000.0

        [[orders]]
        seller_id = 10
        month = "2024-01"
        quantity_under_three = 2
        quantity_over_three = 1
        volume = 1.5

        [[orders]]
        seller_id = 99
        month = "2024-01"
        quantity_under_three = 4
        volume = 0.5
    "#;

    #[tokio::test]
    async fn test_seed_ledger_keeps_ids_and_allows_orphans() -> Result<()> {
        let db = setup_test_db().await?;
        let config = parse_config(LEDGER)?;

        let summary = seed_ledger(&db, &config).await?;
        assert_eq!(
            summary,
            SeedSummary {
                sellers: 2,
                orders: 2,
                orphaned_orders: 1,
            }
        );

        let sellers = get_all_sellers(&db).await?;
        assert_eq!(sellers.iter().map(|s| s.id).collect::<Vec<_>>(), vec![10, 20]);

        let snapshot = load_snapshot(&db).await?;
        let stats = compute_monthly_stats(&snapshot.sellers, &snapshot.orders);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].total_orders, 7);
        assert_eq!(stats[0].total_volume, 2.0);
        assert_eq!(stats[0].total_amount, 33000.0);
        assert_eq!(stats[0].total_sellers, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_then_create_gets_fresh_ids() -> Result<()> {
        let db = setup_test_db().await?;
        seed_ledger(&db, &parse_config(LEDGER)?).await?;

        let seller = create_seller(&db, "Newcomer", test_rates()).await?;
        assert!(seller.id > 20);

        create_order(
            &db,
            NewOrder {
                seller_id: seller.id,
                month: "2024-02".to_string(),
                quantity_under_three: 1,
                quantity_over_three: 0,
                volume: 0.1,
            },
        )
        .await?;
        assert_eq!(get_all_orders(&db).await?.len(), 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_duplicate_seller_id_rolls_back() -> Result<()> {
        let db = setup_test_db().await?;
        let config = parse_config(
            r#"
            [[sellers]]
            id = 1
            name = "First"
            rate_per_cubic_meter = 1.0
            rate_under_three = 1.0
            rate_over_three = 1.0

            [[sellers]]
            id = 1
            name = "Second"
            rate_per_cubic_meter = 1.0
            rate_under_three = 1.0
            rate_over_three = 1.0
            "#,
        )?;

        let result = seed_ledger(&db, &config).await;
        assert!(matches!(result, Err(Error::Config { .. })));
        assert!(get_all_sellers(&db).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_invalid_order_is_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let config = parse_config(
            r#"
            [[orders]]
            seller_id = 1
            month = "2024-13"
            quantity_under_three = 1
            volume = 1.0
            "#,
        )?;

        let result = seed_ledger(&db, &config).await;
        assert!(matches!(result, Err(Error::InvalidMonth { .. })));
        assert!(get_all_orders(&db).await?.is_empty());

        Ok(())
    }
}
