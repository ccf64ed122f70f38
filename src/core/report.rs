//! Revenue report generation.
//!
//! This module derives the monthly and per-seller revenue statistics from the full set of
//! sellers and orders. The two aggregators are pure functions over slices: they never fail,
//! never cache, and are recomputed from scratch every time a report is requested.
//!
//! An order's revenue has three components, each billed at one of the seller's rates:
//! volume (per cubic metre), orders with three or fewer products, and orders with more
//! than three products. Orders whose seller cannot be resolved still count towards order
//! and volume totals but contribute no revenue.

use crate::{
    core::{month::format_month_label, order::get_all_orders, seller::get_all_sellers},
    entities::{order, seller},
    errors::Result,
};
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Write;

/// Seller name shown when an order references a seller that no longer exists.
pub const UNKNOWN_SELLER: &str = "Unknown";

/// Aggregated figures for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyStats {
    /// Month key (`YYYY-MM`)
    pub month: String,
    /// Sum of both quantity tiers across the month's orders
    pub total_orders: i64,
    /// Number of distinct known sellers with at least one order in the month
    pub total_sellers: usize,
    /// Revenue from the two order-count rates
    pub total_order_amount: f64,
    /// Revenue from the per-cubic-metre rate
    pub total_volume_amount: f64,
    /// `total_order_amount + total_volume_amount`
    pub total_amount: f64,
    /// Shipped volume in cubic metres
    pub total_volume: f64,
}

impl MonthlyStats {
    fn empty(month: &str) -> Self {
        Self {
            month: month.to_string(),
            total_orders: 0,
            total_sellers: 0,
            total_order_amount: 0.0,
            total_volume_amount: 0.0,
            total_amount: 0.0,
            total_volume: 0.0,
        }
    }
}

/// A seller's revenue across all months and its share of the grand total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SellerStats {
    pub seller_id: i64,
    pub seller_name: String,
    /// Revenue across every order and month
    pub total_amount: f64,
    /// Share of the grand total, 0-100. Zero when the grand total is zero.
    pub percentage: f64,
}

/// The three revenue components of a single order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderCharges {
    /// `volume * rate_per_cubic_meter`
    pub volume_charge: f64,
    /// `quantity_under_three * rate_under_three`
    pub under_three_charge: f64,
    /// `quantity_over_three * rate_over_three`
    pub over_three_charge: f64,
}

impl OrderCharges {
    /// Revenue from the order-count tiers
    #[must_use]
    pub fn order_amount(&self) -> f64 {
        self.under_three_charge + self.over_three_charge
    }

    /// Total billed amount for the order
    #[must_use]
    pub fn total(&self) -> f64 {
        self.volume_charge + self.order_amount()
    }
}

/// Applies a seller's rates to an order.
#[must_use]
// Quantities are small manual counts; the i64 -> f64 conversion is exact for them.
#[allow(clippy::cast_precision_loss)]
pub fn order_charges(seller: &seller::Model, order: &order::Model) -> OrderCharges {
    OrderCharges {
        volume_charge: order.volume * seller.rate_per_cubic_meter,
        under_three_charge: order.quantity_under_three as f64 * seller.rate_under_three,
        over_three_charge: order.quantity_over_three as f64 * seller.rate_over_three,
    }
}

fn index_sellers(sellers: &[seller::Model]) -> HashMap<i64, &seller::Model> {
    sellers.iter().map(|s| (s.id, s)).collect()
}

/// Computes one [`MonthlyStats`] entry per distinct order month, newest month first.
///
/// Orders with an unresolvable seller add to `total_orders` and `total_volume` only.
/// `total_sellers` counts distinct resolvable sellers, so a seller with several orders in
/// one month is counted once.
#[must_use]
pub fn compute_monthly_stats(
    sellers: &[seller::Model],
    orders: &[order::Model],
) -> Vec<MonthlyStats> {
    let sellers_by_id = index_sellers(sellers);
    let mut months: BTreeMap<&str, MonthlyStats> = BTreeMap::new();
    let mut active_sellers: HashMap<&str, HashSet<i64>> = HashMap::new();

    for order in orders {
        let stats = months
            .entry(order.month.as_str())
            .or_insert_with(|| MonthlyStats::empty(&order.month));

        stats.total_orders = stats
            .total_orders
            .saturating_add(order.quantity_under_three)
            .saturating_add(order.quantity_over_three);
        stats.total_volume += order.volume;

        let Some(seller) = sellers_by_id.get(&order.seller_id) else {
            continue;
        };

        let charges = order_charges(seller, order);
        stats.total_volume_amount += charges.volume_charge;
        stats.total_order_amount += charges.order_amount();
        stats.total_amount += charges.total();

        active_sellers
            .entry(order.month.as_str())
            .or_default()
            .insert(seller.id);
    }

    months
        .into_iter()
        .rev()
        .map(|(month, mut stats)| {
            stats.total_sellers = active_sellers.get(month).map_or(0, HashSet::len);
            stats
        })
        .collect()
}

/// Computes each seller's revenue across all months, highest revenue first.
///
/// Only sellers with at least one resolvable order appear. Percentages are shares of the
/// grand total and sum to 100; when the grand total is zero every percentage is 0.
#[must_use]
pub fn compute_seller_stats(
    sellers: &[seller::Model],
    orders: &[order::Model],
) -> Vec<SellerStats> {
    let sellers_by_id = index_sellers(sellers);
    let mut totals: HashMap<i64, f64> = HashMap::new();
    let mut grand_total = 0.0;

    for order in orders {
        if let Some(seller) = sellers_by_id.get(&order.seller_id) {
            let amount = order_charges(seller, order).total();
            *totals.entry(seller.id).or_insert(0.0) += amount;
            grand_total += amount;
        }
    }

    // Walk the seller list rather than the map so equal totals keep insertion order.
    let mut stats: Vec<SellerStats> = sellers
        .iter()
        .filter_map(|seller| {
            totals.remove(&seller.id).map(|total_amount| SellerStats {
                seller_id: seller.id,
                seller_name: seller.name.clone(),
                total_amount,
                percentage: calculate_percentage(total_amount, grand_total),
            })
        })
        .collect();

    stats.sort_by(|a, b| b.total_amount.total_cmp(&a.total_amount));
    stats
}

/// Share of `amount` in `total` as a percentage, or 0 when the total is zero.
#[must_use]
pub fn calculate_percentage(amount: f64, total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }

    (amount / total) * 100.0
}

/// Both record collections, read at the same point in time.
#[derive(Debug, Clone, Default)]
pub struct LedgerSnapshot {
    pub sellers: Vec<seller::Model>,
    pub orders: Vec<order::Model>,
}

impl LedgerSnapshot {
    /// Monthly statistics over this snapshot
    #[must_use]
    pub fn monthly_stats(&self) -> Vec<MonthlyStats> {
        compute_monthly_stats(&self.sellers, &self.orders)
    }

    /// Seller statistics over this snapshot
    #[must_use]
    pub fn seller_stats(&self) -> Vec<SellerStats> {
        compute_seller_stats(&self.sellers, &self.orders)
    }
}

/// Reads sellers and orders inside one transaction so a report never sees a
/// half-applied change such as a seller deleted without its orders.
pub async fn load_snapshot(db: &DatabaseConnection) -> Result<LedgerSnapshot> {
    let txn = db.begin().await?;
    let sellers = get_all_sellers(&txn).await?;
    let orders = get_all_orders(&txn).await?;
    txn.commit().await?;

    Ok(LedgerSnapshot { sellers, orders })
}

/// Loads the current records and computes the monthly report.
pub async fn generate_monthly_report(db: &DatabaseConnection) -> Result<Vec<MonthlyStats>> {
    let snapshot = load_snapshot(db).await?;
    let stats = snapshot.monthly_stats();
    tracing::debug!(
        "Monthly report: {} months from {} orders",
        stats.len(),
        snapshot.orders.len()
    );
    Ok(stats)
}

/// Loads the current records and computes the seller revenue report.
pub async fn generate_seller_report(db: &DatabaseConnection) -> Result<Vec<SellerStats>> {
    let snapshot = load_snapshot(db).await?;
    let stats = snapshot.seller_stats();
    tracing::debug!("Seller report: {} sellers with revenue", stats.len());
    Ok(stats)
}

/// Formats an amount as Indonesian Rupiah with no fraction digits, e.g. `Rp 33.000`.
#[must_use]
// Display rounding only; amounts are far below the i64 range.
#[allow(clippy::cast_possible_truncation)]
pub fn format_idr(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("-Rp {grouped}")
    } else {
        format!("Rp {grouped}")
    }
}

/// Formats a volume with six decimals, e.g. `1.500000 m³`.
#[must_use]
pub fn format_volume(volume: f64) -> String {
    format!("{volume:.6} m³")
}

/// Formats a percentage with one decimal, e.g. `62.5%`.
#[must_use]
pub fn format_percentage(percentage: f64) -> String {
    format!("{percentage:.1}%")
}

/// Renders the monthly report as a plain-text table.
#[must_use]
pub fn format_monthly_table(stats: &[MonthlyStats]) -> String {
    if stats.is_empty() {
        return "No orders recorded.\n".to_string();
    }

    let mut table = format!(
        "{:<16} {:>8} {:>8} {:>16} {:>16} {:>16} {:>16}\n",
        "Month",
        "Orders",
        "Sellers",
        "Order Revenue",
        "Volume Revenue",
        "Total Revenue",
        "Total Volume"
    );

    for stat in stats {
        // write! is infallible when writing to String
        let _ = writeln!(
            table,
            "{:<16} {:>8} {:>8} {:>16} {:>16} {:>16} {:>16}",
            format_month_label(&stat.month),
            stat.total_orders,
            stat.total_sellers,
            format_idr(stat.total_order_amount),
            format_idr(stat.total_volume_amount),
            format_idr(stat.total_amount),
            format_volume(stat.total_volume)
        );
    }

    table
}

/// Renders the seller revenue report as a plain-text table.
#[must_use]
pub fn format_seller_table(stats: &[SellerStats]) -> String {
    if stats.is_empty() {
        return "No seller revenue recorded.\n".to_string();
    }

    let mut table = format!("{:<24} {:>16} {:>8}\n", "Seller", "Revenue", "Share");
    for stat in stats {
        let _ = writeln!(
            table,
            "{:<24} {:>16} {:>8}",
            stat.seller_name,
            format_idr(stat.total_amount),
            format_percentage(stat.percentage)
        );
    }

    table
}

/// Renders the seller list with each seller's three billing rates.
#[must_use]
pub fn format_rate_table(sellers: &[seller::Model]) -> String {
    if sellers.is_empty() {
        return "No sellers recorded.\n".to_string();
    }

    let mut table = format!(
        "{:<24} {:>16} {:>16} {:>16}\n",
        "Seller", "Per m³", "≤3 Products", ">3 Products"
    );
    for seller in sellers {
        let _ = writeln!(
            table,
            "{:<24} {:>16} {:>16} {:>16}",
            seller.name,
            format_idr(seller.rate_per_cubic_meter),
            format_idr(seller.rate_under_three),
            format_idr(seller.rate_over_three)
        );
    }

    table
}
