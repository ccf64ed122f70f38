//! CSV export of ledger records.
//!
//! [`export_csv`] turns any serializable records into CSV text given column headers and
//! dot-separated field paths, so nested values can be reached with `"a.b"`. Every field is
//! quoted; embedded quotes are doubled.

use crate::{
    core::{month::format_month_label, report::MonthlyStats, report::UNKNOWN_SELLER},
    entities::{order, seller},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// One row of the order history export.
#[derive(Debug, Clone, Serialize)]
pub struct OrderExportRow {
    /// Date the order was recorded (`YYYY-MM-DD`)
    pub date: String,
    pub seller_name: String,
    /// Month label, e.g. `"January 2024"`
    pub month: String,
    pub quantity_under_three: i64,
    pub quantity_over_three: i64,
    pub volume: f64,
}

/// Builds CSV text with one header row and one row per record.
///
/// `fields` are resolved against each record's serialized form; a path such as
/// `"seller.name"` walks nested objects. Missing or null values export as empty fields.
///
/// # Errors
/// Returns an error if `headers` and `fields` differ in length, or if a record cannot be
/// serialized.
pub fn export_csv<T: Serialize>(
    records: &[T],
    headers: &[&str],
    fields: &[&str],
) -> Result<String> {
    if headers.len() != fields.len() {
        return Err(Error::Validation {
            message: format!(
                "CSV export needs one header per field ({} headers, {} fields)",
                headers.len(),
                fields.len()
            ),
        });
    }

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(headers)?;

    for record in records {
        let value = serde_json::to_value(record)?;
        let row: Vec<String> = fields
            .iter()
            .map(|path| render_value(lookup_path(&value, path)))
            .collect();
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Io(std::io::Error::other(e.to_string())))?;
    String::from_utf8(bytes).map_err(|e| Error::Validation {
        message: format!("CSV output is not valid UTF-8: {e}"),
    })
}

fn lookup_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, key| current.get(key))
}

fn render_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            // Whole-number floats read better without a trailing ".0"
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
            _ => n.to_string(),
        },
        Some(other) => other.to_string(),
    }
}

/// Exports the seller list with its three rates.
pub fn export_sellers(sellers: &[seller::Model]) -> Result<String> {
    export_csv(
        sellers,
        &[
            "Name",
            "Rate per m³",
            "Rate (≤3 products)",
            "Rate (>3 products)",
        ],
        &[
            "name",
            "rate_per_cubic_meter",
            "rate_under_three",
            "rate_over_three",
        ],
    )
}

/// Prepares order history rows, resolving seller names and month labels.
#[must_use]
pub fn order_export_rows(
    sellers: &[seller::Model],
    orders: &[order::Model],
) -> Vec<OrderExportRow> {
    let names: HashMap<i64, &str> = sellers.iter().map(|s| (s.id, s.name.as_str())).collect();

    orders
        .iter()
        .map(|order| OrderExportRow {
            date: order.created_at.format("%Y-%m-%d").to_string(),
            seller_name: names
                .get(&order.seller_id)
                .copied()
                .unwrap_or(UNKNOWN_SELLER)
                .to_string(),
            month: format_month_label(&order.month),
            quantity_under_three: order.quantity_under_three,
            quantity_over_three: order.quantity_over_three,
            volume: order.volume,
        })
        .collect()
}

/// Exports the order history.
pub fn export_orders(sellers: &[seller::Model], orders: &[order::Model]) -> Result<String> {
    export_csv(
        &order_export_rows(sellers, orders),
        &[
            "Date",
            "Seller",
            "Month",
            "≤3 Products",
            ">3 Products",
            "Volume (m³)",
        ],
        &[
            "date",
            "seller_name",
            "month",
            "quantity_under_three",
            "quantity_over_three",
            "volume",
        ],
    )
}

/// Exports the monthly report.
pub fn export_monthly_stats(stats: &[MonthlyStats]) -> Result<String> {
    export_csv(
        stats,
        &[
            "Month",
            "Orders",
            "Sellers",
            "Order Revenue",
            "Volume Revenue",
            "Total Revenue",
            "Total Volume",
        ],
        &[
            "month",
            "total_orders",
            "total_sellers",
            "total_order_amount",
            "total_volume_amount",
            "total_amount",
            "total_volume",
        ],
    )
}

/// File name for an export made on `date`, e.g. `orders_2024-05-01.csv`.
#[must_use]
pub fn export_filename(base: &str, date: NaiveDate) -> String {
    format!("{base}_{}.csv", date.format("%Y-%m-%d"))
}
