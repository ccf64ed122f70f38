//! Month key handling.
//!
//! Orders are grouped by a `YYYY-MM` string. The string form sorts chronologically
//! under plain lexicographic comparison, which the monthly report relies on. This module
//! validates keys, renders them for display and provides the fixed list of months offered
//! when entering orders.

use crate::errors::{Error, Result};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// First selectable month (inclusive)
const FIRST_SELECTABLE: (i32, u32) = (2024, 1);
/// Last selectable month (inclusive)
const LAST_SELECTABLE: (i32, u32) = (2025, 12);

/// One entry of the month selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthOption {
    /// Month key, e.g. `"2024-01"`
    pub value: String,
    /// Display label, e.g. `"January 2024"`
    pub label: String,
}

/// Parses a strict `YYYY-MM` key into the first day of that month.
///
/// # Errors
/// Returns `Error::InvalidMonth` if the key is not exactly four digits, a dash and a
/// month number between 01 and 12.
pub fn parse_month_key(month: &str) -> Result<NaiveDate> {
    let invalid = || Error::InvalidMonth {
        month: month.to_string(),
    };

    let bytes = month.as_bytes();
    let well_formed = bytes.len() == 7
        && bytes[4] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || b.is_ascii_digit());
    if !well_formed {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").map_err(|_| invalid())
}

/// Formats a date as its `YYYY-MM` month key.
#[must_use]
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Renders a month key as `"January 2024"`. Keys that do not parse are returned unchanged.
#[must_use]
pub fn format_month_label(month: &str) -> String {
    parse_month_key(month).map_or_else(
        |_| month.to_string(),
        |date| date.format("%B %Y").to_string(),
    )
}

/// The months offered when recording an order: January 2024 through December 2025,
/// ascending.
#[must_use]
pub fn selectable_months() -> Vec<MonthOption> {
    let (mut year, mut month) = FIRST_SELECTABLE;
    let mut options = Vec::new();

    while (year, month) <= LAST_SELECTABLE {
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, 1) {
            options.push(MonthOption {
                value: month_key(date),
                label: date.format("%B %Y").to_string(),
            });
        }

        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }

    options
}

/// Returns true if the key is one of the [`selectable_months`].
#[must_use]
pub fn is_selectable(month: &str) -> bool {
    parse_month_key(month).is_ok_and(|date| {
        let key = (date.year(), date.month());
        key >= FIRST_SELECTABLE && key <= LAST_SELECTABLE
    })
}
