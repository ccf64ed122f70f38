//! Unified error type for the ledger.
//!
//! Store operations validate their inputs and report failures through this enum.
//! The aggregation functions in [`crate::core::report`] never fail.

use thiserror::Error;

/// Every failure a ledger operation can report
#[derive(Debug, Error)]
pub enum Error {
    /// Underlying SeaORM / SQLite failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Configuration file could not be read, parsed or applied
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A record field failed validation
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// A rate, volume or dimension is negative or not finite
    #[error("Invalid amount: {amount}")]
    InvalidAmount { amount: f64 },

    /// Month key is not a `YYYY-MM` value
    #[error("Invalid month key: {month:?} (expected YYYY-MM)")]
    InvalidMonth { month: String },

    /// Both order quantities are zero
    #[error("Order must contain at least one order with a positive quantity")]
    EmptyOrder,

    #[error("Seller not found: {id}")]
    SellerNotFound { id: i64 },

    #[error("Order not found: {id}")]
    OrderNotFound { id: i64 },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
