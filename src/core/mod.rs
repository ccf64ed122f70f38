//! Core business logic - framework-agnostic record store operations, aggregation,
//! export and import. The front-end in `main.rs` only formats what this layer returns.

/// CSV export of sellers, orders and monthly statistics
pub mod export;
/// `YYYY-MM` month keys and the month selector
pub mod month;
/// Order records
pub mod order;
/// Monthly and per-seller revenue aggregation
pub mod report;
/// Seeding the store from a ledger file
pub mod seed;
/// Seller records and cascading delete
pub mod seller;
