//! Entity module - SeaORM entity definitions for the in-memory ledger tables.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod order;
pub mod seller;

// Re-export specific types to avoid conflicts
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel};
pub use seller::{Column as SellerColumn, Entity as Seller, Model as SellerModel};
