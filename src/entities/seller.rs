//! Seller entity - A customer billed at three independent rates.
//!
//! Each seller is charged per cubic metre of shipped volume, per order with three
//! or fewer products, and per order with more than three products.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Seller database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sellers")]
pub struct Model {
    /// Unique identifier, immutable for the seller's lifetime
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name
    pub name: String,
    /// Charge per cubic metre of shipped volume
    pub rate_per_cubic_meter: f64,
    /// Charge per order with 3 or fewer products
    pub rate_under_three: f64,
    /// Charge per order with more than 3 products
    pub rate_over_three: f64,
}

/// Orders are deliberately not linked by a foreign key: an order may outlive
/// its seller through the import path and is then reported as "Unknown".
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
