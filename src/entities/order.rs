//! Order entity - One monthly record of shipped volume and order counts for a seller.
//!
//! `month` is a `YYYY-MM` key used both for grouping and for display.
//! `seller_id` is a plain column; it may reference a seller that no longer exists.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the seller this order is billed to
    pub seller_id: i64,
    /// Month key in `YYYY-MM` format
    pub month: String,
    /// Number of orders with 3 or fewer products
    pub quantity_under_three: i64,
    /// Number of orders with more than 3 products
    pub quantity_over_three: i64,
    /// Shipped volume in cubic metres
    pub volume: f64,
    /// When the order was recorded
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
