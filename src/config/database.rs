//! Database configuration for the ledger's record store.
//!
//! The store is an in-memory `SQLite` database driven through `SeaORM`. Nothing is written
//! to disk: every process starts with empty tables and loses its records on exit. Tables
//! are generated from the entity definitions with `Schema::create_table_from_entity`, so
//! the schema always matches the Rust structs.
//!
//! The URL is fixed rather than read from the environment: the tables are created fresh
//! and the seed ledger is inserted with fixed seller ids, so pointing the store at a file
//! that survives between runs would fail on the second start.

use crate::entities::{Order, Seller};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Private in-memory `SQLite` database, one per connection pool
pub const DATABASE_URL: &str = "sqlite::memory:";

/// Opens a connection to a new, empty record store and creates its tables.
pub async fn create_connection() -> Result<DatabaseConnection> {
    tracing::debug!("Connecting to record store at {DATABASE_URL}");

    let db = Database::connect(DATABASE_URL).await?;
    create_tables(&db).await?;
    Ok(db)
}

/// Creates the `sellers` and `orders` tables from the entity definitions.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let seller_table = schema.create_table_from_entity(Seller);
    let order_table = schema.create_table_from_entity(Order);

    db.execute(builder.build(&seller_table)).await?;
    db.execute(builder.build(&order_table)).await?;

    Ok(())
}
