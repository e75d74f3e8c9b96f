//! Database configuration module.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs without hand-written SQL. Creation is
//! idempotent (`IF NOT EXISTS`), which lets the server call it on every start.

use crate::entities::{
    AccountsPayable, Employee, Expense, Invoice, PaidAccount, Payment, Project, ProjectCost,
    WorkLog,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use tracing::{debug, info, instrument};

/// Default database location used when neither the settings file nor the
/// environment provides one.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://construction_erp.sqlite?mode=rwc";

/// Establishes a connection to the database at `database_url`.
#[instrument]
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to database");
    Database::connect(database_url).await.map_err(Into::into)
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Creates all tables that do not exist yet.
///
/// Parent tables are created before the tables holding foreign keys to them.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, Employee).await?;
    create_table(db, &schema, WorkLog).await?;
    create_table(db, &schema, Payment).await?;
    create_table(db, &schema, Project).await?;
    create_table(db, &schema, ProjectCost).await?;
    create_table(db, &schema, Invoice).await?;
    create_table(db, &schema, AccountsPayable).await?;
    create_table(db, &schema, PaidAccount).await?;
    create_table(db, &schema, Expense).await?;

    info!("Database tables ensured");
    Ok(())
}
