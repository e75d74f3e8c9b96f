//! Paid account entity - A payment already made to a supplier.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Paid account database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "paid_accounts")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Supplier that was paid
    pub supplier: String,
    /// Amount paid in dollars
    pub amount_paid: f64,
    /// Day of payment
    pub payment_date: Date,
    /// How the supplier was paid
    pub payment_method: String,
    /// Check number for check payments
    pub check_number: Option<String>,
    /// Issuing bank for check payments
    pub check_bank: Option<String>,
    /// Reference to a receipt or transfer confirmation
    pub payment_proof: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
