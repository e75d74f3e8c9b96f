//! Accounts payable entity - A supplier bill that is due or has been settled.
//!
//! Pending payables feed the dashboard's upcoming-payments list and the
//! payment forecast report.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Accounts payable database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts_payable")]
pub struct Model {
    /// Unique identifier for the payable
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Supplier owed
    pub supplier: String,
    /// What the bill is for
    pub description: String,
    /// Amount owed in dollars
    pub amount: f64,
    /// Day the bill is due
    pub due_date: Date,
    /// Day the supplier issued the bill, when known
    pub invoice_date: Option<Date>,
    /// Intended payment method
    pub payment_method: String,
    /// Bookkeeping category
    pub category: String,
    /// `"pending"` or `"paid"`
    pub status: String,
    /// Free-form notes
    pub notes: Option<String>,
}

/// `AccountsPayable` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
