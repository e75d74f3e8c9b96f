//! Expense entity - General overhead not tied to a project or supplier bill.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// What the money was spent on
    pub description: String,
    /// Amount in dollars
    pub amount: f64,
    /// Day of the expense
    pub expense_date: Date,
    /// Bookkeeping category (e.g. "fuel", "tools")
    pub category: String,
    /// How it was paid
    pub payment_method: String,
    /// Free-form notes
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
