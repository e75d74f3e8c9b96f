//! Payment entity - A payroll payment made to an employee.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    /// Unique identifier for the payment
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Employee who was paid
    pub employee_id: i64,
    /// Amount paid in dollars
    pub amount: f64,
    /// One of `"cash"`, `"check"`, `"direct deposit"`
    pub payment_method: String,
    /// Day the payment was made
    pub payment_date: Date,
    /// Check number, present for check payments
    pub check_number: Option<String>,
    /// Issuing bank for check payments
    pub check_bank: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
}

/// Defines relationships between Payment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each payment belongs to one employee
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id"
    )]
    Employee,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
