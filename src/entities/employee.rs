//! Employee entity - An hourly worker on the company payroll.
//!
//! Employees own work logs and payroll payments. An employee cannot be deleted
//! while either kind of dependent row still references it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Employee database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    /// Unique identifier for the employee
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Full name as shown on payroll
    pub name: String,
    /// Pay per hour worked, in dollars
    pub hourly_rate: f64,
}

/// Defines relationships between Employee and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One employee has many work logs
    #[sea_orm(has_many = "super::work_log::Entity")]
    WorkLogs,
    /// One employee has many payments
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
}

impl Related<super::work_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkLogs.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
