//! Project entity - A construction job billed to a client.
//!
//! Projects own their costs and invoices; profit is invoiced minus costs.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Project database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    /// Unique identifier for the project
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Project name
    pub name: String,
    /// Contract value in dollars
    pub value: f64,
    /// First day of work
    pub start_date: Date,
    /// Completion day, None while the project is open-ended
    pub end_date: Option<Date>,
}

impl Model {
    /// A project is active when it has no end date or ends on/after `today`.
    #[must_use]
    pub fn is_active_on(&self, today: Date) -> bool {
        self.end_date.is_none_or(|end| end >= today)
    }
}

/// Defines relationships between Project and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One project has many costs
    #[sea_orm(has_many = "super::project_cost::Entity")]
    Costs,
    /// One project has many invoices
    #[sea_orm(has_many = "super::invoice::Entity")]
    Invoices,
}

impl Related<super::project_cost::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Costs.def()
    }
}

impl Related<super::invoice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
