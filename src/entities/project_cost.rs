//! Project cost entity - Material or labour spent on a project.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Project cost database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "project_costs")]
pub struct Model {
    /// Unique identifier for the cost
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Project the cost is charged to
    pub project_id: i64,
    /// `"material"` or `"employee"`
    pub cost_type: String,
    /// What was bought or who was paid
    pub description: String,
    /// Cost in dollars
    pub amount: f64,
}

/// Defines relationships between ProjectCost and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each cost belongs to one project
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id"
    )]
    Project,
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
