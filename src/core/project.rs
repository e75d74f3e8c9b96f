//! Project business logic - Projects and the costs booked against them.

use crate::{
    core::validation::{CostType, ProjectCostForm, ProjectForm},
    entities::{Invoice, Project, ProjectCost, invoice, project, project_cost},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{Condition, IntoActiveModel, QueryOrder, QuerySelect, Set, prelude::*};
use serde::Serialize;
use tracing::instrument;

/// A project with all of its costs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectWithCosts {
    #[serde(flatten)]
    pub project: project::Model,
    pub costs: Vec<project_cost::Model>,
    /// Sum of every cost amount
    pub total_costs: f64,
}

impl ProjectWithCosts {
    /// Sum of the costs of one kind.
    #[must_use]
    pub fn costs_of(&self, cost_type: CostType) -> f64 {
        self.costs
            .iter()
            .filter(|c| c.cost_type == cost_type.as_str())
            .map(|c| c.amount)
            .sum()
    }
}

/// Every project with its costs, newest start first.
pub async fn get_projects_with_costs<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<ProjectWithCosts>> {
    // find_with_related groups by parent id first, so the start-date order is applied here
    let rows = Project::find()
        .find_with_related(ProjectCost)
        .order_by_asc(project_cost::Column::Id)
        .all(db)
        .await?;
    let mut projects: Vec<ProjectWithCosts> = rows
        .into_iter()
        .map(|(project, costs)| {
            let total_costs = costs.iter().map(|c| c.amount).sum();
            ProjectWithCosts {
                project,
                costs,
                total_costs,
            }
        })
        .collect();
    projects.sort_by(|a, b| {
        b.project
            .start_date
            .cmp(&a.project.start_date)
            .then(a.project.id.cmp(&b.project.id))
    });
    Ok(projects)
}

/// Every project, by name.
pub async fn get_all_projects<C: ConnectionTrait>(db: &C) -> Result<Vec<project::Model>> {
    Project::find()
        .order_by_asc(project::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Projects with no end date or ending on or after `today`, newest start first.
pub async fn get_active_projects<C: ConnectionTrait>(
    db: &C,
    today: NaiveDate,
    limit: u64,
) -> Result<Vec<project::Model>> {
    Project::find()
        .filter(
            Condition::any()
                .add(project::Column::EndDate.is_null())
                .add(project::Column::EndDate.gte(today)),
        )
        .order_by_desc(project::Column::StartDate)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves one project or fails with [`Error::NotFound`].
pub async fn require_project<C: ConnectionTrait>(db: &C, id: i64) -> Result<project::Model> {
    Project::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "Project",
            id,
        })
}

/// Inserts or overwrites a project.
#[instrument(skip(db))]
pub async fn save_project<C: ConnectionTrait>(
    db: &C,
    form: &ProjectForm,
    existing_id: Option<i64>,
) -> Result<project::Model> {
    let mut model = match existing_id {
        Some(id) => require_project(db, id).await?.into_active_model(),
        None => project::ActiveModel {
            ..Default::default()
        },
    };
    model.name = Set(form.name.clone());
    model.value = Set(form.value);
    model.start_date = Set(form.start_date);
    model.end_date = Set(form.end_date);

    if existing_id.is_some() {
        model.update(db).await.map_err(Into::into)
    } else {
        model.insert(db).await.map_err(Into::into)
    }
}

/// Number of costs and invoices still referencing the project.
pub async fn count_dependents<C: ConnectionTrait>(db: &C, id: i64) -> Result<(u64, u64)> {
    let costs = ProjectCost::find()
        .filter(project_cost::Column::ProjectId.eq(id))
        .count(db)
        .await?;
    let invoices = Invoice::find()
        .filter(invoice::Column::ProjectId.eq(id))
        .count(db)
        .await?;
    Ok((costs, invoices))
}

/// Deletes the project row. Returns false when nothing matched.
pub async fn delete_project<C: ConnectionTrait>(db: &C, id: i64) -> Result<bool> {
    let result = Project::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

/// Books or overwrites a cost. The project must exist.
#[instrument(skip(db))]
pub async fn save_project_cost<C: ConnectionTrait>(
    db: &C,
    form: &ProjectCostForm,
    existing_id: Option<i64>,
) -> Result<project_cost::Model> {
    require_project(db, form.project_id).await?;

    let mut model = match existing_id {
        Some(id) => ProjectCost::find_by_id(id)
            .one(db)
            .await?
            .ok_or(Error::NotFound {
                entity: "Project cost",
                id,
            })?
            .into_active_model(),
        None => project_cost::ActiveModel {
            ..Default::default()
        },
    };
    model.project_id = Set(form.project_id);
    model.cost_type = Set(form.cost_type.as_str().to_string());
    model.description = Set(form.description.clone());
    model.amount = Set(form.amount);

    if existing_id.is_some() {
        model.update(db).await.map_err(Into::into)
    } else {
        model.insert(db).await.map_err(Into::into)
    }
}

/// Deletes a cost. Returns false when nothing matched.
pub async fn delete_project_cost<C: ConnectionTrait>(db: &C, id: i64) -> Result<bool> {
    let result = ProjectCost::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
