//! Employee business logic - Roster queries and employee persistence.
//!
//! Writes are generic over [`ConnectionTrait`] so the submission layer can run them
//! inside its own transaction; reads take any connection as well.

use crate::{
    core::validation::EmployeeForm,
    entities::{Employee, Payment, WorkLog, employee, payment, work_log},
    errors::{Error, Result},
};
use sea_orm::{IntoActiveModel, QueryOrder, Set, prelude::*};
use tracing::instrument;

/// Retrieves every employee, ordered by name.
pub async fn get_all_employees<C: ConnectionTrait>(db: &C) -> Result<Vec<employee::Model>> {
    Employee::find()
        .order_by_asc(employee::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves one employee, or `None` when the id is unknown.
pub async fn get_employee_by_id<C: ConnectionTrait>(
    db: &C,
    id: i64,
) -> Result<Option<employee::Model>> {
    Employee::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Retrieves one employee or fails with [`Error::NotFound`].
pub async fn require_employee<C: ConnectionTrait>(db: &C, id: i64) -> Result<employee::Model> {
    get_employee_by_id(db, id).await?.ok_or(Error::NotFound {
        entity: "Employee",
        id,
    })
}

/// Inserts a new employee, or overwrites every field of `existing_id`.
#[instrument(skip(db))]
pub async fn save_employee<C: ConnectionTrait>(
    db: &C,
    form: &EmployeeForm,
    existing_id: Option<i64>,
) -> Result<employee::Model> {
    let Some(id) = existing_id else {
        let model = employee::ActiveModel {
            name: Set(form.name.clone()),
            hourly_rate: Set(form.hourly_rate),
            ..Default::default()
        };
        return model.insert(db).await.map_err(Into::into);
    };

    let mut model = require_employee(db, id).await?.into_active_model();
    model.name = Set(form.name.clone());
    model.hourly_rate = Set(form.hourly_rate);
    model.update(db).await.map_err(Into::into)
}

/// Number of work logs and payments still referencing the employee.
pub async fn count_dependents<C: ConnectionTrait>(db: &C, id: i64) -> Result<(u64, u64)> {
    let worklogs = WorkLog::find()
        .filter(work_log::Column::EmployeeId.eq(id))
        .count(db)
        .await?;
    let payments = Payment::find()
        .filter(payment::Column::EmployeeId.eq(id))
        .count(db)
        .await?;
    Ok((worklogs, payments))
}

/// Deletes the employee row. Returns false when nothing matched.
pub async fn delete_employee<C: ConnectionTrait>(db: &C, id: i64) -> Result<bool> {
    let result = Employee::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
