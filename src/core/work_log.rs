//! Work log business logic - Recording daily hours and querying them back.

use crate::{
    core::{employee::require_employee, period::DateRange, validation::WorkLogForm},
    entities::{Employee, WorkLog, employee, work_log},
    errors::{Error, Result},
};
use sea_orm::{IntoActiveModel, QueryOrder, QuerySelect, Set, prelude::*};
use serde::Serialize;
use tracing::instrument;

/// A work log joined with its employee's name and derived hours.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkLogEntry {
    /// The stored row
    #[serde(flatten)]
    pub log: work_log::Model,
    /// Name of the employee, empty if the row is orphaned
    pub employee_name: String,
    /// Hours after the lunch deduction
    pub hours_worked: f64,
}

impl WorkLogEntry {
    fn new(log: work_log::Model, employee: Option<employee::Model>) -> Self {
        let hours_worked = log.hours_worked();
        Self {
            log,
            employee_name: employee.map(|e| e.name).unwrap_or_default(),
            hours_worked,
        }
    }
}

/// The most recent `limit` work logs across all employees, newest day first.
pub async fn get_recent_work_logs<C: ConnectionTrait>(
    db: &C,
    limit: u64,
) -> Result<Vec<WorkLogEntry>> {
    let rows = WorkLog::find()
        .find_also_related(Employee)
        .order_by_desc(work_log::Column::LogDate)
        .order_by_desc(work_log::Column::Id)
        .limit(limit)
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|(log, employee)| WorkLogEntry::new(log, employee))
        .collect())
}

/// Work logs of one employee inside `range`, oldest first.
pub async fn get_work_logs_for_employee<C: ConnectionTrait>(
    db: &C,
    employee_id: i64,
    range: DateRange,
) -> Result<Vec<work_log::Model>> {
    WorkLog::find()
        .filter(work_log::Column::EmployeeId.eq(employee_id))
        .filter(work_log::Column::LogDate.between(range.start, range.end))
        .order_by_asc(work_log::Column::LogDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Work logs of every employee inside `range`, oldest first.
pub async fn get_work_logs_in_range<C: ConnectionTrait>(
    db: &C,
    range: DateRange,
) -> Result<Vec<work_log::Model>> {
    WorkLog::find()
        .filter(work_log::Column::LogDate.between(range.start, range.end))
        .order_by_asc(work_log::Column::LogDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves one work log, or `None` when the id is unknown.
pub async fn get_work_log_by_id<C: ConnectionTrait>(
    db: &C,
    id: i64,
) -> Result<Option<work_log::Model>> {
    WorkLog::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Inserts or overwrites a work log. The employee must exist.
#[instrument(skip(db))]
pub async fn save_work_log<C: ConnectionTrait>(
    db: &C,
    form: &WorkLogForm,
    existing_id: Option<i64>,
) -> Result<work_log::Model> {
    require_employee(db, form.employee_id).await?;

    let mut model = match existing_id {
        Some(id) => get_work_log_by_id(db, id)
            .await?
            .ok_or(Error::NotFound {
                entity: "Work log",
                id,
            })?
            .into_active_model(),
        None => work_log::ActiveModel {
            ..Default::default()
        },
    };
    model.employee_id = Set(form.employee_id);
    model.log_date = Set(form.log_date);
    model.entry_time = Set(form.entry_time);
    model.exit_time = Set(form.exit_time);
    model.lunch_duration = Set(form.lunch_duration);

    if existing_id.is_some() {
        model.update(db).await.map_err(Into::into)
    } else {
        model.insert(db).await.map_err(Into::into)
    }
}

/// Deletes a work log. Returns false when nothing matched.
pub async fn delete_work_log<C: ConnectionTrait>(db: &C, id: i64) -> Result<bool> {
    let result = WorkLog::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
