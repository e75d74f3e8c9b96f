//! Work log entity - One day of clock-in / clock-out for an employee.
//!
//! Hours worked are derived, never stored: see [`Model::hours_worked`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lunch breaks longer than this many minutes are deducted from the day.
pub const LUNCH_THRESHOLD_MINUTES: i32 = 30;

/// Hours deducted when the lunch threshold is exceeded.
pub const LUNCH_DEDUCTION_HOURS: f64 = 0.5;

/// Work log database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "worklogs")]
pub struct Model {
    /// Unique identifier for the work log
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Employee who worked
    pub employee_id: i64,
    /// Calendar day worked
    pub log_date: Date,
    /// Clock-in time
    pub entry_time: Time,
    /// Clock-out time
    pub exit_time: Time,
    /// Lunch break length in minutes
    pub lunch_duration: i32,
}

impl Model {
    /// Hours worked on this log after the lunch deduction.
    #[must_use]
    pub fn hours_worked(&self) -> f64 {
        compute_hours_worked(self.entry_time, self.exit_time, self.lunch_duration)
    }
}

/// `(exit - entry)` in hours, minus [`LUNCH_DEDUCTION_HOURS`] when the lunch break
/// exceeds [`LUNCH_THRESHOLD_MINUTES`], floored at zero.
#[must_use]
pub fn compute_hours_worked(entry: Time, exit: Time, lunch_duration: i32) -> f64 {
    #[allow(clippy::cast_precision_loss)] // a day is at most 86_400 seconds
    let span = (exit - entry).num_seconds() as f64 / 3600.0;
    let deduction = if lunch_duration > LUNCH_THRESHOLD_MINUTES {
        LUNCH_DEDUCTION_HOURS
    } else {
        0.0
    };
    (span - deduction).max(0.0)
}

/// Defines relationships between WorkLog and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each work log belongs to one employee
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
