//! Payroll business logic - Employee payments and the weekly payroll sheet.
//!
//! The weekly sheet lists, for every employee, the work logs of one Monday-to-Sunday
//! week, the hours they add up to, and the amount owed at the employee's hourly rate.
//! Payments are recorded separately and are not reconciled against the sheet.

use crate::{
    core::{
        employee::{get_all_employees, require_employee},
        period::{DateRange, week_bounds},
        validation::PaymentForm,
        work_log::get_work_logs_in_range,
    },
    entities::{Employee, Payment, employee, payment, work_log},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{IntoActiveModel, QueryOrder, QuerySelect, Set, prelude::*};
use serde::Serialize;
use std::collections::HashMap;
use tracing::instrument;

/// Number of payments shown under the weekly sheet.
pub const RECENT_PAYMENTS_LIMIT: u64 = 10;

/// A payment joined with the name of the employee paid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentEntry {
    /// The stored row
    #[serde(flatten)]
    pub payment: payment::Model,
    /// Name of the employee paid
    pub employee_name: String,
}

/// One employee's line on the weekly payroll sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeePayroll {
    pub employee: employee::Model,
    pub worklogs: Vec<work_log::Model>,
    pub total_hours: f64,
    /// `total_hours * hourly_rate`
    pub amount_due: f64,
}

/// The payroll sheet for one week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyPayroll {
    pub week: DateRange,
    pub lines: Vec<EmployeePayroll>,
    pub recent_payments: Vec<PaymentEntry>,
}

/// Builds the payroll sheet for the week containing `selected`.
#[instrument(skip(db))]
pub async fn get_weekly_payroll<C: ConnectionTrait>(
    db: &C,
    selected: NaiveDate,
) -> Result<WeeklyPayroll> {
    let week = week_bounds(selected);
    let employees = get_all_employees(db).await?;

    let mut by_employee: HashMap<i64, Vec<work_log::Model>> = HashMap::new();
    for log in get_work_logs_in_range(db, week).await? {
        by_employee.entry(log.employee_id).or_default().push(log);
    }

    let lines = employees
        .into_iter()
        .map(|employee| {
            let worklogs = by_employee.remove(&employee.id).unwrap_or_default();
            let total_hours: f64 = worklogs.iter().map(work_log::Model::hours_worked).sum();
            let amount_due = total_hours * employee.hourly_rate;
            EmployeePayroll {
                employee,
                worklogs,
                total_hours,
                amount_due,
            }
        })
        .collect();

    Ok(WeeklyPayroll {
        week,
        lines,
        recent_payments: get_recent_payments(db, RECENT_PAYMENTS_LIMIT).await?,
    })
}

/// The most recent `limit` payments, newest first.
pub async fn get_recent_payments<C: ConnectionTrait>(
    db: &C,
    limit: u64,
) -> Result<Vec<PaymentEntry>> {
    let rows = Payment::find()
        .find_also_related(Employee)
        .order_by_desc(payment::Column::PaymentDate)
        .order_by_desc(payment::Column::Id)
        .limit(limit)
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|(payment, employee)| PaymentEntry {
            payment,
            employee_name: employee.map(|e| e.name).unwrap_or_default(),
        })
        .collect())
}

/// Payments dated inside `range`, oldest first.
pub async fn get_payments_in_range<C: ConnectionTrait>(
    db: &C,
    range: DateRange,
) -> Result<Vec<PaymentEntry>> {
    let rows = Payment::find()
        .find_also_related(Employee)
        .filter(payment::Column::PaymentDate.between(range.start, range.end))
        .order_by_asc(payment::Column::PaymentDate)
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|(payment, employee)| PaymentEntry {
            payment,
            employee_name: employee.map(|e| e.name).unwrap_or_default(),
        })
        .collect())
}

/// Retrieves one payment, or `None` when the id is unknown.
pub async fn get_payment_by_id<C: ConnectionTrait>(
    db: &C,
    id: i64,
) -> Result<Option<payment::Model>> {
    Payment::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Records or overwrites a payment. The employee must exist.
#[instrument(skip(db))]
pub async fn save_payment<C: ConnectionTrait>(
    db: &C,
    form: &PaymentForm,
    existing_id: Option<i64>,
) -> Result<payment::Model> {
    require_employee(db, form.employee_id).await?;

    let mut model = match existing_id {
        Some(id) => get_payment_by_id(db, id)
            .await?
            .ok_or(Error::NotFound {
                entity: "Payment",
                id,
            })?
            .into_active_model(),
        None => payment::ActiveModel {
            ..Default::default()
        },
    };
    model.employee_id = Set(form.employee_id);
    model.amount = Set(form.amount);
    model.payment_method = Set(form.payment_method.as_str().to_string());
    model.payment_date = Set(form.payment_date);
    model.check_number = Set(form.check_number.clone());
    model.check_bank = Set(form.check_bank.clone());
    model.notes = Set(form.notes.clone());

    if existing_id.is_some() {
        model.update(db).await.map_err(Into::into)
    } else {
        model.insert(db).await.map_err(Into::into)
    }
}

/// Deletes a payment. Returns false when nothing matched.
pub async fn delete_payment<C: ConnectionTrait>(db: &C, id: i64) -> Result<bool> {
    let result = Payment::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
