//! Submission handling - Turns a raw form into exactly one store write.
//!
//! [`submit_on`] validates the fields, then opens a single database transaction and
//! writes the record. The transaction is committed only when the write succeeded;
//! any store error (missing parent row, constraint violation) drops it uncommitted so
//! nothing is left half written. The caller gets an [`Outcome`] describing which of
//! the three paths was taken.
//!
//! [`delete`] follows the same shape for removals. Parents with dependent rows are
//! never deleted; the outcome reports what still references them instead.

use crate::{
    core::{
        employee, financials, invoice, payroll, project,
        period::today,
        validation::{FieldErrors, FormFields, FormType, ValidForm, parse_form, unknown_form_errors},
        work_log,
    },
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use serde::Serialize;
use tracing::{error, info, instrument, warn};

/// Result of a create or update submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Validation failed; nothing was written.
    Rejected {
        errors: FieldErrors,
        echoed_fields: FormFields,
    },
    /// The record was written and committed.
    Persisted { entity_id: i64, message: String },
    /// Validation passed but the write failed and was rolled back.
    StoreFailure {
        message: String,
        echoed_fields: FormFields,
    },
}

impl Outcome {
    /// True for [`Outcome::Persisted`].
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        matches!(self, Self::Persisted { .. })
    }
}

/// A kind of row that still references a record someone tried to delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependentCount {
    /// Plural label, e.g. "work logs"
    pub label: &'static str,
    pub count: u64,
}

/// Result of a delete request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeleteOutcome {
    Deleted {
        message: String,
    },
    NotFound {
        message: String,
    },
    /// Dependent rows exist; nothing was removed.
    Blocked {
        reason: String,
        dependents: Vec<DependentCount>,
    },
}

/// Validates and persists a form, judging "not in the future" rules against the local date.
pub async fn submit(
    db: &DatabaseConnection,
    form_type: &str,
    fields: &FormFields,
    existing_id: Option<i64>,
) -> Outcome {
    submit_on(db, form_type, fields, existing_id, today()).await
}

/// Validates and persists a form, judging dates against `today`.
///
/// `existing_id` selects an update of every field of that record; `None` inserts.
#[instrument(skip(db, fields))]
pub async fn submit_on(
    db: &DatabaseConnection,
    form_type: &str,
    fields: &FormFields,
    existing_id: Option<i64>,
    today: NaiveDate,
) -> Outcome {
    let parsed = form_type
        .parse::<FormType>()
        .map_err(|_| unknown_form_errors(form_type))
        .and_then(|form_type| parse_form(form_type, fields, today));

    let form = match parsed {
        Ok(form) => form,
        Err(errors) => {
            warn!(form_type, fields = errors.len(), "Submission rejected");
            return Outcome::Rejected {
                errors,
                echoed_fields: fields.clone(),
            };
        }
    };

    match persist(db, &form, existing_id).await {
        Ok(entity_id) => {
            let message = success_message(&form, existing_id.is_some());
            info!(form_type, entity_id, "{message}");
            Outcome::Persisted { entity_id, message }
        }
        Err(e) => {
            error!(form_type, error = %e, "Submission could not be stored");
            Outcome::StoreFailure {
                message: format!(
                    "Could not save {}: {e}",
                    form.form_type().label().to_lowercase()
                ),
                echoed_fields: fields.clone(),
            }
        }
    }
}

async fn persist(
    db: &DatabaseConnection,
    form: &ValidForm,
    existing_id: Option<i64>,
) -> Result<i64> {
    let txn = db.begin().await?;
    // dropping txn without commit rolls the write back
    let entity_id = write(&txn, form, existing_id).await?;
    txn.commit().await?;
    Ok(entity_id)
}

async fn write(
    txn: &DatabaseTransaction,
    form: &ValidForm,
    existing_id: Option<i64>,
) -> Result<i64> {
    let id = match form {
        ValidForm::Employee(f) => employee::save_employee(txn, f, existing_id).await?.id,
        ValidForm::WorkLog(f) => work_log::save_work_log(txn, f, existing_id).await?.id,
        ValidForm::Payment(f) => payroll::save_payment(txn, f, existing_id).await?.id,
        ValidForm::Project(f) => project::save_project(txn, f, existing_id).await?.id,
        ValidForm::ProjectCost(f) => project::save_project_cost(txn, f, existing_id).await?.id,
        ValidForm::Invoice(f) => invoice::save_invoice(txn, f, existing_id).await?.id,
        ValidForm::AccountsPayable(f) => financials::save_payable(txn, f, existing_id).await?.id,
        ValidForm::PaidAccount(f) => financials::save_paid_account(txn, f, existing_id).await?.id,
        ValidForm::Expense(f) => financials::save_expense(txn, f, existing_id).await?.id,
    };
    Ok(id)
}

fn success_message(form: &ValidForm, updated: bool) -> String {
    let verb = if updated { "updated" } else { "added" };
    match form {
        ValidForm::Employee(f) => format!("Employee {} {verb} successfully", f.name),
        ValidForm::Project(f) => format!("Project {} {verb} successfully", f.name),
        ValidForm::PaidAccount(f) => format!("Payment to {} recorded successfully", f.supplier),
        ValidForm::Payment(_) if !updated => "Payment processed successfully".to_string(),
        other => format!("{} {verb} successfully", other.form_type().label()),
    }
}

/// Deletes a record of `form_type`, refusing when dependent rows still reference it.
#[instrument(skip(db))]
pub async fn delete(
    db: &DatabaseConnection,
    form_type: FormType,
    id: i64,
) -> Result<DeleteOutcome> {
    let txn = db.begin().await?;

    let dependents = dependents_of(&txn, form_type, id).await?;
    if !dependents.is_empty() {
        let reason = format!(
            "Cannot delete {} {id}: it still has {}",
            form_type.label().to_lowercase(),
            dependents
                .iter()
                .map(|d| format!("{} {}", d.count, d.label))
                .collect::<Vec<_>>()
                .join(" and ")
        );
        warn!(%reason, "Delete blocked");
        return Ok(DeleteOutcome::Blocked { reason, dependents });
    }

    let removed = match form_type {
        FormType::Employee => employee::delete_employee(&txn, id).await?,
        FormType::WorkLog => work_log::delete_work_log(&txn, id).await?,
        FormType::Payment => payroll::delete_payment(&txn, id).await?,
        FormType::Project => project::delete_project(&txn, id).await?,
        FormType::ProjectCost => project::delete_project_cost(&txn, id).await?,
        FormType::Invoice => invoice::delete_invoice(&txn, id).await?,
        FormType::AccountsPayable => financials::delete_payable(&txn, id).await?,
        FormType::PaidAccount => financials::delete_paid_account(&txn, id).await?,
        FormType::Expense => financials::delete_expense(&txn, id).await?,
    };

    if !removed {
        return Ok(DeleteOutcome::NotFound {
            message: Error::NotFound {
                entity: form_type.label(),
                id,
            }
            .to_string(),
        });
    }

    txn.commit().await?;
    info!(form_type = form_type.as_str(), id, "Record deleted");
    Ok(DeleteOutcome::Deleted {
        message: format!("{} deleted successfully", form_type.label()),
    })
}

async fn dependents_of(
    txn: &DatabaseTransaction,
    form_type: FormType,
    id: i64,
) -> Result<Vec<DependentCount>> {
    let counts = match form_type {
        FormType::Employee => {
            let (worklogs, payments) = employee::count_dependents(txn, id).await?;
            vec![("work logs", worklogs), ("payments", payments)]
        }
        FormType::Project => {
            let (costs, invoices) = project::count_dependents(txn, id).await?;
            vec![("costs", costs), ("invoices", invoices)]
        }
        _ => Vec::new(),
    };
    Ok(counts
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(label, count)| DependentCount { label, count })
        .collect())
}
