//! Shared test utilities for the construction records service.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test records with sensible defaults.

use crate::{
    core::{
        employee, financials, invoice, payroll, project,
        validation::{
            AccountsPayableForm, CostType, EmployeeForm, ExpenseForm, FormFields, InvoiceForm,
            PaidAccountForm, PayableStatus, PaymentForm, PaymentMethod, ProjectCostForm,
            ProjectForm, WorkLogForm,
        },
        work_log,
    },
    entities,
    errors::{Error, Result},
};
use chrono::{NaiveDate, NaiveTime};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Routes `tracing` output through the test harness so it shows up for failing tests.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

/// Builds raw form fields from `(name, value)` pairs.
pub fn form_fields(pairs: &[(&str, &str)]) -> FormFields {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn date(value: &str) -> Result<NaiveDate> {
    crate::core::period::parse_iso_date(value)
        .ok_or_else(|| Error::bad_request(format!("bad test date {value}")))
}

/// Creates a test employee.
///
/// # Defaults
/// * `hourly_rate`: 25.0
pub async fn create_test_employee(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::employee::Model> {
    create_custom_employee(db, name, 25.0).await
}

/// Creates a test employee with a custom hourly rate.
pub async fn create_custom_employee(
    db: &DatabaseConnection,
    name: &str,
    hourly_rate: f64,
) -> Result<entities::employee::Model> {
    let form = EmployeeForm {
        name: name.to_string(),
        hourly_rate,
    };
    employee::save_employee(db, &form, None).await
}

/// Creates a work log on `day` worth exactly 8 hours.
///
/// # Defaults
/// * 08:00 to 16:30 with a 45 minute lunch (deducted)
pub async fn create_test_work_log(
    db: &DatabaseConnection,
    employee_id: i64,
    day: &str,
) -> Result<entities::work_log::Model> {
    let form = WorkLogForm {
        employee_id,
        log_date: date(day)?,
        entry_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
        exit_time: NaiveTime::from_hms_opt(16, 30, 0).unwrap_or_default(),
        lunch_duration: 45,
    };
    work_log::save_work_log(db, &form, None).await
}

/// Creates a cash payment.
pub async fn create_test_payment(
    db: &DatabaseConnection,
    employee_id: i64,
    amount: f64,
    day: &str,
) -> Result<entities::payment::Model> {
    let form = PaymentForm {
        employee_id,
        amount,
        payment_method: PaymentMethod::Cash,
        payment_date: date(day)?,
        check_number: None,
        check_bank: None,
        notes: None,
    };
    payroll::save_payment(db, &form, None).await
}

/// Creates an open-ended project.
///
/// # Defaults
/// * `value`: 10000.0
/// * `end_date`: None
pub async fn create_test_project(
    db: &DatabaseConnection,
    name: &str,
    start: &str,
) -> Result<entities::project::Model> {
    let form = ProjectForm {
        name: name.to_string(),
        value: 10_000.0,
        start_date: date(start)?,
        end_date: None,
    };
    project::save_project(db, &form, None).await
}

/// Books a cost against a project.
pub async fn create_test_cost(
    db: &DatabaseConnection,
    project_id: i64,
    cost_type: CostType,
    amount: f64,
) -> Result<entities::project_cost::Model> {
    let form = ProjectCostForm {
        project_id,
        cost_type,
        description: "Test cost".to_string(),
        amount,
    };
    project::save_project_cost(db, &form, None).await
}

/// Issues an invoice against a project.
pub async fn create_test_invoice(
    db: &DatabaseConnection,
    project_id: i64,
    amount_charged: f64,
    day: &str,
) -> Result<entities::invoice::Model> {
    let form = InvoiceForm {
        project_id,
        amount_charged,
        invoice_date: date(day)?,
    };
    invoice::save_invoice(db, &form, None).await
}

/// Records an account payable paid in cash, category "materials".
pub async fn create_test_payable(
    db: &DatabaseConnection,
    supplier: &str,
    amount: f64,
    due: &str,
    status: PayableStatus,
) -> Result<entities::accounts_payable::Model> {
    let form = AccountsPayableForm {
        supplier: supplier.to_string(),
        description: "Test bill".to_string(),
        amount,
        due_date: date(due)?,
        invoice_date: None,
        payment_method: PaymentMethod::Cash,
        category: "materials".to_string(),
        status,
        notes: None,
    };
    financials::save_payable(db, &form, None).await
}

/// Records a cash payment to a supplier.
pub async fn create_test_paid_account(
    db: &DatabaseConnection,
    supplier: &str,
    amount_paid: f64,
    day: &str,
) -> Result<entities::paid_account::Model> {
    let form = PaidAccountForm {
        supplier: supplier.to_string(),
        amount_paid,
        payment_date: date(day)?,
        payment_method: PaymentMethod::Cash,
        check_number: None,
        check_bank: None,
        payment_proof: None,
        notes: None,
    };
    financials::save_paid_account(db, &form, None).await
}

/// Records a cash expense in `category`.
pub async fn create_test_expense(
    db: &DatabaseConnection,
    category: &str,
    amount: f64,
    day: &str,
) -> Result<entities::expense::Model> {
    let form = ExpenseForm {
        description: format!("Test {category}"),
        amount,
        expense_date: date(day)?,
        category: category.to_string(),
        payment_method: PaymentMethod::Cash,
        notes: None,
    };
    financials::save_expense(db, &form, None).await
}
