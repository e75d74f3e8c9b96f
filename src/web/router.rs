//! Route table.

use crate::web::{
    handlers::{dashboard, employees, financials, invoices, payroll, projects, reports, worklogs},
    state::AppState,
};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

/// Builds the application router over `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard::show))
        .route("/employees", get(employees::list).post(employees::save))
        .route("/employees/delete/:id", post(employees::delete))
        .route("/worklogs", get(worklogs::list).post(worklogs::save))
        .route("/worklogs/delete/:id", post(worklogs::delete))
        .route("/payroll", get(payroll::list).post(payroll::save))
        .route("/payroll/delete/:id", post(payroll::delete))
        .route("/projects", get(projects::list).post(projects::save))
        .route("/projects/delete/:id", post(projects::delete))
        .route("/project_costs", post(projects::save_cost))
        .route("/project_costs/delete/:id", post(projects::delete_cost))
        .route("/invoices", get(invoices::list).post(invoices::save))
        .route("/invoices/delete/:id", post(invoices::delete))
        .route("/financials", get(financials::list))
        .route("/financials/payables", post(financials::save_payable))
        .route("/financials/paid", post(financials::save_paid_account))
        .route("/financials/expenses", post(financials::save_expense))
        .route("/financials/delete/:kind/:id", post(financials::delete))
        .route("/reports", get(reports::show))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
