//! `/financials`: accounts payable, paid accounts and expenses on one page.

use super::{ListingPage, delete_record, into_context, show_listing, submit_form};
use crate::{
    core::{
        financials::{get_all_payables, get_expenses, get_paid_accounts},
        validation::{FormFields, FormType, PayableStatus, PaymentMethod},
    },
    errors::{Error, Result},
    web::{response::Notice, state::AppState},
};
use axum::{
    Form,
    extract::{Path, Query, State},
    response::Response,
};
use serde_json::{Map, Value, json};

/// `GET /financials`
pub async fn list(State(state): State<AppState>, Query(notice): Query<Notice>) -> Result<Response> {
    show_listing(&state, ListingPage::Financials, notice).await
}

/// `POST /financials/payables`
pub async fn save_payable(
    State(state): State<AppState>,
    Form(fields): Form<FormFields>,
) -> Result<Response> {
    submit_form(
        &state,
        ListingPage::Financials,
        FormType::AccountsPayable,
        fields,
    )
    .await
}

/// `POST /financials/paid`
pub async fn save_paid_account(
    State(state): State<AppState>,
    Form(fields): Form<FormFields>,
) -> Result<Response> {
    submit_form(&state, ListingPage::Financials, FormType::PaidAccount, fields).await
}

/// `POST /financials/expenses`
pub async fn save_expense(
    State(state): State<AppState>,
    Form(fields): Form<FormFields>,
) -> Result<Response> {
    submit_form(&state, ListingPage::Financials, FormType::Expense, fields).await
}

/// Maps the `{kind}` path segment of a financial delete to its form type.
fn item_form_type(kind: &str) -> Result<FormType> {
    match kind {
        "payable" => Ok(FormType::AccountsPayable),
        "paid" => Ok(FormType::PaidAccount),
        "expense" => Ok(FormType::Expense),
        other => Err(Error::bad_request(format!("Invalid item type: {other}"))),
    }
}

/// `POST /financials/delete/{kind}/{id}`
pub async fn delete(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, i64)>,
) -> Result<Response> {
    let form_type = item_form_type(&kind)?;
    delete_record(&state, ListingPage::Financials, form_type, id).await
}

pub(super) async fn context(state: &AppState) -> Result<Map<String, Value>> {
    let payables = get_all_payables(&state.db).await?;
    let paid_accounts = get_paid_accounts(&state.db, None, None).await?;
    let expenses = get_expenses(&state.db, None, None).await?;
    Ok(into_context(json!({
        "payables": payables,
        "paid_accounts": paid_accounts,
        "expenses": expenses,
        "payment_methods": PaymentMethod::ALL,
        "statuses": PayableStatus::ALL,
    })))
}
