//! `/payroll`: the weekly payroll sheet and employee payments.

use super::{FormEcho, ListingPage, delete_record, finish_listing, into_context, submit_form};
use crate::{
    core::{
        employee::get_all_employees,
        payroll::get_weekly_payroll,
        period::{parse_iso_date, today},
        validation::{FormFields, FormType, PaymentMethod},
    },
    errors::{Error, Result},
    web::{response::Notice, state::AppState},
};
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Map, Value, json};

/// Query string of `GET /payroll`.
#[derive(Debug, Default, Deserialize)]
pub struct PayrollQuery {
    /// Any day of the week to show; defaults to today
    pub week_date: Option<String>,
    pub success: Option<String>,
    pub error: Option<String>,
}

/// `GET /payroll`
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<PayrollQuery>,
) -> Result<Response> {
    let selected = match query.week_date.as_deref().map(str::trim) {
        None | Some("") => today(),
        Some(raw) => parse_iso_date(raw)
            .ok_or_else(|| Error::bad_request(format!("Invalid week_date: {raw}")))?,
    };
    let notice = Notice {
        success: query.success,
        error: query.error,
    };

    let context = context(&state, selected).await?;
    finish_listing(
        &state,
        ListingPage::Payroll,
        StatusCode::OK,
        context,
        FormEcho::notice(notice),
    )
}

/// `POST /payroll`
pub async fn save(State(state): State<AppState>, Form(fields): Form<FormFields>) -> Result<Response> {
    submit_form(&state, ListingPage::Payroll, FormType::Payment, fields).await
}

/// `POST /payroll/delete/{id}`
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response> {
    delete_record(&state, ListingPage::Payroll, FormType::Payment, id).await
}

pub(super) async fn context(state: &AppState, selected: NaiveDate) -> Result<Map<String, Value>> {
    let employees = get_all_employees(&state.db).await?;
    let payroll = get_weekly_payroll(&state.db, selected).await?;
    Ok(into_context(json!({
        "employees": employees,
        "week_date": selected,
        "payroll": payroll,
        "payment_methods": PaymentMethod::ALL,
    })))
}
