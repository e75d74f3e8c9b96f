//! `/employees`: the roster and the add/edit employee form.

use super::{ListingPage, delete_record, into_context, show_listing, submit_form};
use crate::{
    core::{employee::get_all_employees, validation::{FormFields, FormType}},
    errors::Result,
    web::{response::Notice, state::AppState},
};
use axum::{
    Form,
    extract::{Path, Query, State},
    response::Response,
};
use serde_json::{Map, Value, json};

/// `GET /employees`
pub async fn list(State(state): State<AppState>, Query(notice): Query<Notice>) -> Result<Response> {
    show_listing(&state, ListingPage::Employees, notice).await
}

/// `POST /employees`
pub async fn save(State(state): State<AppState>, Form(fields): Form<FormFields>) -> Result<Response> {
    submit_form(&state, ListingPage::Employees, FormType::Employee, fields).await
}

/// `POST /employees/delete/{id}`
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response> {
    delete_record(&state, ListingPage::Employees, FormType::Employee, id).await
}

pub(super) async fn context(state: &AppState) -> Result<Map<String, Value>> {
    let employees = get_all_employees(&state.db).await?;
    Ok(into_context(json!({ "employees": employees })))
}
