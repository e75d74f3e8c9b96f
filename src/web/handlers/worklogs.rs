//! `/worklogs`: recent work logs and the daily hours form.

use super::{ListingPage, delete_record, into_context, show_listing, submit_form};
use crate::{
    core::{
        employee::get_all_employees,
        validation::{FormFields, FormType},
        work_log::get_recent_work_logs,
    },
    errors::Result,
    web::{response::Notice, state::AppState},
};
use axum::{
    Form,
    extract::{Path, Query, State},
    response::Response,
};
use serde_json::{Map, Value, json};

/// `GET /worklogs`
pub async fn list(State(state): State<AppState>, Query(notice): Query<Notice>) -> Result<Response> {
    show_listing(&state, ListingPage::WorkLogs, notice).await
}

/// `POST /worklogs`
pub async fn save(State(state): State<AppState>, Form(fields): Form<FormFields>) -> Result<Response> {
    submit_form(&state, ListingPage::WorkLogs, FormType::WorkLog, fields).await
}

/// `POST /worklogs/delete/{id}`
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response> {
    delete_record(&state, ListingPage::WorkLogs, FormType::WorkLog, id).await
}

pub(super) async fn context(state: &AppState) -> Result<Map<String, Value>> {
    let employees = get_all_employees(&state.db).await?;
    let worklogs = get_recent_work_logs(&state.db, state.recent_limit).await?;
    Ok(into_context(json!({
        "employees": employees,
        "worklogs": worklogs,
    })))
}
