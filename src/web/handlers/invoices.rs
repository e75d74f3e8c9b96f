//! `/invoices`: invoices billed against projects.

use super::{ListingPage, delete_record, into_context, show_listing, submit_form};
use crate::{
    core::{
        invoice::get_all_invoices,
        project::get_all_projects,
        validation::{FormFields, FormType},
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

/// `GET /invoices`
pub async fn list(State(state): State<AppState>, Query(notice): Query<Notice>) -> Result<Response> {
    show_listing(&state, ListingPage::Invoices, notice).await
}

/// `POST /invoices`
pub async fn save(State(state): State<AppState>, Form(fields): Form<FormFields>) -> Result<Response> {
    submit_form(&state, ListingPage::Invoices, FormType::Invoice, fields).await
}

/// `POST /invoices/delete/{id}`
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response> {
    delete_record(&state, ListingPage::Invoices, FormType::Invoice, id).await
}

pub(super) async fn context(state: &AppState) -> Result<Map<String, Value>> {
    let projects = get_all_projects(&state.db).await?;
    let invoices = get_all_invoices(&state.db).await?;
    Ok(into_context(json!({
        "projects": projects,
        "invoices": invoices,
    })))
}
