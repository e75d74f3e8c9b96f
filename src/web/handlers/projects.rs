//! `/projects` and `/project_costs`: projects with the costs booked against them.

use super::{ListingPage, delete_record, into_context, show_listing, submit_form};
use crate::{
    core::{
        project::get_projects_with_costs,
        validation::{CostType, FormFields, FormType},
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

/// `GET /projects`
pub async fn list(State(state): State<AppState>, Query(notice): Query<Notice>) -> Result<Response> {
    show_listing(&state, ListingPage::Projects, notice).await
}

/// `POST /projects`
pub async fn save(State(state): State<AppState>, Form(fields): Form<FormFields>) -> Result<Response> {
    submit_form(&state, ListingPage::Projects, FormType::Project, fields).await
}

/// `POST /projects/delete/{id}`
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response> {
    delete_record(&state, ListingPage::Projects, FormType::Project, id).await
}

/// `POST /project_costs`
pub async fn save_cost(
    State(state): State<AppState>,
    Form(fields): Form<FormFields>,
) -> Result<Response> {
    submit_form(&state, ListingPage::Projects, FormType::ProjectCost, fields).await
}

/// `POST /project_costs/delete/{id}`
pub async fn delete_cost(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response> {
    delete_record(&state, ListingPage::Projects, FormType::ProjectCost, id).await
}

pub(super) async fn context(state: &AppState) -> Result<Map<String, Value>> {
    let projects = get_projects_with_costs(&state.db).await?;
    Ok(into_context(json!({
        "projects": projects,
        "cost_types": CostType::ALL,
    })))
}
