//! `/`: month-to-date totals, upcoming bills, active projects and recent activity.

use super::into_context;
use crate::{
    core::{period::today, report::build_dashboard},
    errors::Result,
    web::{response::render_page, state::AppState},
};
use axum::{extract::State, http::StatusCode, response::Response};
use serde_json::{Value, json};

/// `GET /`
pub async fn show(State(state): State<AppState>) -> Result<Response> {
    let summary = build_dashboard(&state.db, today()).await?;
    let mut context = into_context(serde_json::to_value(summary)?);
    context.insert("active_page".to_string(), json!("home"));
    render_page(&state, StatusCode::OK, "dashboard.html", &Value::Object(context))
}
