//! `/reports`: the report picker and the selected report over a date range.

use super::into_context;
use crate::{
    core::{
        period::today,
        report::{ReportType, build_report_page},
    },
    errors::Result,
    web::{response::render_page, state::AppState},
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};
use serde::Deserialize;
use serde_json::{Value, json};

/// Query string of `GET /reports`.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub report_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// `GET /reports`
pub async fn show(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Response> {
    let page = build_report_page(
        &state.db,
        query.report_type.as_deref(),
        query.start_date.as_deref(),
        query.end_date.as_deref(),
        today(),
    )
    .await?;

    let mut context = into_context(serde_json::to_value(page)?);
    context.insert("report_types".to_string(), json!(ReportType::ALL));
    context.insert("active_page".to_string(), json!("reports"));
    render_page(&state, StatusCode::OK, "reports.html", &Value::Object(context))
}
