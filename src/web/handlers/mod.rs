//! Page and form handlers.
//!
//! Every listing page follows the same cycle: `GET` renders the page (echoing any
//! `success` / `error` notice from the query string), `POST` submits a form and either
//! redirects back with a notice or re-renders the page with the errors and the fields
//! that were sent.

pub mod dashboard;
pub mod employees;
pub mod financials;
pub mod invoices;
pub mod payroll;
pub mod projects;
pub mod reports;
pub mod worklogs;

use crate::{
    core::{
        period::today,
        submission::{self, DeleteOutcome, Outcome},
        validation::{FieldErrors, FormFields, FormType},
    },
    errors::{Error, Result},
    web::{
        response::{Notice, redirect_with_notice, render_page},
        state::AppState,
    },
};
use axum::{http::StatusCode, response::Response};
use serde_json::{Map, Value, json};

/// Pages a form submission returns to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingPage {
    Employees,
    WorkLogs,
    Payroll,
    Projects,
    Invoices,
    Financials,
}

impl ListingPage {
    /// URL path of the page.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Employees => "/employees",
            Self::WorkLogs => "/worklogs",
            Self::Payroll => "/payroll",
            Self::Projects => "/projects",
            Self::Invoices => "/invoices",
            Self::Financials => "/financials",
        }
    }

    /// Template the page renders with.
    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::Employees => "employees.html",
            Self::WorkLogs => "worklogs.html",
            Self::Payroll => "payroll.html",
            Self::Projects => "projects.html",
            Self::Invoices => "invoices.html",
            Self::Financials => "financials.html",
        }
    }

    /// Navigation key of the page.
    #[must_use]
    pub const fn active_page(self) -> &'static str {
        match self {
            Self::Employees => "employees",
            Self::WorkLogs => "worklogs",
            Self::Payroll => "payroll",
            Self::Projects => "projects",
            Self::Invoices => "invoices",
            Self::Financials => "financials",
        }
    }

    async fn context(self, state: &AppState) -> Result<Map<String, Value>> {
        match self {
            Self::Employees => employees::context(state).await,
            Self::WorkLogs => worklogs::context(state).await,
            Self::Payroll => payroll::context(state, today()).await,
            Self::Projects => projects::context(state).await,
            Self::Invoices => invoices::context(state).await,
            Self::Financials => financials::context(state).await,
        }
    }
}

/// Unwraps a `json!({...})` literal into the map a page context is built from.
pub(crate) fn into_context(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("data".to_string(), other);
            map
        }
    }
}

/// What a listing page echoes back besides its own data.
#[derive(Debug, Default)]
pub(crate) struct FormEcho {
    pub notice: Notice,
    pub errors: FieldErrors,
    pub form_data: FormFields,
}

impl FormEcho {
    /// Only a notice, as after a redirect.
    pub fn notice(notice: Notice) -> Self {
        Self {
            notice,
            ..Self::default()
        }
    }
}

/// Renders `page` from an already built `context`.
pub(crate) fn finish_listing(
    state: &AppState,
    page: ListingPage,
    status: StatusCode,
    mut context: Map<String, Value>,
    echo: FormEcho,
) -> Result<Response> {
    context.insert("active_page".to_string(), json!(page.active_page()));
    context.insert("success".to_string(), json!(echo.notice.success));
    context.insert("error".to_string(), json!(echo.notice.error));
    context.insert("errors".to_string(), json!(echo.errors));
    context.insert("form_data".to_string(), json!(echo.form_data));
    render_page(state, status, page.template(), &Value::Object(context))
}

/// Renders a listing page with its default data.
pub(crate) async fn render_listing(
    state: &AppState,
    page: ListingPage,
    status: StatusCode,
    echo: FormEcho,
) -> Result<Response> {
    let context = page.context(state).await?;
    finish_listing(state, page, status, context, echo)
}

/// Renders a listing page for a plain `GET`.
pub(crate) async fn show_listing(
    state: &AppState,
    page: ListingPage,
    notice: Notice,
) -> Result<Response> {
    render_listing(state, page, StatusCode::OK, FormEcho::notice(notice)).await
}

/// Reads the optional update target from the `id` field.
fn existing_id(fields: &FormFields) -> Result<Option<i64>> {
    match fields.get("id").map(|v| v.trim()).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(Some)
            .ok_or_else(|| Error::bad_request(format!("Invalid id: {raw}"))),
    }
}

/// Submits `fields` as `form_type` and answers for `page`.
pub(crate) async fn submit_form(
    state: &AppState,
    page: ListingPage,
    form_type: FormType,
    fields: FormFields,
) -> Result<Response> {
    let existing_id = existing_id(&fields)?;
    match submission::submit(&state.db, form_type.as_str(), &fields, existing_id).await {
        Outcome::Persisted { message, .. } => {
            Ok(redirect_with_notice(page.path(), &Notice::success(message)))
        }
        Outcome::Rejected {
            errors,
            echoed_fields,
        } => {
            let echo = FormEcho {
                notice: Notice::default(),
                errors,
                form_data: echoed_fields,
            };
            render_listing(state, page, StatusCode::UNPROCESSABLE_ENTITY, echo).await
        }
        Outcome::StoreFailure {
            message,
            echoed_fields,
        } => {
            let echo = FormEcho {
                notice: Notice::error(message),
                errors: FieldErrors::new(),
                form_data: echoed_fields,
            };
            render_listing(state, page, StatusCode::UNPROCESSABLE_ENTITY, echo).await
        }
    }
}

/// Deletes `id` of `form_type` and redirects back to `page`.
///
/// A record that does not exist re-renders `page` at `404` with the reason as an error notice.
pub(crate) async fn delete_record(
    state: &AppState,
    page: ListingPage,
    form_type: FormType,
    id: i64,
) -> Result<Response> {
    match submission::delete(&state.db, form_type, id).await? {
        DeleteOutcome::Deleted { message } => {
            Ok(redirect_with_notice(page.path(), &Notice::success(message)))
        }
        DeleteOutcome::Blocked { reason, .. } => {
            Ok(redirect_with_notice(page.path(), &Notice::error(reason)))
        }
        DeleteOutcome::NotFound { message } => {
            let echo = FormEcho::notice(Notice::error(message));
            render_listing(state, page, StatusCode::NOT_FOUND, echo).await
        }
    }
}
