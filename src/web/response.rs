//! Response helpers: rendered pages, notice redirects and error mapping.

use crate::{
    errors::Error,
    web::{render::Renderer, state::AppState},
};
use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

/// One-line message carried across a redirect in the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Notice {
    /// A success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: Some(message.into()),
            error: None,
        }
    }

    /// An error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: None,
            error: Some(message.into()),
        }
    }
}

/// `303 See Other` to `path` with `notice` URL-encoded into the query string.
pub fn redirect_with_notice(path: &str, notice: &Notice) -> Response {
    match serde_urlencoded::to_string(notice) {
        Ok(query) if !query.is_empty() => Redirect::to(&format!("{path}?{query}")).into_response(),
        Ok(_) => Redirect::to(path).into_response(),
        Err(e) => {
            error!(error = %e, "Could not encode notice");
            Redirect::to(path).into_response()
        }
    }
}

/// Renders `template` with `context` through the state's renderer.
pub fn render_page(
    state: &AppState,
    status: StatusCode,
    template: &str,
    context: &Value,
) -> Result<Response, Error> {
    render_with(state.renderer.as_ref(), status, template, context)
}

fn render_with(
    renderer: &dyn Renderer,
    status: StatusCode,
    template: &str,
    context: &Value,
) -> Result<Response, Error> {
    let body = renderer.render(template, context)?;
    Ok((status, [(header::CONTENT_TYPE, renderer.content_type())], body).into_response())
}

impl Error {
    /// HTTP status this error is reported with.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Database(_) | Self::Config { .. } | Self::Serialization(_) | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }
        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::web::render::JsonRenderer;

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
    }

    #[test]
    fn test_redirect_encodes_notice() {
        let response =
            redirect_with_notice("/employees", &Notice::success("Employee Ana added successfully"));
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            location(&response),
            "/employees?success=Employee+Ana+added+successfully"
        );
    }

    #[test]
    fn test_redirect_without_notice() {
        let response = redirect_with_notice("/financials", &Notice::default());
        assert_eq!(location(&response), "/financials");
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            Error::NotFound {
                entity: "Employee",
                id: 1
            }
            .status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::bad_request("nope").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::Database(sea_orm::DbErr::Custom("x".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_render_sets_content_type() {
        let response = render_with(
            &JsonRenderer,
            StatusCode::UNPROCESSABLE_ENTITY,
            "employees.html",
            &serde_json::json!({}),
        )
        .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }
}
