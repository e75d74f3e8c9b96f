//! Rendering seam between handlers and page templates.
//!
//! Handlers never build markup. They name a template and pass a JSON context; whatever
//! [`Renderer`] the process was started with turns that into a body. The built-in
//! [`JsonRenderer`] emits the context itself, which keeps the service usable (and
//! testable) without a template engine.

use crate::errors::Result;
use serde_json::{Value, json};

/// Turns a template name and its context into a response body.
pub trait Renderer: Send + Sync {
    /// Renders `template` with `context`.
    fn render(&self, template: &str, context: &Value) -> Result<String>;

    /// `Content-Type` of the rendered body.
    fn content_type(&self) -> &'static str;
}

/// Renders every page as a JSON document `{ "template": ..., "context": ... }`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, template: &str, context: &Value) -> Result<String> {
        let page = json!({
            "template": template,
            "context": context,
        });
        serde_json::to_string(&page).map_err(Into::into)
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }
}
