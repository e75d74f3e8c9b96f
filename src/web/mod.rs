//! HTTP surface.
//!
//! Thin axum handlers over [`crate::core`]. Every page is a template name plus a JSON
//! context handed to the injected [`render::Renderer`]; mutations answer with a
//! `303 See Other` back to the listing page or re-render it with `422` and the
//! submitted fields.

/// Page and form handlers, one module per listing page
pub mod handlers;
/// Template rendering seam
pub mod render;
/// Redirects, notices and error responses
pub mod response;
/// Route table
pub mod router;
/// Shared handler state
pub mod state;

pub use router::build_router;
pub use state::AppState;
