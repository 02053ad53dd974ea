//! Closing-task catalog endpoint.
//!
//! The form fetches the catalog at session start so the client and the
//! report agree on one task list.

use axum::{Json, Router, routing::get};
use closeout_core::checklist::{ChecklistItem, default_checklist};

use crate::AppState;

/// GET `/checklist` - the fixed closing-task catalog, all items fresh.
async fn get_checklist() -> Json<Vec<ChecklistItem>> {
    Json(default_checklist())
}

/// Creates the checklist routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/checklist", get(get_checklist))
}
