//! Help route
//!
//! Minimal endpoint for checking that the API is reachable.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HelpResponse {
    message: &'static str,
}

/// Create the help router
pub fn router() -> Router<AppState> {
    Router::new().route("/help", get(help))
}

/// GET /api/help
async fn help() -> Json<HelpResponse> {
    Json(HelpResponse {
        message: "Hello, World!",
    })
}
