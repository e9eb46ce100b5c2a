//! Route modules for the tabular server

pub mod extract;
pub mod health;
pub mod help;

use axum::Router;

use crate::state::AppState;

/// Assemble the application router: health at the root, the API under `/api`.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/api", extract::router().merge(help::router()))
}
