pub mod console;
pub mod health;

use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(console::get_console))
        .route("/results", get(console::get_results))
        .route("/actions/{action}", post(console::run_action))
        .route("/health", get(health::health_check))
        .with_state(state)
}
