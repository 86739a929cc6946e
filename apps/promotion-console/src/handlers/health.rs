use crate::state::AppState;
use axum::{Json, extract::State};
use serde_json::{Value, json};

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service_url": state.config.service_url,
        "version": env!("CARGO_PKG_VERSION")
    }))
}
