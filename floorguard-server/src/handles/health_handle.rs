use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::configs::Storage;
use crate::errors::ApiError;

#[derive(Clone)]
pub struct HealthState {
    pub storage: Arc<Storage>,
}

pub fn health_router(state: HealthState) -> Router {
    Router::new().route("/health", get(get_health)).with_state(state)
}

pub async fn get_health(State(state): State<HealthState>) -> Result<Json<Value>, ApiError> {
    sqlx::query("SELECT 1").execute(state.storage.get_pool()).await?;

    Ok(Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}
