use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::errors::{ApiError, QueryError};
use crate::handles::ListQuery;
use crate::models::VentilationRecord;
use crate::repositories::VentilationRepository;

#[derive(Clone)]
pub struct VentilationState {
    pub ventilation_repository: Arc<VentilationRepository>,
}

pub fn ventilation_router(state: VentilationState) -> Router {
    Router::new()
        .route("/ventilation", get(get_ventilation_history))
        .route("/ventilation/latest", get(get_latest_ventilation))
        .with_state(state)
}

pub async fn get_latest_ventilation(State(state): State<VentilationState>) -> Result<Json<VentilationRecord>, ApiError> {
    let record = state
        .ventilation_repository
        .find_last()
        .await?
        .ok_or(QueryError::NoVentilationRecord)?;

    Ok(Json(record))
}

pub async fn get_ventilation_history(
    State(state): State<VentilationState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<VentilationRecord>>, ApiError> {
    let records = state.ventilation_repository.find_latest(query.limit()).await?;

    Ok(Json(records))
}
