use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use floorguard_core::models::Severity;

use crate::errors::{ApiError, QueryError};
use crate::handles::ListQuery;
use crate::models::{Alert, Metric, SensorReading};
use crate::repositories::{AlertRepository, MetricRepository, SensorReadingRepository};

#[derive(Clone)]
pub struct RecordState {
    pub reading_repository: Arc<SensorReadingRepository>,
    pub metric_repository: Arc<MetricRepository>,
    pub alert_repository: Arc<AlertRepository>,
}

pub fn record_router(state: RecordState) -> Router {
    Router::new()
        .route("/readings", get(get_readings))
        .route("/metrics", get(get_metrics))
        .route("/alerts", get(get_alerts))
        .with_state(state)
}

pub async fn get_readings(
    State(state): State<RecordState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<SensorReading>>, ApiError> {
    let readings = state.reading_repository.find_latest(query.limit()).await?;

    Ok(Json(readings))
}

pub async fn get_metrics(
    State(state): State<RecordState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Metric>>, ApiError> {
    let metrics = state.metric_repository.find_latest(query.limit()).await?;

    Ok(Json(metrics))
}

pub async fn get_alerts(
    State(state): State<RecordState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Alert>>, ApiError> {
    let alerts = match &query.severity {
        Some(severity) => {
            let severity: Severity = severity
                .parse()
                .map_err(|_| QueryError::InvalidSeverity(severity.clone()))?;
            state.alert_repository.find_latest_by_severity(severity, query.limit()).await?
        }
        None => state.alert_repository.find_latest(query.limit()).await?,
    };

    Ok(Json(alerts))
}
