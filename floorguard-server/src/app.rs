use std::sync::Arc;

use axum::Router;
use time::OffsetDateTime;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::configs::{SchemaManager, Settings, Storage};
use crate::handles::*;
use crate::repositories::{AlertRepository, MetricRepository, SensorReadingRepository, VentilationRepository};
use crate::services::{GatewayService, IngestService};

/// Read-only HTTP surface over the stored history.
pub fn create_router(storage: Arc<Storage>) -> Router {
    let health = health_router(HealthState {
        storage: storage.clone(),
    });

    let records = record_router(RecordState {
        reading_repository: Arc::new(SensorReadingRepository::new(storage.clone())),
        metric_repository: Arc::new(MetricRepository::new(storage.clone())),
        alert_repository: Arc::new(AlertRepository::new(storage.clone())),
    });

    let ventilation = ventilation_router(VentilationState {
        ventilation_repository: Arc::new(VentilationRepository::new(storage.clone())),
    });

    Router::new()
        .merge(health)
        .merge(records)
        .merge(ventilation)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Opens storage, starts the broker gateway and returns the HTTP router.
pub async fn create_app(settings: &Arc<Settings>) -> anyhow::Result<Router> {
    let storage = Arc::new(Storage::new(settings.database.clone(), SchemaManager::default()).await?);

    let ingest_service = Arc::new(IngestService::new(storage.clone(), settings));
    ingest_service.warm_up(OffsetDateTime::now_utc()).await?;

    let gateway_service = GatewayService::new(&settings.gateway, ingest_service);
    tokio::spawn(gateway_service.run());

    Ok(create_router(storage))
}
