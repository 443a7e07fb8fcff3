use std::sync::Arc;

use axum::Router;
use floorguard_core::controller::VentilationController;
use floorguard_core::exposure::ExposureConfig;
use floorguard_core::models::Reading;
use floorguard_core::thresholds::Thresholds;
use floorguard_server::app::create_router;
use floorguard_server::configs::{Database, SchemaManager, Storage};
use floorguard_server::services::{IngestOutcome, IngestService};
use time::OffsetDateTime;

pub struct MockApp {
    pub storage: Arc<Storage>,
    pub ingest_service: Arc<IngestService>,
    pub router: Router,
}

impl MockApp {
    pub async fn new() -> Self {
        let storage = Arc::new(
            Storage::new(
                Database {
                    migration_path: None,
                    clean_start: true,
                    url: String::from("sqlite::memory:"),
                },
                SchemaManager::default(),
            )
            .await
            .unwrap(),
        );

        let ingest_service = Arc::new(IngestService::with_config(
            storage.clone(),
            Thresholds::default(),
            VentilationController::default(),
            ExposureConfig::default(),
        ));

        let router = create_router(storage.clone());

        Self {
            storage,
            ingest_service,
            router,
        }
    }

    pub fn calm_reading(timestamp: OffsetDateTime) -> Reading {
        Reading {
            timestamp,
            temp: 21.0,
            pressure: 1012.0,
            co_mean: 2.0,
            co_max: 4.0,
            co_valid: true,
            pm2_5: 6.0,
            pm10: 12.0,
        }
    }

    pub async fn ingest(&self, reading: Reading) -> IngestOutcome {
        self.ingest_service.process(reading).await.unwrap()
    }
}
