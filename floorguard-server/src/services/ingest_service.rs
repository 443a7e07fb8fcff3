use std::sync::Arc;

use floorguard_core::controller::VentilationController;
use floorguard_core::evaluator::{evaluate_all_metrics, Evaluation};
use floorguard_core::exposure::{ExposureConfig, ExposureTracker};
use floorguard_core::models::{AlertRecord, MetricRecord, Reading, VentilationAction, VentilationMode};
use floorguard_core::thresholds::Thresholds;
use floorguard_core::validation::validate_slice;
use time::{OffsetDateTime, UtcOffset};
use tokio::sync::Mutex;

use crate::configs::{Settings, Storage};
use crate::errors::IngestError;
use crate::repositories::{AlertRepository, MetricRepository, SensorReadingRepository, VentilationRepository};

/// Everything produced and stored for one reading.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub reading_id: i64,
    pub reading: Reading,
    pub evaluation: Evaluation,
    /// STEL and TWA records, empty when exposure tracking is off
    pub exposure_metrics: Vec<MetricRecord>,
    pub exposure_alerts: Vec<AlertRecord>,
    pub action: VentilationAction,
}

/// Validate, evaluate, decide and persist, one reading at a time.
pub struct IngestService {
    storage: Arc<Storage>,
    reading_repository: SensorReadingRepository,
    metric_repository: MetricRepository,
    alert_repository: AlertRepository,
    ventilation_repository: VentilationRepository,
    thresholds: Thresholds,
    controller: VentilationController,
    exposure: Option<Mutex<ExposureTracker>>,
    last_mode: Mutex<Option<VentilationMode>>,
}

impl IngestService {
    pub fn new(storage: Arc<Storage>, settings: &Settings) -> Self {
        Self::with_config(
            storage,
            settings.thresholds.clone(),
            VentilationController::new(settings.controller.clone(), settings.thresholds.pressure.nominal),
            settings.exposure.clone(),
        )
    }

    pub fn with_config(
        storage: Arc<Storage>,
        thresholds: Thresholds,
        controller: VentilationController,
        exposure: ExposureConfig,
    ) -> Self {
        let exposure = exposure.enabled.then(|| Mutex::new(ExposureTracker::new(exposure)));

        Self {
            reading_repository: SensorReadingRepository::new(storage.clone()),
            metric_repository: MetricRepository::new(storage.clone()),
            alert_repository: AlertRepository::new(storage.clone()),
            ventilation_repository: VentilationRepository::new(storage.clone()),
            storage,
            thresholds,
            controller,
            exposure,
            last_mode: Mutex::new(None),
        }
    }

    /// Loads stored history into the exposure tracker. Returns the number of readings loaded.
    pub async fn warm_up(&self, now: OffsetDateTime) -> Result<usize, IngestError> {
        let Some(exposure) = &self.exposure else {
            return Ok(0);
        };

        let mut tracker = exposure.lock().await;
        let window = tracker.config().stel_window().max(tracker.config().twa_window());
        let readings: Vec<Reading> = self
            .reading_repository
            .find_since(now - window)
            .await?
            .into_iter()
            .map(Reading::from)
            .collect();

        tracker.seed(&readings);
        tracing::info!("exposure tracker warmed up with {} readings", readings.len());

        Ok(readings.len())
    }

    /// Entry point for raw broker payloads.
    pub async fn ingest(&self, payload: &[u8]) -> Result<IngestOutcome, IngestError> {
        let reading = validate_slice(payload)?;
        tracing::debug!("Receive: {:?}", reading);

        self.process(reading).await
    }

    pub async fn process(&self, mut reading: Reading) -> Result<IngestOutcome, IngestError> {
        reading.timestamp = reading.timestamp.to_offset(UtcOffset::UTC);

        let evaluation = evaluate_all_metrics(&reading, &self.thresholds);
        let action = self.controller.decide(&evaluation.status_packet);

        // The tracker is only updated once the transaction has committed.
        let mut exposure_guard = match &self.exposure {
            Some(exposure) => Some(exposure.lock().await),
            None => None,
        };
        let mut pending_tracker = exposure_guard.as_deref().cloned();
        let (exposure_metrics, exposure_alerts) = match pending_tracker.as_mut() {
            Some(tracker) => {
                let snapshot = tracker.record(&reading);
                (tracker.metrics(&snapshot), tracker.alerts(&snapshot))
            }
            None => (Vec::new(), Vec::new()),
        };

        let mut tx = self.storage.get_pool().begin().await?;

        let reading_id = self.reading_repository.create(&reading, &mut tx).await?;
        for metric in evaluation.metrics.iter().chain(&exposure_metrics) {
            self.metric_repository.create(reading_id, metric, &mut tx).await?;
        }
        for alert in evaluation.alerts.iter().chain(&exposure_alerts) {
            self.alert_repository.create(reading_id, alert, &mut tx).await?;
        }
        self.ventilation_repository
            .create(reading_id, reading.timestamp, &action, &mut tx)
            .await?;

        tx.commit().await?;

        if let (Some(guard), Some(tracker)) = (exposure_guard.as_deref_mut(), pending_tracker) {
            *guard = tracker;
        }

        for alert in evaluation.alerts.iter().chain(&exposure_alerts) {
            tracing::warn!("{} alert: {}", alert.severity, alert.message);
        }
        self.note_mode(&action).await;

        Ok(IngestOutcome {
            reading_id,
            reading,
            evaluation,
            exposure_metrics,
            exposure_alerts,
            action,
        })
    }

    async fn note_mode(&self, action: &VentilationAction) {
        let mut last_mode = self.last_mode.lock().await;
        if *last_mode != Some(action.ventilation_mode) {
            tracing::info!(
                "ventilation mode {} -> {} ({})",
                (*last_mode).map_or("none", VentilationMode::as_str),
                action.ventilation_mode,
                action.reasons.join("; ")
            );
            *last_mode = Some(action.ventilation_mode);
        }
    }
}
