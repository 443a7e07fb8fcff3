use serde::{Deserialize, Serialize};

use crate::alert::build_alert;
use crate::classify::{classify, classify_pressure};
use crate::heat::compute_wbgt;
use crate::models::{
    AlertRecord, Classification, MetricRecord, Parameter, ParameterStatus, Reading,
    StatusPacket, INSTANT_WINDOW,
};
use crate::thresholds::Thresholds;

/// Everything derived from one reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// One record per tracked parameter, in [`Parameter::ALL`] order
    pub metrics: Vec<MetricRecord>,
    /// One record per parameter whose severity is not `none`
    pub alerts: Vec<AlertRecord>,
    pub status_packet: StatusPacket,
}

/// Classifies every tracked parameter of `reading`.
///
/// All alerts, PM included, are returned in `alerts`; persisting them is the
/// caller's job.
pub fn evaluate_all_metrics(reading: &Reading, thresholds: &Thresholds) -> Evaluation {
    let wbgt = compute_wbgt(reading.temp, thresholds.default_humidity);

    let classifications = [
        (Parameter::CoCeiling, classify(reading.co_max, &thresholds.co)),
        (Parameter::Pm2_5, classify(reading.pm2_5, &thresholds.pm2_5)),
        (Parameter::Pm10, classify(reading.pm10, &thresholds.pm10)),
        (Parameter::Temperature, classify(reading.temp, &thresholds.temperature)),
        (Parameter::Wbgt, classify(wbgt, &thresholds.wbgt)),
        (Parameter::Pressure, classify_pressure(reading.pressure, &thresholds.pressure)),
    ];

    let mut metrics = Vec::with_capacity(classifications.len());
    let mut alerts = Vec::new();
    let mut status_packet = StatusPacket {
        timestamp: Some(reading.timestamp),
        ..Default::default()
    };

    for (parameter, classification) in &classifications {
        if classification.is_unknown() {
            tracing::warn!(
                "{} value {} is outside every configured band",
                parameter.category(),
                classification.value
            );
        }

        let severity = thresholds.severity.level_to_severity(&classification.level);

        metrics.push(metric_record(reading, *parameter, classification));

        if let Some(alert) = build_alert(*parameter, reading.timestamp, classification, &thresholds.severity) {
            alerts.push(alert);
        }

        let status = Some(ParameterStatus::new(classification, severity));
        match parameter {
            Parameter::CoCeiling => status_packet.co = status,
            Parameter::Pm2_5 => status_packet.pm.pm2_5 = status,
            Parameter::Pm10 => status_packet.pm.pm10 = status,
            Parameter::Temperature => status_packet.temp = status,
            Parameter::Wbgt => status_packet.wbgt = status,
            Parameter::Pressure => status_packet.pressure = status,
        }
    }

    tracing::debug!(
        "evaluated reading at {}: {} metrics, {} alerts",
        reading.timestamp,
        metrics.len(),
        alerts.len()
    );

    Evaluation {
        metrics,
        alerts,
        status_packet,
    }
}

fn metric_record(reading: &Reading, parameter: Parameter, classification: &Classification) -> MetricRecord {
    MetricRecord {
        timestamp: reading.timestamp,
        metric_type: parameter.metric_type().to_string(),
        value: classification.value,
        window: INSTANT_WINDOW.to_string(),
        limit: classification.high,
        status: classification.level.clone(),
    }
}
