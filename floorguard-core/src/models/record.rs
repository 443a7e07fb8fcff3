use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Severity;

/// Label of the evaluation window for instant classifications.
pub const INSTANT_WINDOW: &str = "instant";

/// Durable snapshot of one classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Time of the reading the metric was derived from
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// Metric name such as `TEMP_LEVEL`
    pub metric_type: String,
    /// Measured or derived value
    pub value: f64,
    /// Evaluation window label
    pub window: String,
    /// Upper bound of the band the value fell in
    pub limit: Option<f64>,
    /// Resolved level
    pub status: String,
}

/// Alert raised for any classification with a severity other than `none`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    /// Time of the reading that raised the alert
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// Alert category such as `PM2.5`
    pub category: String,
    /// Value that raised the alert
    pub value: f64,
    /// Upper bound of the offending band
    pub limit: Option<f64>,
    /// Actionable class
    pub severity: Severity,
    /// Human readable description
    pub message: String,
}
