use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Table;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Metric {
    pub id: i64,
    pub reading_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// e.g. `PM10_LEVEL` or `CO_STEL`
    pub metric_type: String,
    pub value: f64,
    /// `instant`, `15min`, `8h`
    #[sqlx(rename = "window_label")]
    pub window: String,
    #[sqlx(rename = "limit_value")]
    pub limit: Option<f64>,
    /// Level or exceedance state
    pub status: String,
}

#[derive(Clone)]
pub struct MetricTable;

impl Table for MetricTable {
    fn name(&self) -> &'static str {
        "metrics"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS metrics (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                reading_id INTEGER NOT NULL,
                timestamp TIMESTAMP NOT NULL,
                metric_type VARCHAR(64) NOT NULL,
                value REAL NOT NULL,
                window_label VARCHAR(16) NOT NULL,
                limit_value REAL,
                status VARCHAR(32) NOT NULL,
                FOREIGN KEY (reading_id) REFERENCES sensor_readings (id) ON DELETE CASCADE
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS metrics;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["sensor_readings"]
    }
}
