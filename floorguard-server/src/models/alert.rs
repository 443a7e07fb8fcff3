use floorguard_core::models::Severity;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Table;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Alert {
    pub id: i64,
    pub reading_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// e.g. `PM2.5` or `CO_CEILING`
    pub category: String,
    pub value: f64,
    #[sqlx(rename = "limit_value")]
    pub limit: Option<f64>,
    #[sqlx(try_from = "String")]
    pub severity: Severity,
    pub message: String,
}

#[derive(Clone)]
pub struct AlertTable;

impl Table for AlertTable {
    fn name(&self) -> &'static str {
        "alerts"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS alerts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                reading_id INTEGER NOT NULL,
                timestamp TIMESTAMP NOT NULL,
                category VARCHAR(64) NOT NULL,
                value REAL NOT NULL,
                limit_value REAL,
                severity VARCHAR(16) NOT NULL,
                message TEXT NOT NULL,
                FOREIGN KEY (reading_id) REFERENCES sensor_readings (id) ON DELETE CASCADE
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS alerts;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["sensor_readings"]
    }
}
