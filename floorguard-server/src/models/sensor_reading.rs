use floorguard_core::models::Reading;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Table;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SensorReading {
    pub id: i64,
    /// Time the sample was taken
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// Dry bulb temperature in Celsius
    pub temp: f64,
    /// Barometric pressure in hPa
    pub pressure: f64,
    /// Mean CO over the sampling interval in ppm
    pub co_mean: f64,
    /// Peak CO over the sampling interval in ppm
    pub co_max: f64,
    /// Whether the CO sensor was warmed up
    pub co_valid: bool,
    /// µg/m³
    pub pm2_5: f64,
    /// µg/m³
    pub pm10: f64,
}

impl From<SensorReading> for Reading {
    fn from(row: SensorReading) -> Self {
        Reading {
            timestamp: row.timestamp,
            temp: row.temp,
            pressure: row.pressure,
            co_mean: row.co_mean,
            co_max: row.co_max,
            co_valid: row.co_valid,
            pm2_5: row.pm2_5,
            pm10: row.pm10,
        }
    }
}

#[derive(Clone)]
pub struct SensorReadingTable;

impl Table for SensorReadingTable {
    fn name(&self) -> &'static str {
        "sensor_readings"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS sensor_readings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp TIMESTAMP NOT NULL,
                temp REAL NOT NULL,
                pressure REAL NOT NULL,
                co_mean REAL NOT NULL,
                co_max REAL NOT NULL,
                co_valid BOOLEAN NOT NULL,
                pm2_5 REAL NOT NULL,
                pm10 REAL NOT NULL
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS sensor_readings;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec![]
    }
}
