use floorguard_core::models::{VentilationAction, VentilationMode};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use time::OffsetDateTime;

use super::Table;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct VentilationRecord {
    pub id: i64,
    pub reading_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    #[sqlx(try_from = "String")]
    pub ventilation_mode: VentilationMode,
    /// Percent
    pub fan_supply_speed: u8,
    /// Percent
    pub fan_exhaust_speed: u8,
    /// Percent
    pub ac_power: u8,
    /// Ordered justification, stored as a JSON array
    pub reasons: Json<Vec<String>>,
}

impl From<VentilationRecord> for VentilationAction {
    fn from(record: VentilationRecord) -> Self {
        VentilationAction {
            timestamp: Some(record.timestamp),
            ventilation_mode: record.ventilation_mode,
            fan_supply_speed: record.fan_supply_speed,
            fan_exhaust_speed: record.fan_exhaust_speed,
            ac_power: record.ac_power,
            reasons: record.reasons.0,
        }
    }
}

#[derive(Clone)]
pub struct VentilationHistoryTable;

impl Table for VentilationHistoryTable {
    fn name(&self) -> &'static str {
        "ventilation_history"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS ventilation_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                reading_id INTEGER NOT NULL,
                timestamp TIMESTAMP NOT NULL,
                ventilation_mode VARCHAR(32) NOT NULL,
                fan_supply_speed INTEGER NOT NULL,
                fan_exhaust_speed INTEGER NOT NULL,
                ac_power INTEGER NOT NULL,
                reasons JSON NOT NULL,
                FOREIGN KEY (reading_id) REFERENCES sensor_readings (id) ON DELETE CASCADE
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS ventilation_history;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["sensor_readings"]
    }
}
