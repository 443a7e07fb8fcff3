use std::sync::Arc;

use floorguard_core::models::VentilationAction;
use sqlx::types::Json;
use sqlx::{Error, Sqlite, Transaction};
use time::OffsetDateTime;

use crate::configs::Storage;
use crate::models::VentilationRecord;

pub struct VentilationRepository {
    storage: Arc<Storage>,
}

impl VentilationRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }
}

impl VentilationRepository {
    /// `timestamp` is used when the action itself carries none.
    pub async fn create(
        &self,
        reading_id: i64,
        timestamp: OffsetDateTime,
        item: &VentilationAction,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i64, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO ventilation_history
                (reading_id, timestamp, ventilation_mode, fan_supply_speed, fan_exhaust_speed, ac_power, reasons)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(reading_id)
        .bind(item.timestamp.unwrap_or(timestamp))
        .bind(item.ventilation_mode.as_str())
        .bind(item.fan_supply_speed)
        .bind(item.fan_exhaust_speed)
        .bind(item.ac_power)
        .bind(Json(&item.reasons))
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id)
    }

    pub async fn find_latest(&self, limit: i64) -> Result<Vec<VentilationRecord>, Error> {
        let records: Vec<VentilationRecord> =
            sqlx::query_as("SELECT * FROM ventilation_history ORDER BY timestamp DESC, id DESC LIMIT $1")
                .bind(limit)
                .fetch_all(self.storage.get_pool())
                .await?;

        Ok(records)
    }

    pub async fn find_last(&self) -> Result<Option<VentilationRecord>, Error> {
        let record: Option<VentilationRecord> =
            sqlx::query_as("SELECT * FROM ventilation_history ORDER BY timestamp DESC, id DESC LIMIT 1")
                .fetch_optional(self.storage.get_pool())
                .await?;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use floorguard_core::models::{Reading, VentilationMode};
    use time::macros::datetime;

    use super::*;
    use crate::configs::{Database, SchemaManager};
    use crate::repositories::SensorReadingRepository;

    #[tokio::test]
    async fn test_reasons_round_trip_as_json() {
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
        let timestamp = datetime!(2025-03-04 10:00:00 UTC);
        let readings = SensorReadingRepository::new(storage.clone());
        let repo = VentilationRepository::new(storage.clone());

        assert!(repo.find_last().await.unwrap().is_none());

        let action = VentilationAction {
            timestamp: None,
            ventilation_mode: VentilationMode::DustControl,
            fan_supply_speed: 60,
            fan_exhaust_speed: 90,
            ac_power: 0,
            reasons: vec![
                String::from("PM warning: PM10 red"),
                String::from("Pressure high (orange-high): increase exhaust"),
            ],
        };

        let mut tx = storage.get_pool().begin().await.unwrap();
        let reading_id = readings
            .create(
                &Reading {
                    timestamp,
                    temp: 22.0,
                    pressure: 1045.0,
                    co_mean: 2.0,
                    co_max: 3.0,
                    co_valid: true,
                    pm2_5: 20.0,
                    pm10: 130.0,
                },
                &mut tx,
            )
            .await
            .unwrap();
        repo.create(reading_id, timestamp, &action, &mut tx).await.unwrap();
        tx.commit().await.unwrap();

        let last = repo.find_last().await.unwrap().unwrap();
        assert_eq!(last.reading_id, reading_id);
        assert_eq!(last.timestamp, timestamp);
        assert_eq!(last.ventilation_mode, VentilationMode::DustControl);
        assert_eq!(last.reasons.0, action.reasons);

        let restored = VentilationAction::from(last);
        assert_eq!(restored.timestamp, Some(timestamp));
        assert_eq!(restored.fan_exhaust_speed, 90);
    }
}
