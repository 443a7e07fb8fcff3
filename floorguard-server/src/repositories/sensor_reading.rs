use std::sync::Arc;

use floorguard_core::models::Reading;
use sqlx::{Error, Sqlite, Transaction};
use time::{OffsetDateTime, UtcOffset};

use crate::configs::Storage;
use crate::models::SensorReading;

pub struct SensorReadingRepository {
    storage: Arc<Storage>,
}

impl SensorReadingRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }
}

impl SensorReadingRepository {
    pub async fn create(&self, item: &Reading, transaction: &mut Transaction<'_, Sqlite>) -> Result<i64, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO sensor_readings (timestamp, temp, pressure, co_mean, co_max, co_valid, pm2_5, pm10)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(item.timestamp)
        .bind(item.temp)
        .bind(item.pressure)
        .bind(item.co_mean)
        .bind(item.co_max)
        .bind(item.co_valid)
        .bind(item.pm2_5)
        .bind(item.pm10)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<SensorReading>, Error> {
        let reading: Option<SensorReading> = sqlx::query_as("SELECT * FROM sensor_readings WHERE id = $1")
            .bind(id)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(reading)
    }

    // Newest first
    pub async fn find_latest(&self, limit: i64) -> Result<Vec<SensorReading>, Error> {
        let readings: Vec<SensorReading> =
            sqlx::query_as("SELECT * FROM sensor_readings ORDER BY timestamp DESC, id DESC LIMIT $1")
                .bind(limit)
                .fetch_all(self.storage.get_pool())
                .await?;

        Ok(readings)
    }

    // Oldest first, used to warm up the exposure averages after a restart
    pub async fn find_since(&self, since: OffsetDateTime) -> Result<Vec<SensorReading>, Error> {
        let readings: Vec<SensorReading> =
            sqlx::query_as("SELECT * FROM sensor_readings WHERE timestamp > $1 ORDER BY timestamp ASC, id ASC")
                .bind(since.to_offset(UtcOffset::UTC))
                .fetch_all(self.storage.get_pool())
                .await?;

        Ok(readings)
    }

    pub async fn count(&self) -> Result<i64, Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sensor_readings")
            .fetch_one(self.storage.get_pool())
            .await?;

        Ok(count)
    }
}
