use std::sync::Arc;

use floorguard_core::models::MetricRecord;
use sqlx::{Error, Sqlite, Transaction};

use crate::configs::Storage;
use crate::models::Metric;

pub struct MetricRepository {
    storage: Arc<Storage>,
}

impl MetricRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }
}

impl MetricRepository {
    pub async fn create(
        &self,
        reading_id: i64,
        item: &MetricRecord,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i64, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO metrics (reading_id, timestamp, metric_type, value, window_label, limit_value, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(reading_id)
        .bind(item.timestamp)
        .bind(&item.metric_type)
        .bind(item.value)
        .bind(&item.window)
        .bind(item.limit)
        .bind(&item.status)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id)
    }

    pub async fn find_latest(&self, limit: i64) -> Result<Vec<Metric>, Error> {
        let metrics: Vec<Metric> = sqlx::query_as("SELECT * FROM metrics ORDER BY timestamp DESC, id DESC LIMIT $1")
            .bind(limit)
            .fetch_all(self.storage.get_pool())
            .await?;

        Ok(metrics)
    }

    pub async fn find_by_reading_id(&self, reading_id: i64) -> Result<Vec<Metric>, Error> {
        let metrics: Vec<Metric> = sqlx::query_as("SELECT * FROM metrics WHERE reading_id = $1 ORDER BY id ASC")
            .bind(reading_id)
            .fetch_all(self.storage.get_pool())
            .await?;

        Ok(metrics)
    }
}
