use std::sync::Arc;

use floorguard_core::models::{AlertRecord, Severity};
use sqlx::{Error, Sqlite, Transaction};

use crate::configs::Storage;
use crate::models::Alert;

pub struct AlertRepository {
    storage: Arc<Storage>,
}

impl AlertRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }
}

impl AlertRepository {
    pub async fn create(
        &self,
        reading_id: i64,
        item: &AlertRecord,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i64, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO alerts (reading_id, timestamp, category, value, limit_value, severity, message)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(reading_id)
        .bind(item.timestamp)
        .bind(&item.category)
        .bind(item.value)
        .bind(item.limit)
        .bind(item.severity.as_str())
        .bind(&item.message)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id)
    }

    pub async fn find_latest(&self, limit: i64) -> Result<Vec<Alert>, Error> {
        let alerts: Vec<Alert> = sqlx::query_as("SELECT * FROM alerts ORDER BY timestamp DESC, id DESC LIMIT $1")
            .bind(limit)
            .fetch_all(self.storage.get_pool())
            .await?;

        Ok(alerts)
    }

    pub async fn find_latest_by_severity(&self, severity: Severity, limit: i64) -> Result<Vec<Alert>, Error> {
        let alerts: Vec<Alert> = sqlx::query_as(
            r#"
            SELECT * FROM alerts
            WHERE severity = $1
            ORDER BY timestamp DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(severity.as_str())
        .bind(limit)
        .fetch_all(self.storage.get_pool())
        .await?;

        Ok(alerts)
    }

    pub async fn find_by_reading_id(&self, reading_id: i64) -> Result<Vec<Alert>, Error> {
        let alerts: Vec<Alert> = sqlx::query_as("SELECT * FROM alerts WHERE reading_id = $1 ORDER BY id ASC")
            .bind(reading_id)
            .fetch_all(self.storage.get_pool())
            .await?;

        Ok(alerts)
    }
}
