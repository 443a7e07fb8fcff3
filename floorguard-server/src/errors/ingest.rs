use floorguard_core::errors::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Invalid payload: {0}")]
    Validation(#[from] ValidationError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Publish error: {0}")]
    Publish(#[from] rumqttc::ClientError),
}
