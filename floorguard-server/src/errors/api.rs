use super::QueryError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Query error: {0}")]
    QueryError(#[from] QueryError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}
