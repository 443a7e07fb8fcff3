use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("Unknown severity: {0}")]
    InvalidSeverity(String),

    #[error("No ventilation decision recorded yet")]
    NoVentilationRecord,
}

impl QueryError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            QueryError::InvalidSeverity(_) => StatusCode::BAD_REQUEST,
            QueryError::NoVentilationRecord => StatusCode::NOT_FOUND,
        }
    }
}
