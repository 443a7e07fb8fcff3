#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ThresholdError {
    #[error("Threshold table is empty")]
    EmptyTable,

    #[error("Band {level} has an empty range [{low}, {high})")]
    EmptyBand { level: String, low: f64, high: f64 },

    #[error("Band {level} is open below but is not the first band")]
    UnboundedLow { level: String },

    #[error("Band {level} is open above but is not the last band")]
    UnboundedHigh { level: String },

    #[error("Gap or overlap between {previous} and {level}: {previous_high} != {low}")]
    NotContiguous {
        previous: String,
        level: String,
        previous_high: f64,
        low: f64,
    },

    #[error("Expected one edge fewer than levels, got {levels} levels and {edges} edges")]
    EdgeCountMismatch { levels: usize, edges: usize },

    #[error("Pressure normal band [{low}, {high}) is empty")]
    EmptyNormalBand { low: f64, high: f64 },

    #[error("Pressure tier width {0} must be positive")]
    InvalidTierWidth(f64),

    #[error("Default humidity {0} is outside 0-100 %")]
    InvalidHumidity(f64),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Payload is not a JSON object")]
    NotAnObject,

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for {field}: {value}")]
    InvalidField { field: &'static str, value: String },

    #[error("Non-finite value for {0}")]
    NonFinite(&'static str),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
