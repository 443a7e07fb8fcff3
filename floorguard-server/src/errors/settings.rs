use floorguard_core::errors::ThresholdError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Failed to resolve {0}: {1}")]
    Path(String, #[source] std::io::Error),

    #[error("Invalid thresholds: {0}")]
    Threshold(#[from] ThresholdError),
}
