use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One validated sample from the factory floor sensor node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Sampling time (UTC)
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// Dry-bulb temperature in Celsius
    pub temp: f64,
    /// Barometric pressure in hPa
    pub pressure: f64,
    /// Mean CO concentration over the sampling interval in ppm
    pub co_mean: f64,
    /// Peak CO concentration over the sampling interval in ppm
    pub co_max: f64,
    /// Whether the CO sensor was warmed up and trusted for this sample
    pub co_valid: bool,
    /// Fine particulate matter in µg/m³
    pub pm2_5: f64,
    /// Coarse particulate matter in µg/m³
    pub pm10: f64,
}
