use std::error::Error;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub sensor: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gateway {
    pub host: String,
    pub port: u16,
    pub client_id: String,
    pub topic: Topic,
}

fn default_interval() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mock {
    /// Seconds between published readings
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
    /// Start an incident every N readings, 0 disables incidents
    #[serde(default)]
    pub incident_every: u32,
    /// Readings an incident lasts
    #[serde(default)]
    pub incident_length: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    pub gateway: Gateway,
    pub mock: Mock,
}

impl Settings {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        Self::from_toml(include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../", "configs/default.toml")))
    }

    pub fn from_toml(source: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(source)?)
    }
}
