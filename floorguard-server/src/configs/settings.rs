use std::env;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use floorguard_core::controller::ControllerConfig;
use floorguard_core::exposure::ExposureConfig;
use floorguard_core::thresholds::Thresholds;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

fn default_keep_alive() -> u64 {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gateway {
    pub host: String,
    pub port: u16,
    pub client_id: String,
    /// Seconds
    #[serde(default = "default_keep_alive")]
    pub keep_alive: u64,
    pub topic: GatewayTopic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayTopic {
    /// Incoming sensor readings
    pub sensor: String,
    /// Outgoing actuator commands
    pub ventilation: String,
    /// Outgoing dashboard colours
    pub dashboard: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Database {
    pub migration_path: Option<String>,
    pub clean_start: bool,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub logger: Logger,
    pub gateway: Gateway,
    pub database: Database,
    #[serde(default)]
    pub exposure: ExposureConfig,
    #[serde(default)]
    pub controller: ControllerConfig,
    #[serde(default)]
    pub thresholds: Thresholds,
}

impl Settings {
    /// Layers `configs/default`, `configs/<RUN_MODE>` and the process environment,
    /// so `SERVER_PORT=8080` overrides `server.port`.
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or("development".into());

        let config = Config::builder()
            .add_source(File::with_name("configs/default"))
            .add_source(File::with_name(&format!("configs/{run_mode}")).required(false))
            .add_source(Environment::default().separator("_").try_parsing(true))
            .build()?;

        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let mut settings: Settings = config.try_deserialize()?;

        settings.thresholds.validate()?;

        if let Some(migrate) = &settings.database.migration_path {
            if Path::new(migrate).is_dir() {
                let migrate_path = normalize_path(migrate)?.to_string_lossy().to_string();
                settings.database.migration_path = Some(migrate_path);
            } else {
                settings.database.migration_path = None;
            }
        }

        Ok(settings)
    }

    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?;

        Self::from_config(config)
    }
}

fn normalize_path(path: &str) -> Result<PathBuf, ConfigError> {
    let path_buf = PathBuf::from(path);

    Ok(if path_buf.is_absolute() {
        path_buf
    } else {
        env::current_dir().map_err(|e| ConfigError::Path(path.to_string(), e))?.join(path_buf)
    })
}
