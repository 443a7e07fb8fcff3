use core::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Mutually exclusive ventilation modes, highest priority first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VentilationMode {
    EmergencyPurge,
    DustControl,
    HeatStress,
    #[default]
    Normal,
}

impl VentilationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            VentilationMode::EmergencyPurge => "EMERGENCY_PURGE",
            VentilationMode::DustControl => "DUST_CONTROL",
            VentilationMode::HeatStress => "HEAT_STRESS",
            VentilationMode::Normal => "NORMAL",
        }
    }
}

impl fmt::Display for VentilationMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for VentilationMode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "EMERGENCY_PURGE" => VentilationMode::EmergencyPurge,
            "DUST_CONTROL" => VentilationMode::DustControl,
            "HEAT_STRESS" => VentilationMode::HeatStress,
            _ => VentilationMode::Normal,
        }
    }
}

/// Actuator settings chosen for one status packet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VentilationAction {
    /// Time of the status packet the action answers
    #[serde(with = "time::serde::rfc3339::option")]
    pub timestamp: Option<OffsetDateTime>,
    /// Selected mode
    pub ventilation_mode: VentilationMode,
    /// Supply fan speed in percent
    pub fan_supply_speed: u8,
    /// Exhaust fan speed in percent
    pub fan_exhaust_speed: u8,
    /// Air conditioning power in percent
    pub ac_power: u8,
    /// Ordered, duplicate-free justification
    pub reasons: Vec<String>,
}

/// Actuator-facing form of [`VentilationAction`] without the audit reasons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VentilationCommand {
    #[serde(with = "time::serde::rfc3339::option")]
    pub timestamp: Option<OffsetDateTime>,
    pub ventilation_mode: VentilationMode,
    pub fan_supply_speed: u8,
    pub fan_exhaust_speed: u8,
    pub ac_power: u8,
}

impl From<&VentilationAction> for VentilationCommand {
    fn from(action: &VentilationAction) -> Self {
        Self {
            timestamp: action.timestamp,
            ventilation_mode: action.ventilation_mode,
            fan_supply_speed: action.fan_supply_speed,
            fan_exhaust_speed: action.fan_exhaust_speed,
            ac_power: action.ac_power,
        }
    }
}
