//! Ventilation decision engine.
//!
//! Modes are tried in strict priority order; the first one whose trigger
//! holds sets the actuator baseline. A pressure correction is then applied
//! on top of whichever baseline won, and every output is clamped to 0-100.

use serde::{Deserialize, Serialize};

use crate::models::{split_level, Direction, ParameterStatus, Severity, StatusPacket, VentilationAction, VentilationMode};
use crate::thresholds::PressureBands;

/// Actuator percentages before clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setpoint {
    pub supply: i32,
    pub exhaust: i32,
    pub ac: i32,
}

impl Setpoint {
    pub const fn new(supply: i32, exhaust: i32, ac: i32) -> Self {
        Self { supply, exhaust, ac }
    }
}

fn default_normal() -> Setpoint {
    Setpoint::new(40, 30, 0)
}

fn default_emergency_purge() -> Setpoint {
    Setpoint::new(40, 100, 0)
}

fn default_dust_control() -> Setpoint {
    Setpoint::new(60, 80, 0)
}

fn default_heat_stress() -> Setpoint {
    Setpoint::new(85, 65, 90)
}

fn default_pressure_step() -> i32 {
    10
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    #[serde(default = "default_normal")]
    pub normal: Setpoint,
    #[serde(default = "default_emergency_purge")]
    pub emergency_purge: Setpoint,
    #[serde(default = "default_dust_control")]
    pub dust_control: Setpoint,
    #[serde(default = "default_heat_stress")]
    pub heat_stress: Setpoint,
    /// Fan boost per severity rank applied by the pressure correction
    #[serde(default = "default_pressure_step")]
    pub pressure_step: i32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            normal: default_normal(),
            emergency_purge: default_emergency_purge(),
            dust_control: default_dust_control(),
            heat_stress: default_heat_stress(),
            pressure_step: default_pressure_step(),
        }
    }
}

impl ControllerConfig {
    pub fn baseline(&self, mode: VentilationMode) -> Setpoint {
        match mode {
            VentilationMode::EmergencyPurge => self.emergency_purge,
            VentilationMode::DustControl => self.dust_control,
            VentilationMode::HeatStress => self.heat_stress,
            VentilationMode::Normal => self.normal,
        }
    }
}

/// Clamps an actuator percentage into `[0, 100]`.
pub fn clamp_percent(value: i32) -> u8 {
    value.clamp(0, 100) as u8
}

#[derive(Debug, Default)]
struct Reasons(Vec<String>);

impl Reasons {
    fn push(&mut self, reason: String) {
        if !self.0.contains(&reason) {
            self.0.push(reason);
        }
    }
}

fn level_of(status: &Option<ParameterStatus>) -> &str {
    status.as_ref().map(|s| s.level.as_str()).unwrap_or("unknown")
}

#[derive(Debug, Clone)]
pub struct VentilationController {
    config: ControllerConfig,
    /// Reference used to infer direction when a pressure level has no tag
    nominal_pressure: f64,
}

impl Default for VentilationController {
    fn default() -> Self {
        Self::new(ControllerConfig::default(), PressureBands::default().nominal)
    }
}

impl VentilationController {
    pub fn new(config: ControllerConfig, nominal_pressure: f64) -> Self {
        Self {
            config,
            nominal_pressure,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn select_mode(&self, packet: &StatusPacket) -> VentilationMode {
        if packet.co_severity() == Severity::Critical {
            VentilationMode::EmergencyPurge
        } else if packet.pm2_5_severity() >= Severity::Warning || packet.pm10_severity() >= Severity::Warning {
            VentilationMode::DustControl
        } else if packet.temp_severity() == Severity::Critical || packet.wbgt_severity() == Severity::Critical {
            VentilationMode::HeatStress
        } else {
            VentilationMode::Normal
        }
    }

    pub fn decide(&self, packet: &StatusPacket) -> VentilationAction {
        let mode = self.select_mode(packet);
        let mut setpoint = self.config.baseline(mode);
        let mut reasons = Reasons::default();

        match mode {
            VentilationMode::EmergencyPurge => {
                reasons.push(format!("EMERGENCY_PURGE: CO critical ({})", level_of(&packet.co)));
            }
            VentilationMode::DustControl => {
                if packet.pm2_5_severity() >= Severity::Warning {
                    reasons.push(format!("PM warning: PM2.5 {}", level_of(&packet.pm.pm2_5)));
                }
                if packet.pm10_severity() >= Severity::Warning {
                    reasons.push(format!("PM warning: PM10 {}", level_of(&packet.pm.pm10)));
                }
            }
            VentilationMode::HeatStress => {
                if packet.temp_severity() == Severity::Critical {
                    reasons.push(format!("Heat danger: temperature {}", level_of(&packet.temp)));
                }
                if packet.wbgt_severity() == Severity::Critical {
                    reasons.push(format!("Heat danger: WBGT {}", level_of(&packet.wbgt)));
                }
            }
            VentilationMode::Normal => {}
        }

        self.correct_pressure(packet, &mut setpoint, &mut reasons);

        VentilationAction {
            timestamp: packet.timestamp,
            ventilation_mode: mode,
            fan_supply_speed: clamp_percent(setpoint.supply),
            fan_exhaust_speed: clamp_percent(setpoint.exhaust),
            ac_power: clamp_percent(setpoint.ac),
            reasons: reasons.0,
        }
    }

    fn correct_pressure(&self, packet: &StatusPacket, setpoint: &mut Setpoint, reasons: &mut Reasons) {
        let Some(pressure) = &packet.pressure else {
            return;
        };
        if pressure.severity == Severity::None {
            return;
        }

        let direction = match split_level(&pressure.level).1 {
            Some(direction) => Some(direction),
            None if pressure.value < self.nominal_pressure => Some(Direction::Low),
            None if pressure.value > self.nominal_pressure => Some(Direction::High),
            None => None,
        };

        let boost = self.config.pressure_step.saturating_mul(i32::from(pressure.severity.rank()));

        match direction {
            Some(Direction::Low) => {
                setpoint.supply = setpoint.supply.saturating_add(boost);
                reasons.push(format!("Pressure low ({}): increase supply", pressure.level));
            }
            Some(Direction::High) => {
                setpoint.exhaust = setpoint.exhaust.saturating_add(boost);
                reasons.push(format!("Pressure high ({}): increase exhaust", pressure.level));
            }
            None => {}
        }
    }
}

/// [`VentilationController::decide`] with the default configuration.
pub fn decide_hvac_actions(packet: &StatusPacket) -> VentilationAction {
    VentilationController::default().decide(packet)
}
