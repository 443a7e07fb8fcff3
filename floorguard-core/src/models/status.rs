use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{base_color, Classification, Severity, UNKNOWN_LEVEL};

/// `{value, level, severity}` triple for one parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterStatus {
    pub value: f64,
    pub level: String,
    #[serde(default)]
    pub severity: Severity,
}

impl ParameterStatus {
    pub fn new(classification: &Classification, severity: Severity) -> Self {
        Self {
            value: classification.value,
            level: classification.level.clone(),
            severity,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PmStatus {
    #[serde(default)]
    pub pm2_5: Option<ParameterStatus>,
    #[serde(default)]
    pub pm10: Option<ParameterStatus>,
}

/// Aggregated view of the environment for one reading.
///
/// Every leaf is optional so that a partial packet still drives the
/// ventilation engine; an absent parameter counts as severity `none`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusPacket {
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub timestamp: Option<OffsetDateTime>,
    #[serde(default)]
    pub co: Option<ParameterStatus>,
    #[serde(default)]
    pub pm: PmStatus,
    #[serde(default)]
    pub temp: Option<ParameterStatus>,
    #[serde(default)]
    pub wbgt: Option<ParameterStatus>,
    #[serde(default)]
    pub pressure: Option<ParameterStatus>,
}

fn severity_of(status: &Option<ParameterStatus>) -> Severity {
    status.as_ref().map(|s| s.severity).unwrap_or_default()
}

fn color_of(status: &Option<ParameterStatus>) -> String {
    status
        .as_ref()
        .map(|s| base_color(&s.level))
        .unwrap_or_else(|| UNKNOWN_LEVEL.to_string())
}

impl StatusPacket {
    pub fn co_severity(&self) -> Severity {
        severity_of(&self.co)
    }

    pub fn pm2_5_severity(&self) -> Severity {
        severity_of(&self.pm.pm2_5)
    }

    pub fn pm10_severity(&self) -> Severity {
        severity_of(&self.pm.pm10)
    }

    pub fn temp_severity(&self) -> Severity {
        severity_of(&self.temp)
    }

    pub fn wbgt_severity(&self) -> Severity {
        severity_of(&self.wbgt)
    }

    pub fn pressure_severity(&self) -> Severity {
        severity_of(&self.pressure)
    }

    /// Colour-only projection published to the floor dashboard.
    pub fn colors(&self) -> ColorPayload {
        ColorPayload {
            timestamp: self.timestamp,
            co: color_of(&self.co),
            pm2_5: color_of(&self.pm.pm2_5),
            pm10: color_of(&self.pm.pm10),
            temp: color_of(&self.temp),
            wbgt: color_of(&self.wbgt),
            pressure: color_of(&self.pressure),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorPayload {
    #[serde(with = "time::serde::rfc3339::option")]
    pub timestamp: Option<OffsetDateTime>,
    pub co: String,
    pub pm2_5: String,
    pub pm10: String,
    pub temp: String,
    pub wbgt: String,
    pub pressure: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_packet_deserializes() {
        let packet: StatusPacket = serde_json::from_str("{}").unwrap();

        assert_eq!(packet, StatusPacket::default());
        assert_eq!(packet.co_severity(), Severity::None);
        assert_eq!(packet.pressure_severity(), Severity::None);
    }

    #[test]
    fn test_colors_strip_direction() {
        let packet: StatusPacket = serde_json::from_value(serde_json::json!({
            "timestamp": "2025-01-01T00:00:00Z",
            "co": {"value": 250.0, "level": "dark-red", "severity": "critical"},
            "pressure": {"value": 940.0, "level": "orange-low", "severity": "warning"},
            "pm": {"pm10": {"value": 90.0, "level": "orange", "severity": "warning"}}
        }))
        .unwrap();

        let colors = packet.colors();
        assert_eq!(colors.co, "dark-red");
        assert_eq!(colors.pressure, "orange");
        assert_eq!(colors.pm10, "orange");
        assert_eq!(colors.pm2_5, UNKNOWN_LEVEL);
        assert_eq!(colors.temp, UNKNOWN_LEVEL);
    }
}
