use core::fmt;

use serde::{Deserialize, Serialize};

/// The environmental parameters tracked on every reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parameter {
    CoCeiling,
    Pm2_5,
    Pm10,
    Temperature,
    Wbgt,
    Pressure,
}

impl Parameter {
    pub const ALL: [Parameter; 6] = [
        Parameter::CoCeiling,
        Parameter::Pm2_5,
        Parameter::Pm10,
        Parameter::Temperature,
        Parameter::Wbgt,
        Parameter::Pressure,
    ];

    /// Name stored in the `metric_type` column.
    pub fn metric_type(self) -> &'static str {
        match self {
            Parameter::CoCeiling => "CO_CEILING",
            Parameter::Pm2_5 => "PM2_5_LEVEL",
            Parameter::Pm10 => "PM10_LEVEL",
            Parameter::Temperature => "TEMP_LEVEL",
            Parameter::Wbgt => "WBGT",
            Parameter::Pressure => "PRESSURE_LEVEL",
        }
    }

    /// Name stored in the alert `category` column.
    pub fn category(self) -> &'static str {
        match self {
            Parameter::CoCeiling => "CO_CEILING",
            Parameter::Pm2_5 => "PM2.5",
            Parameter::Pm10 => "PM10",
            Parameter::Temperature => "TEMP",
            Parameter::Wbgt => "WBGT",
            Parameter::Pressure => "PRESSURE",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Parameter::CoCeiling => "ppm",
            Parameter::Pm2_5 | Parameter::Pm10 => "µg/m³",
            Parameter::Temperature | Parameter::Wbgt => "°C",
            Parameter::Pressure => "hPa",
        }
    }

    /// CO and WBGT alerts name the risk tier instead of the band range.
    pub fn is_risk_tier(self) -> bool {
        matches!(self, Parameter::CoCeiling | Parameter::Wbgt)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.category())
    }
}
