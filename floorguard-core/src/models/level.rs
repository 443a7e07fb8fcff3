use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Level reported when a value falls outside every band of its table.
pub const UNKNOWN_LEVEL: &str = "unknown";

/// Level of the in-range band of a directional parameter.
pub const NORMAL_LEVEL: &str = "green";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    None,
    Warning,
    High,
    Critical,
}

impl Severity {
    /// Escalation step used when scaling actuator corrections.
    pub fn rank(self) -> u8 {
        match self {
            Severity::None => 0,
            Severity::Warning => 1,
            Severity::High => 2,
            Severity::Critical => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Warning => "warning",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Severity::None),
            "warning" => Ok(Severity::Warning),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            other => Err(format!("unknown severity: {other}")),
        }
    }
}

impl From<String> for Severity {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_default()
    }
}

/// Side of the normal band a directional reading deviated toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Low,
    High,
}

impl Direction {
    pub fn suffix(self) -> &'static str {
        match self {
            Direction::Low => "-low",
            Direction::High => "-high",
        }
    }
}

/// Lowercases a level name and turns `_` separators into `-`.
pub fn normalize_level(level: &str) -> String {
    level.trim().to_ascii_lowercase().replace('_', "-")
}

/// Splits `orange-low` into `("orange", Some(Low))`. The input is normalized first.
pub fn split_level(level: &str) -> (String, Option<Direction>) {
    let normalized = normalize_level(level);

    for direction in [Direction::Low, Direction::High] {
        if let Some(base) = normalized.strip_suffix(direction.suffix()) {
            if !base.is_empty() {
                return (base.to_string(), Some(direction));
            }
        }
    }

    (normalized, None)
}

/// Base colour of a level with any direction tag removed.
pub fn base_color(level: &str) -> String {
    let (base, _) = split_level(level);
    if base.is_empty() {
        UNKNOWN_LEVEL.to_string()
    } else {
        base
    }
}

/// The resolved band for one parameter on one reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Classified value
    pub value: f64,
    /// Band name, with a direction suffix for directional parameters
    pub level: String,
    /// Inclusive lower bound, `None` when open or unknown
    pub low: Option<f64>,
    /// Exclusive upper bound, `None` when open or unknown
    pub high: Option<f64>,
}

impl Classification {
    pub fn unknown(value: f64) -> Self {
        Self {
            value,
            level: UNKNOWN_LEVEL.to_string(),
            low: None,
            high: None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.level == UNKNOWN_LEVEL
    }
}
