use serde::{Deserialize, Serialize};

use crate::models::{split_level, Severity};

/// Maps level names to severities.
///
/// Only the bare `yellow` band is configurable; every other colour has a
/// fixed severity and anything unrecognized resolves to `none`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityMapper {
    #[serde(default)]
    pub yellow: Severity,
}

impl Default for SeverityMapper {
    fn default() -> Self {
        Self { yellow: Severity::None }
    }
}

impl SeverityMapper {
    pub fn new(yellow: Severity) -> Self {
        Self { yellow }
    }

    /// Case-insensitive on the base name; `-low`/`-high` tags are ignored.
    pub fn level_to_severity(&self, level: &str) -> Severity {
        let (base, _) = split_level(level);

        match base.as_str() {
            "green" => Severity::None,
            "yellow" => self.yellow,
            "orange" => Severity::Warning,
            "red" => Severity::High,
            "dark-red" | "purple" => Severity::Critical,
            _ => Severity::None,
        }
    }
}

/// [`SeverityMapper::level_to_severity`] with the default mapping.
pub fn level_to_severity(level: &str) -> Severity {
    SeverityMapper::default().level_to_severity(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_levels() {
        assert_eq!(level_to_severity("green"), Severity::None);
        assert_eq!(level_to_severity("orange"), Severity::Warning);
        assert_eq!(level_to_severity("RED"), Severity::High);
        assert_eq!(level_to_severity("dark-red"), Severity::Critical);
        assert_eq!(level_to_severity("dark_red"), Severity::Critical);
        assert_eq!(level_to_severity("purple"), Severity::Critical);
    }

    #[test]
    fn test_direction_suffix_is_ignored() {
        assert_eq!(level_to_severity("orange-low"), Severity::Warning);
        assert_eq!(level_to_severity("red-high"), Severity::High);
        assert_eq!(level_to_severity("dark-red-high"), Severity::Critical);
    }

    #[test]
    fn test_unknown_levels_fail_safe() {
        assert_eq!(level_to_severity("unknown"), Severity::None);
        assert_eq!(level_to_severity("magenta"), Severity::None);
        assert_eq!(level_to_severity(""), Severity::None);
    }

    #[test]
    fn test_yellow_is_configurable() {
        assert_eq!(level_to_severity("yellow"), Severity::None);
        assert_eq!(level_to_severity("yellow-low"), Severity::None);

        let strict = SeverityMapper::new(Severity::Warning);
        assert_eq!(strict.level_to_severity("yellow"), Severity::Warning);
        assert_eq!(strict.level_to_severity("Yellow-High"), Severity::Warning);
        assert_eq!(strict.level_to_severity("orange"), Severity::Warning);
    }

    #[test]
    fn test_total_over_produced_levels() {
        let all = [Severity::None, Severity::Warning, Severity::High, Severity::Critical];
        for level in [
            "green", "yellow", "orange", "red", "dark-red", "purple", "yellow-low", "orange-high",
            "red-low", "dark-red-low", "unknown",
        ] {
            assert!(all.contains(&level_to_severity(level)));
        }
    }
}
