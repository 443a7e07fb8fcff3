//! Threshold configuration.
//!
//! A [`Thresholds`] value is built once at startup (from defaults or the
//! settings file) and handed by reference to every classifier call.

use serde::{Deserialize, Serialize};

use crate::errors::ThresholdError;
use crate::severity::SeverityMapper;

/// One named band `[low, high)`. A missing bound is open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
}

impl Band {
    pub fn new(level: &str, low: Option<f64>, high: Option<f64>) -> Self {
        Self {
            level: level.to_string(),
            low,
            high,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.low.is_none_or(|low| value >= low) && self.high.is_none_or(|high| value < high)
    }
}

/// Ordered, contiguous, non-overlapping bands. Lookup is first match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Band>", into = "Vec<Band>")]
pub struct ThresholdTable {
    bands: Vec<Band>,
}

impl ThresholdTable {
    pub fn new(bands: Vec<Band>) -> Result<Self, ThresholdError> {
        if bands.is_empty() {
            return Err(ThresholdError::EmptyTable);
        }

        let last = bands.len() - 1;
        for (index, band) in bands.iter().enumerate() {
            if band.low.is_none() && index != 0 {
                return Err(ThresholdError::UnboundedLow { level: band.level.clone() });
            }
            if band.high.is_none() && index != last {
                return Err(ThresholdError::UnboundedHigh { level: band.level.clone() });
            }
            if let (Some(low), Some(high)) = (band.low, band.high) {
                if !(low < high) {
                    return Err(ThresholdError::EmptyBand {
                        level: band.level.clone(),
                        low,
                        high,
                    });
                }
            }
        }

        for pair in bands.windows(2) {
            let (previous, current) = (&pair[0], &pair[1]);
            // Both bounds are present here: only the ends may be open.
            let previous_high = previous.high.unwrap_or(f64::INFINITY);
            let low = current.low.unwrap_or(f64::NEG_INFINITY);
            if previous_high != low {
                return Err(ThresholdError::NotContiguous {
                    previous: previous.level.clone(),
                    level: current.level.clone(),
                    previous_high,
                    low,
                });
            }
        }

        Ok(Self { bands })
    }

    /// Shorthand for tables whose first band is open below and last band open above.
    ///
    /// `edges` are the boundaries between consecutive levels, so
    /// `edges.len() == levels.len() - 1`.
    pub fn from_edges(levels: &[&str], edges: &[f64]) -> Result<Self, ThresholdError> {
        if levels.is_empty() {
            return Err(ThresholdError::EmptyTable);
        }
        if edges.len() + 1 != levels.len() {
            return Err(ThresholdError::EdgeCountMismatch {
                levels: levels.len(),
                edges: edges.len(),
            });
        }

        let bands = levels
            .iter()
            .enumerate()
            .map(|(index, level)| {
                let low = index.checked_sub(1).map(|i| edges[i]);
                let high = edges.get(index).copied();
                Band::new(level, low, high)
            })
            .collect();

        Self::new(bands)
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    pub fn find(&self, value: f64) -> Option<&Band> {
        self.bands.iter().find(|band| band.contains(value))
    }
}

impl TryFrom<Vec<Band>> for ThresholdTable {
    type Error = ThresholdError;

    fn try_from(bands: Vec<Band>) -> Result<Self, Self::Error> {
        Self::new(bands)
    }
}

impl From<ThresholdTable> for Vec<Band> {
    fn from(table: ThresholdTable) -> Self {
        table.bands
    }
}

/// A deviation tier outside the pressure normal band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressureTier {
    pub level: String,
    pub width: f64,
}

/// Two-sided bands for barometric pressure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressureBands {
    /// Inclusive lower bound of the normal band in hPa
    pub normal_low: f64,
    /// Exclusive upper bound of the normal band in hPa
    pub normal_high: f64,
    /// Reference pressure used when a level carries no direction tag
    pub nominal: f64,
    /// Tiers of increasing deviation, nearest first
    pub tiers: Vec<PressureTier>,
    /// Level beyond the last tier
    pub beyond: String,
}

impl PressureBands {
    pub fn validate(&self) -> Result<(), ThresholdError> {
        if !(self.normal_low < self.normal_high) {
            return Err(ThresholdError::EmptyNormalBand {
                low: self.normal_low,
                high: self.normal_high,
            });
        }

        match self.tiers.iter().find(|tier| !(tier.width > 0.0)) {
            Some(tier) => Err(ThresholdError::InvalidTierWidth(tier.width)),
            None => Ok(()),
        }
    }
}

impl Default for PressureBands {
    fn default() -> Self {
        Self {
            normal_low: 980.0,
            normal_high: 1030.0,
            nominal: 1013.25,
            tiers: vec![
                PressureTier { level: String::from("yellow"), width: 20.0 },
                PressureTier { level: String::from("orange"), width: 20.0 },
                PressureTier { level: String::from("red"), width: 30.0 },
            ],
            beyond: String::from("dark-red"),
        }
    }
}

const COLOR_LEVELS: [&str; 6] = ["green", "yellow", "orange", "red", "dark-red", "purple"];

const HEAT_LEVELS: [&str; 5] = ["green", "yellow", "orange", "red", "dark-red"];

fn default_table(levels: &[&str], edges: &[f64]) -> ThresholdTable {
    match ThresholdTable::from_edges(levels, edges) {
        Ok(table) => table,
        Err(e) => unreachable!("built-in threshold table is malformed: {e}"),
    }
}

pub fn default_co() -> ThresholdTable {
    default_table(&COLOR_LEVELS, &[25.0, 35.0, 100.0, 200.0, 300.0])
}

pub fn default_pm2_5() -> ThresholdTable {
    default_table(&COLOR_LEVELS, &[12.0, 35.0, 55.0, 150.0, 250.0])
}

pub fn default_pm10() -> ThresholdTable {
    default_table(&COLOR_LEVELS, &[45.0, 80.0, 120.0, 150.0, 300.0])
}

pub fn default_temperature() -> ThresholdTable {
    default_table(&HEAT_LEVELS, &[24.0, 27.0, 30.0, 32.0])
}

pub fn default_wbgt() -> ThresholdTable {
    default_table(&HEAT_LEVELS, &[25.0, 28.0, 30.0, 32.0])
}

pub fn default_humidity() -> f64 {
    40.0
}

/// Every table and constant the classifiers read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    #[serde(default = "default_co")]
    pub co: ThresholdTable,
    #[serde(default = "default_pm2_5")]
    pub pm2_5: ThresholdTable,
    #[serde(default = "default_pm10")]
    pub pm10: ThresholdTable,
    #[serde(default = "default_temperature")]
    pub temperature: ThresholdTable,
    #[serde(default = "default_wbgt")]
    pub wbgt: ThresholdTable,
    #[serde(default)]
    pub pressure: PressureBands,
    /// Relative humidity in % assumed by the WBGT estimate
    #[serde(default = "default_humidity")]
    pub default_humidity: f64,
    #[serde(default)]
    pub severity: SeverityMapper,
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), ThresholdError> {
        self.pressure.validate()?;

        if !(0.0..=100.0).contains(&self.default_humidity) {
            return Err(ThresholdError::InvalidHumidity(self.default_humidity));
        }

        Ok(())
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            co: default_co(),
            pm2_5: default_pm2_5(),
            pm10: default_pm10(),
            temperature: default_temperature(),
            wbgt: default_wbgt(),
            pressure: PressureBands::default(),
            default_humidity: default_humidity(),
            severity: SeverityMapper::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let thresholds = Thresholds::default();

        assert!(thresholds.validate().is_ok());
        assert_eq!(thresholds.co.bands().len(), 6);
        assert_eq!(thresholds.temperature.bands()[0].low, None);
        assert_eq!(thresholds.wbgt.bands().last().unwrap().high, None);
    }

    #[test]
    fn test_rejects_gap() {
        let result = ThresholdTable::new(vec![
            Band::new("green", None, Some(10.0)),
            Band::new("orange", Some(12.0), None),
        ]);

        assert!(matches!(result, Err(ThresholdError::NotContiguous { .. })));
    }

    #[test]
    fn test_rejects_overlap_and_empty_band() {
        let overlap = ThresholdTable::new(vec![
            Band::new("green", None, Some(10.0)),
            Band::new("orange", Some(8.0), None),
        ]);
        assert!(matches!(overlap, Err(ThresholdError::NotContiguous { .. })));

        let empty = ThresholdTable::new(vec![Band::new("green", Some(5.0), Some(5.0))]);
        assert!(matches!(empty, Err(ThresholdError::EmptyBand { .. })));

        assert_eq!(ThresholdTable::new(vec![]), Err(ThresholdError::EmptyTable));
    }

    #[test]
    fn test_rejects_open_bound_in_the_middle() {
        let result = ThresholdTable::new(vec![
            Band::new("green", None, None),
            Band::new("orange", Some(8.0), None),
        ]);

        assert!(matches!(result, Err(ThresholdError::UnboundedHigh { .. })));
    }

    #[test]
    fn test_from_edges_length_mismatch() {
        let result = ThresholdTable::from_edges(&["green", "orange", "red"], &[10.0]);
        assert_eq!(result, Err(ThresholdError::EdgeCountMismatch { levels: 3, edges: 1 }));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Expected one edge fewer than levels, got 3 levels and 1 edges"
        );

        assert_eq!(ThresholdTable::from_edges(&[], &[]), Err(ThresholdError::EmptyTable));
    }

    #[test]
    fn test_deserialize_from_toml() {
        let thresholds: Thresholds = toml::from_str(
            r#"
            default_humidity = 55.0

            [[co]]
            level = "green"
            high = 50.0

            [[co]]
            level = "red"
            low = 50.0

            [severity]
            yellow = "warning"
            "#,
        )
        .unwrap();

        assert_eq!(thresholds.co.bands().len(), 2);
        assert_eq!(thresholds.pm2_5, default_pm2_5());
        assert_eq!(thresholds.default_humidity, 55.0);
        assert_eq!(thresholds.severity.yellow, crate::models::Severity::Warning);
    }

    #[test]
    fn test_deserialize_rejects_malformed_table() {
        let result: Result<Thresholds, _> = toml::from_str(
            r#"
            [[pm10]]
            level = "green"
            high = 50.0

            [[pm10]]
            level = "red"
            low = 60.0
            "#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_validate_pressure_and_humidity() {
        let mut thresholds = Thresholds::default();
        thresholds.pressure.tiers[1].width = 0.0;
        assert_eq!(thresholds.validate(), Err(ThresholdError::InvalidTierWidth(0.0)));

        let mut thresholds = Thresholds::default();
        thresholds.default_humidity = 140.0;
        assert_eq!(thresholds.validate(), Err(ThresholdError::InvalidHumidity(140.0)));
    }
}
