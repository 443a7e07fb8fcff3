use crate::models::{Classification, Direction, NORMAL_LEVEL};
use crate::thresholds::{PressureBands, ThresholdTable};

/// First band of `table` whose `[low, high)` contains `value`.
///
/// A value outside every band (or NaN) yields the `unknown` level with no
/// bounds.
pub fn classify(value: f64, table: &ThresholdTable) -> Classification {
    match table.find(value) {
        Some(band) => Classification {
            value,
            level: band.level.clone(),
            low: band.low,
            high: band.high,
        },
        None => Classification::unknown(value),
    }
}

/// Two-sided classification around a normal band.
///
/// Inside `[normal_low, normal_high)` the level is `green` with no suffix.
/// Outside it the level is the deviation tier tagged `-low` or `-high`.
/// Tier bounds keep the `[low, high)` convention on the absolute scale, so
/// `normal_low` itself is green and `normal_high` itself is the first high tier.
pub fn classify_directional(
    value: f64,
    normal_low: f64,
    normal_high: f64,
    tiers: &[(&str, f64)],
    beyond: &str,
) -> Classification {
    if value.is_nan() {
        return Classification::unknown(value);
    }

    if (normal_low..normal_high).contains(&value) {
        return Classification {
            value,
            level: NORMAL_LEVEL.to_string(),
            low: Some(normal_low),
            high: Some(normal_high),
        };
    }

    let direction = if value < normal_low { Direction::Low } else { Direction::High };

    let mut edge = match direction {
        Direction::Low => normal_low,
        Direction::High => normal_high,
    };

    for (level, width) in tiers {
        let (low, high) = match direction {
            Direction::Low => (edge - width, edge),
            Direction::High => (edge, edge + width),
        };

        if (low..high).contains(&value) {
            return Classification {
                value,
                level: format!("{level}{}", direction.suffix()),
                low: Some(low),
                high: Some(high),
            };
        }

        edge = match direction {
            Direction::Low => low,
            Direction::High => high,
        };
    }

    let (low, high) = match direction {
        Direction::Low => (None, Some(edge)),
        Direction::High => (Some(edge), None),
    };

    Classification {
        value,
        level: format!("{beyond}{}", direction.suffix()),
        low,
        high,
    }
}

/// [`classify_directional`] driven by the configured pressure bands.
pub fn classify_pressure(value: f64, bands: &PressureBands) -> Classification {
    let tiers: Vec<(&str, f64)> = bands
        .tiers
        .iter()
        .map(|tier| (tier.level.as_str(), tier.width))
        .collect();

    classify_directional(value, bands.normal_low, bands.normal_high, &tiers, &bands.beyond)
}
