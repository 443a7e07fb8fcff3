use time::OffsetDateTime;

use crate::models::{AlertRecord, Classification, Parameter, Severity};
use crate::severity::SeverityMapper;

fn format_bound(bound: Option<f64>, open: &str) -> String {
    match bound {
        Some(value) => value.to_string(),
        None => open.to_string(),
    }
}

/// Deterministic alert text for a classification.
pub fn alert_message(parameter: Parameter, classification: &Classification) -> String {
    let level = classification.level.to_uppercase();

    if parameter.is_risk_tier() {
        format!(
            "{}={:.2} {} is {} risk tier",
            parameter.category(),
            classification.value,
            parameter.unit(),
            level,
        )
    } else {
        format!(
            "{}={:.2} is {} ({}-{})",
            parameter.category(),
            classification.value,
            level,
            format_bound(classification.low, "-inf"),
            format_bound(classification.high, "inf"),
        )
    }
}

/// Builds an alert unless the classification maps to severity `none`.
///
/// Persisting the record is left to the caller.
pub fn build_alert(
    parameter: Parameter,
    timestamp: OffsetDateTime,
    classification: &Classification,
    mapper: &SeverityMapper,
) -> Option<AlertRecord> {
    let severity = mapper.level_to_severity(&classification.level);
    if severity == Severity::None {
        return None;
    }

    Some(AlertRecord {
        timestamp,
        category: parameter.category().to_string(),
        value: classification.value,
        limit: classification.high,
        severity,
        message: alert_message(parameter, classification),
    })
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn classification(value: f64, level: &str, low: Option<f64>, high: Option<f64>) -> Classification {
        Classification {
            value,
            level: level.to_string(),
            low,
            high,
        }
    }

    #[test]
    fn test_no_alert_for_none_severity() {
        let mapper = SeverityMapper::default();
        let ts = datetime!(2025-01-01 0:00 UTC);

        assert!(build_alert(Parameter::Temperature, ts, &classification(21.0, "green", None, Some(24.0)), &mapper).is_none());
        assert!(build_alert(Parameter::Pm2_5, ts, &classification(16.0, "yellow", Some(12.0), Some(35.0)), &mapper).is_none());
        assert!(build_alert(Parameter::Pm10, ts, &Classification::unknown(-3.0), &mapper).is_none());
    }

    #[test]
    fn test_generic_message() {
        let mapper = SeverityMapper::default();
        let ts = datetime!(2025-01-01 0:00 UTC);

        let alert = build_alert(
            Parameter::Pm2_5,
            ts,
            &classification(72.0, "red", Some(55.0), Some(150.0)),
            &mapper,
        )
        .unwrap();

        assert_eq!(alert.category, "PM2.5");
        assert_eq!(alert.severity, Severity::High);
        assert_eq!(alert.limit, Some(150.0));
        assert_eq!(alert.message, "PM2.5=72.00 is RED (55-150)");
    }

    #[test]
    fn test_open_bounds_in_message() {
        let mapper = SeverityMapper::default();
        let ts = datetime!(2025-01-01 0:00 UTC);

        let alert = build_alert(
            Parameter::Temperature,
            ts,
            &classification(33.0, "dark-red", Some(32.0), None),
            &mapper,
        )
        .unwrap();

        assert_eq!(alert.severity, Severity::Critical);
        assert_eq!(alert.limit, None);
        assert_eq!(alert.message, "TEMP=33.00 is DARK-RED (32-inf)");
    }

    #[test]
    fn test_risk_tier_message() {
        let mapper = SeverityMapper::default();
        let ts = datetime!(2025-01-01 0:00 UTC);

        let alert = build_alert(
            Parameter::CoCeiling,
            ts,
            &classification(250.0, "dark-red", Some(200.0), Some(300.0)),
            &mapper,
        )
        .unwrap();

        assert_eq!(alert.category, "CO_CEILING");
        assert_eq!(alert.message, "CO_CEILING=250.00 ppm is DARK-RED risk tier");
    }

    #[test]
    fn test_yellow_alerts_when_configured() {
        let mapper = SeverityMapper::new(Severity::Warning);
        let ts = datetime!(2025-01-01 0:00 UTC);

        let alert = build_alert(
            Parameter::Pressure,
            ts,
            &classification(960.0, "yellow-low", Some(960.0), Some(980.0)),
            &mapper,
        )
        .unwrap();

        assert_eq!(alert.severity, Severity::Warning);
        assert_eq!(alert.message, "PRESSURE=960.00 is YELLOW-LOW (960-980)");
    }
}
