//! Rolling CO exposure averages (STEL and TWA).
//!
//! This runs beside the instant evaluation and only adds records of its own;
//! it never feeds the status packet or the ventilation decision.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::models::{AlertRecord, MetricRecord, Reading, Severity};

pub const STEL_METRIC: &str = "CO_STEL";
pub const TWA_METRIC: &str = "CO_TWA";

fn default_stel_window() -> u32 {
    15
}

fn default_twa_window() -> u32 {
    480
}

fn default_stel_limit() -> f64 {
    200.0
}

fn default_twa_limit() -> f64 {
    50.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Short term exposure window in minutes
    #[serde(default = "default_stel_window")]
    pub stel_window_minutes: u32,
    /// Time weighted average window in minutes
    #[serde(default = "default_twa_window")]
    pub twa_window_minutes: u32,
    /// ppm
    #[serde(default = "default_stel_limit")]
    pub stel_limit: f64,
    /// ppm
    #[serde(default = "default_twa_limit")]
    pub twa_limit: f64,
}

impl Default for ExposureConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            stel_window_minutes: default_stel_window(),
            twa_window_minutes: default_twa_window(),
            stel_limit: default_stel_limit(),
            twa_limit: default_twa_limit(),
        }
    }
}

impl ExposureConfig {
    pub fn stel_window(&self) -> Duration {
        Duration::minutes(i64::from(self.stel_window_minutes))
    }

    pub fn twa_window(&self) -> Duration {
        Duration::minutes(i64::from(self.twa_window_minutes))
    }

    fn stel_label(&self) -> String {
        format!("{}min", self.stel_window_minutes)
    }

    fn twa_label(&self) -> String {
        if self.twa_window_minutes % 60 == 0 {
            format!("{}h", self.twa_window_minutes / 60)
        } else {
            format!("{}min", self.twa_window_minutes)
        }
    }
}

/// Averages computed after the latest sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExposureSnapshot {
    pub timestamp: OffsetDateTime,
    pub stel: Option<f64>,
    pub twa: Option<f64>,
}

/// Mean of the samples newer than `now - window`, rounded to two decimals.
///
/// A window that is not full yet averages whatever it holds.
pub fn window_average<'a, I>(samples: I, now: OffsetDateTime, window: Duration) -> Option<f64>
where
    I: IntoIterator<Item = &'a (OffsetDateTime, f64)>,
{
    let since = now - window;
    let (sum, count) = samples
        .into_iter()
        .filter(|(timestamp, _)| *timestamp > since && *timestamp <= now)
        .fold((0.0, 0usize), |(sum, count), (_, value)| (sum + value, count + 1));

    if count == 0 {
        None
    } else {
        Some((sum / count as f64 * 100.0).round() / 100.0)
    }
}

#[derive(Debug, Clone)]
pub struct ExposureTracker {
    config: ExposureConfig,
    samples: VecDeque<(OffsetDateTime, f64)>,
}

impl ExposureTracker {
    pub fn new(config: ExposureConfig) -> Self {
        Self {
            config,
            samples: VecDeque::new(),
        }
    }

    pub fn config(&self) -> &ExposureConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Loads history, e.g. readings already stored before a restart.
    pub fn seed<'a, I>(&mut self, readings: I)
    where
        I: IntoIterator<Item = &'a Reading>,
    {
        for reading in readings {
            self.push(reading);
        }
    }

    fn push(&mut self, reading: &Reading) {
        if !reading.co_valid {
            return;
        }

        let position = self
            .samples
            .iter()
            .rposition(|(timestamp, _)| *timestamp <= reading.timestamp)
            .map_or(0, |index| index + 1);
        self.samples.insert(position, (reading.timestamp, reading.co_mean));
    }

    fn prune(&mut self, now: OffsetDateTime) {
        let horizon = now - self.config.stel_window().max(self.config.twa_window());
        while self.samples.front().is_some_and(|(timestamp, _)| *timestamp <= horizon) {
            self.samples.pop_front();
        }
    }

    /// Adds `reading` and returns the averages as of its timestamp.
    ///
    /// Readings with `co_valid = false` are not sampled but still produce a
    /// snapshot from the existing history.
    pub fn record(&mut self, reading: &Reading) -> ExposureSnapshot {
        self.push(reading);
        self.prune(reading.timestamp);

        ExposureSnapshot {
            timestamp: reading.timestamp,
            stel: window_average(&self.samples, reading.timestamp, self.config.stel_window()),
            twa: window_average(&self.samples, reading.timestamp, self.config.twa_window()),
        }
    }

    pub fn metrics(&self, snapshot: &ExposureSnapshot) -> Vec<MetricRecord> {
        let entries = [
            (STEL_METRIC, snapshot.stel, self.config.stel_label(), self.config.stel_limit),
            (TWA_METRIC, snapshot.twa, self.config.twa_label(), self.config.twa_limit),
        ];

        entries
            .into_iter()
            .filter_map(|(metric_type, value, window, limit)| {
                let value = value?;
                Some(MetricRecord {
                    timestamp: snapshot.timestamp,
                    metric_type: metric_type.to_string(),
                    value,
                    window,
                    limit: Some(limit),
                    status: if value > limit { "exceeded" } else { "ok" }.to_string(),
                })
            })
            .collect()
    }

    pub fn alerts(&self, snapshot: &ExposureSnapshot) -> Vec<AlertRecord> {
        let entries = [
            (STEL_METRIC, "STEL", snapshot.stel, self.config.stel_limit, Severity::High),
            (TWA_METRIC, "TWA", snapshot.twa, self.config.twa_limit, Severity::Warning),
        ];

        entries
            .into_iter()
            .filter_map(|(category, label, value, limit, severity)| {
                let value = value.filter(|value| *value > limit)?;
                Some(AlertRecord {
                    timestamp: snapshot.timestamp,
                    category: category.to_string(),
                    value,
                    limit: Some(limit),
                    severity,
                    message: format!("CO {label} exceeded: {value:.2} ppm > limit {limit} ppm"),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn reading(minute: i64, co_mean: f64, co_valid: bool) -> Reading {
        Reading {
            timestamp: datetime!(2025-03-04 08:00:00 UTC) + Duration::minutes(minute),
            temp: 22.0,
            pressure: 1013.0,
            co_mean,
            co_max: co_mean,
            co_valid,
            pm2_5: 5.0,
            pm10: 10.0,
        }
    }

    fn tracker() -> ExposureTracker {
        ExposureTracker::new(ExposureConfig {
            enabled: true,
            ..Default::default()
        })
    }

    #[test]
    fn test_disabled_by_default() {
        let config = ExposureConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.stel_window(), Duration::minutes(15));
        assert_eq!(config.twa_window(), Duration::hours(8));
    }

    #[test]
    fn test_window_average() {
        let now = datetime!(2025-03-04 08:30:00 UTC);
        let samples = vec![
            (now - Duration::minutes(20), 100.0),
            (now - Duration::minutes(10), 10.0),
            (now, 20.0),
        ];

        assert_eq!(window_average(&samples, now, Duration::minutes(15)), Some(15.0));
        assert_eq!(window_average(&samples, now, Duration::minutes(60)), Some(43.33));
        assert_eq!(window_average(&[], now, Duration::minutes(15)), None);
    }

    #[test]
    fn test_progressive_average() {
        let mut tracker = tracker();

        let first = tracker.record(&reading(0, 10.0, true));
        assert_eq!(first.stel, Some(10.0));
        assert_eq!(first.twa, Some(10.0));

        let second = tracker.record(&reading(1, 30.0, true));
        assert_eq!(second.stel, Some(20.0));
        assert_eq!(second.twa, Some(20.0));
    }

    #[test]
    fn test_stel_forgets_old_samples() {
        let mut tracker = tracker();
        tracker.record(&reading(0, 100.0, true));

        let snapshot = tracker.record(&reading(20, 10.0, true));
        assert_eq!(snapshot.stel, Some(10.0));
        assert_eq!(snapshot.twa, Some(55.0));
    }

    #[test]
    fn test_invalid_co_is_skipped() {
        let mut tracker = tracker();
        tracker.record(&reading(0, 10.0, true));

        let snapshot = tracker.record(&reading(1, 900.0, false));
        assert_eq!(snapshot.stel, Some(10.0));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_samples_outside_twa_are_pruned() {
        let mut tracker = tracker();
        tracker.record(&reading(0, 10.0, true));
        tracker.record(&reading(600, 20.0, true));

        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_seed_keeps_order() {
        let mut tracker = tracker();
        tracker.seed(&[reading(5, 30.0, true), reading(0, 10.0, true)]);

        let snapshot = tracker.record(&reading(6, 20.0, true));
        assert_eq!(snapshot.stel, Some(20.0));
        assert_eq!(tracker.len(), 3);
    }

    #[test]
    fn test_metrics_and_alerts() {
        let mut tracker = tracker();
        let snapshot = tracker.record(&reading(0, 250.0, true));

        let metrics = tracker.metrics(&snapshot);
        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0].metric_type, STEL_METRIC);
        assert_eq!(metrics[0].window, "15min");
        assert_eq!(metrics[0].status, "exceeded");
        assert_eq!(metrics[1].metric_type, TWA_METRIC);
        assert_eq!(metrics[1].window, "8h");

        let alerts = tracker.alerts(&snapshot);
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].category, STEL_METRIC);
        assert_eq!(alerts[0].severity, Severity::High);
        assert_eq!(alerts[1].category, TWA_METRIC);
        assert_eq!(alerts[1].severity, Severity::Warning);
        assert_eq!(alerts[1].limit, Some(50.0));
    }

    #[test]
    fn test_no_alert_below_limits() {
        let mut tracker = tracker();
        let snapshot = tracker.record(&reading(0, 20.0, true));

        assert!(tracker.alerts(&snapshot).is_empty());
        assert!(tracker.metrics(&snapshot).iter().all(|metric| metric.status == "ok"));
    }

    #[test]
    fn test_no_history_yields_nothing() {
        let mut tracker = tracker();
        let snapshot = tracker.record(&reading(0, 20.0, false));

        assert_eq!(snapshot.stel, None);
        assert!(tracker.metrics(&snapshot).is_empty());
        assert!(tracker.alerts(&snapshot).is_empty());
    }
}
