use crate::rules::latest;
use crate::{window_bounds, Finding, VitalRule};
use chrono::{DateTime, Duration, Utc};
use vitalwatch_common::types::{AlertKind, VitalKind};
use vitalwatch_storage::Patient;

/// Limit check on the most recent heart rate reading.
#[derive(Debug, Clone)]
pub struct HeartRateRule {
    pub window: Duration,
    pub low_threshold: f64,
    pub high_threshold: f64,
}

impl Default for HeartRateRule {
    fn default() -> Self {
        Self {
            window: Duration::minutes(60),
            low_threshold: 50.0,
            high_threshold: 100.0,
        }
    }
}

impl VitalRule for HeartRateRule {
    fn name(&self) -> &str {
        "heart-rate"
    }

    fn kind(&self) -> AlertKind {
        AlertKind::HeartRate
    }

    fn lookback(&self) -> Duration {
        self.window
    }

    fn evaluate(&self, patient: &Patient, now: DateTime<Utc>) -> Option<Finding> {
        let (from, to) = window_bounds(self.window, now);
        let hr = patient.records_of_kind_between(VitalKind::HeartRate, from, to);
        let v = latest(&hr)?.value;

        if v < self.low_threshold {
            Some(Finding::new(
                AlertKind::HeartRate,
                format!("Heart rate critically low: {v:.1} bpm"),
            ))
        } else if v > self.high_threshold {
            Some(Finding::new(
                AlertKind::HeartRate,
                format!("Heart rate critically high: {v:.1} bpm"),
            ))
        } else {
            None
        }
    }
}
