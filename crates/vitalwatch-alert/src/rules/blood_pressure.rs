use crate::rules::sort_by_time;
use crate::{window_bounds, Finding, VitalRule};
use chrono::{DateTime, Duration, Utc};
use vitalwatch_common::types::{AlertKind, VitalKind};
use vitalwatch_storage::Patient;

/// Trend and limit checks over the last three blood pressure readings.
///
/// Checks run in order and the first match wins: rising trend, falling
/// trend, latest above `high_threshold`, latest below `low_threshold`.
#[derive(Debug, Clone)]
pub struct BloodPressureRule {
    pub window: Duration,
    /// Minimum step (mmHg) between consecutive readings for a trend.
    pub trend_delta: f64,
    pub high_threshold: f64,
    pub low_threshold: f64,
}

impl Default for BloodPressureRule {
    fn default() -> Self {
        Self {
            window: Duration::minutes(60),
            trend_delta: 10.0,
            high_threshold: 180.0,
            low_threshold: 90.0,
        }
    }
}

impl VitalRule for BloodPressureRule {
    fn name(&self) -> &str {
        "blood-pressure"
    }

    fn kind(&self) -> AlertKind {
        AlertKind::BloodPressure
    }

    fn lookback(&self) -> Duration {
        self.window
    }

    fn evaluate(&self, patient: &Patient, now: DateTime<Utc>) -> Option<Finding> {
        let (from, to) = window_bounds(self.window, now);
        let mut bp = patient.records_of_kind_between(VitalKind::BloodPressure, from, to);
        if bp.len() < 3 {
            return None;
        }

        sort_by_time(&mut bp);
        let n = bp.len();
        let (v1, v2, v3) = (bp[n - 3].value, bp[n - 2].value, bp[n - 1].value);

        let detail = if v2 - v1 > self.trend_delta && v3 - v2 > self.trend_delta {
            format!("Blood pressure increasing trend: {v1:.1} → {v2:.1} → {v3:.1} mmHg")
        } else if v1 - v2 > self.trend_delta && v2 - v3 > self.trend_delta {
            format!("Blood pressure decreasing trend: {v1:.1} → {v2:.1} → {v3:.1} mmHg")
        } else if v3 > self.high_threshold {
            format!("Blood pressure critically high: {v3:.1} mmHg")
        } else if v3 < self.low_threshold {
            format!("Blood pressure critically low: {v3:.1} mmHg")
        } else {
            return None;
        };

        Some(Finding::new(AlertKind::BloodPressure, detail))
    }
}
