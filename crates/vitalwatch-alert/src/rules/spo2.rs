use crate::rules::sort_by_time;
use crate::{window_bounds, Finding, VitalRule};
use chrono::{DateTime, Duration, Utc};
use vitalwatch_common::types::{AlertKind, VitalKind};
use vitalwatch_storage::Patient;

/// Oxygen saturation level and rapid-drop detection.
///
/// A low latest reading is reported before any drop is looked for. A drop is
/// measured from any earlier reading within `window` of the latest one.
#[derive(Debug, Clone)]
pub struct SpO2Rule {
    pub window: Duration,
    pub low_threshold: f64,
    /// Fall (percentage points) from an earlier reading that counts as rapid.
    pub drop_delta: f64,
}

impl Default for SpO2Rule {
    fn default() -> Self {
        Self {
            window: Duration::minutes(10),
            low_threshold: 92.0,
            drop_delta: 5.0,
        }
    }
}

impl VitalRule for SpO2Rule {
    fn name(&self) -> &str {
        "spo2"
    }

    fn kind(&self) -> AlertKind {
        AlertKind::SpO2
    }

    fn lookback(&self) -> Duration {
        self.window
    }

    fn evaluate(&self, patient: &Patient, now: DateTime<Utc>) -> Option<Finding> {
        let (from, to) = window_bounds(self.window, now);
        let mut spo2 = patient.records_of_kind_between(VitalKind::SpO2, from, to);
        sort_by_time(&mut spo2);
        let latest = spo2.last()?;

        if latest.value < self.low_threshold {
            return Some(Finding::new(
                AlertKind::SpO2,
                format!("SpO2 critically low: {:.1}%", latest.value),
            ));
        }

        let cutoff = latest.timestamp - self.window.num_milliseconds();
        let earlier = spo2
            .iter()
            .filter(|r| r.timestamp >= cutoff && r.timestamp < latest.timestamp);

        for prev in earlier {
            if prev.value - latest.value >= self.drop_delta {
                return Some(Finding::new(
                    AlertKind::SpO2,
                    format!(
                        "SpO2 rapid drop: from {:.1}% to {:.1}%",
                        prev.value, latest.value
                    ),
                ));
            }
        }

        None
    }
}
