use crate::rules::latest;
use crate::{window_bounds, Finding, VitalRule};
use chrono::{DateTime, Duration, Utc};
use vitalwatch_common::types::{AlertKind, VitalKind};
use vitalwatch_storage::Patient;

/// Low blood pressure together with low oxygen saturation.
///
/// Fires on the latest reading of each family; it does not replace the
/// separate blood pressure and SpO2 findings.
#[derive(Debug, Clone)]
pub struct HypotensiveHypoxemiaRule {
    pub window: Duration,
    pub bp_threshold: f64,
    pub spo2_threshold: f64,
}

impl Default for HypotensiveHypoxemiaRule {
    fn default() -> Self {
        Self {
            window: Duration::minutes(60),
            bp_threshold: 90.0,
            spo2_threshold: 92.0,
        }
    }
}

impl VitalRule for HypotensiveHypoxemiaRule {
    fn name(&self) -> &str {
        "hypotensive-hypoxemia"
    }

    fn kind(&self) -> AlertKind {
        AlertKind::HypotensiveHypoxemia
    }

    fn lookback(&self) -> Duration {
        self.window
    }

    fn evaluate(&self, patient: &Patient, now: DateTime<Utc>) -> Option<Finding> {
        let (from, to) = window_bounds(self.window, now);
        let bp = patient.records_of_kind_between(VitalKind::BloodPressure, from, to);
        let spo2 = patient.records_of_kind_between(VitalKind::SpO2, from, to);

        let bp = latest(&bp)?.value;
        let spo2 = latest(&spo2)?.value;

        if bp < self.bp_threshold && spo2 < self.spo2_threshold {
            Some(Finding::new(
                AlertKind::HypotensiveHypoxemia,
                format!("Hypotensive hypoxemia: blood pressure {bp:.1} mmHg, SpO2 {spo2:.1}%"),
            ))
        } else {
            None
        }
    }
}
