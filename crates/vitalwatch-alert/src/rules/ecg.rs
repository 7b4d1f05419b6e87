use crate::rules::sort_by_time;
use crate::window::RunningWindow;
use crate::{window_bounds, Finding, VitalRule};
use chrono::{DateTime, Duration, Utc};
use vitalwatch_common::types::{AlertKind, VitalKind};
use vitalwatch_storage::Patient;

/// Peak detection against the running mean of the preceding samples.
///
/// The window is seeded with the first `window_size` samples; every later
/// sample is compared with the mean of the `window_size` samples before it.
/// Only the first peak is reported.
#[derive(Debug, Clone)]
pub struct EcgRule {
    pub window: Duration,
    pub window_size: usize,
    /// A sample above `mean * peak_factor` is a peak.
    pub peak_factor: f64,
}

impl Default for EcgRule {
    fn default() -> Self {
        Self {
            window: Duration::minutes(60),
            window_size: 5,
            peak_factor: 1.5,
        }
    }
}

impl VitalRule for EcgRule {
    fn name(&self) -> &str {
        "ecg"
    }

    fn kind(&self) -> AlertKind {
        AlertKind::Ecg
    }

    fn lookback(&self) -> Duration {
        self.window
    }

    fn evaluate(&self, patient: &Patient, now: DateTime<Utc>) -> Option<Finding> {
        let (from, to) = window_bounds(self.window, now);
        let mut ecg = patient.records_of_kind_between(VitalKind::Ecg, from, to);
        if self.window_size == 0 || ecg.len() <= self.window_size {
            return None;
        }

        sort_by_time(&mut ecg);
        let (seed, rest) = ecg.split_at(self.window_size);

        let mut window = RunningWindow::new(self.window_size);
        for r in seed {
            window.push(r.value);
        }

        for r in rest {
            let avg = window.mean()?;
            if r.value > avg * self.peak_factor {
                return Some(Finding::new(
                    AlertKind::Ecg,
                    format!("ECG peak abnormal: value={:.1} (avg={avg:.1})", r.value),
                ));
            }
            window.push(r.value);
        }

        None
    }
}
