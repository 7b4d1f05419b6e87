//! Rule-evaluation engine for patient vital signs.
//!
//! The [`engine::Evaluator`] runs every registered [`VitalRule`] against a
//! patient's recent measurements. Each positive [`Finding`] is turned into an
//! alert by the [`factory::AlertFactory`] and handed to an
//! [`dispatch::AlertDispatcher`]. Built-in rules cover blood pressure trends
//! and limits, heart rate limits, SpO2 level and rapid drop, ECG peaks and
//! combined hypotensive hypoxemia.

pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod factory;
pub mod rules;
pub mod window;


use chrono::{DateTime, Duration, Utc};
use vitalwatch_common::types::AlertKind;
use vitalwatch_storage::Patient;

/// A rule's positive result: which condition holds and a readable description.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub kind: AlertKind,
    pub detail: String,
}

impl Finding {
    pub fn new(kind: AlertKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

/// A clinical rule evaluated over a trailing window of one patient's records.
///
/// Implementations are registered in the [`engine::Evaluator`] and evaluated
/// in registration order. A rule reads the patient's records but never
/// modifies them, and reports at most one finding per call.
pub trait VitalRule: Send + Sync {
    /// Stable identifier for this rule (e.g., `"blood-pressure"`).
    fn name(&self) -> &str;

    /// The condition kind carried by this rule's findings.
    fn kind(&self) -> AlertKind;

    /// Length of the trailing window `[now - lookback, now]` the rule scans.
    fn lookback(&self) -> Duration;

    /// Evaluates the patient's recent records and returns a finding if the
    /// rule condition holds, or `None` otherwise.
    fn evaluate(&self, patient: &Patient, now: DateTime<Utc>) -> Option<Finding>;
}

/// Inclusive `[now - lookback, now]` bounds in epoch milliseconds.
pub(crate) fn window_bounds(lookback: Duration, now: DateTime<Utc>) -> (i64, i64) {
    let to = now.timestamp_millis();
    (to - lookback.num_milliseconds(), to)
}
