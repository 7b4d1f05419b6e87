pub mod blood_pressure;
pub mod ecg;
pub mod heart_rate;
pub mod hypotensive_hypoxemia;
pub mod spo2;

use vitalwatch_common::types::MeasurementRecord;

/// Sort oldest first. Records sharing a timestamp keep insertion order.
pub(crate) fn sort_by_time(records: &mut [MeasurementRecord]) {
    records.sort_by_key(|r| r.timestamp);
}

/// The record with the greatest timestamp; the last inserted wins a tie.
pub(crate) fn latest(records: &[MeasurementRecord]) -> Option<&MeasurementRecord> {
    records.iter().max_by_key(|r| r.timestamp)
}
