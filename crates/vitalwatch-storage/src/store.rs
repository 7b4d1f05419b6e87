use crate::error::{Result, StorageError};
use crate::patient::Patient;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use vitalwatch_common::types::MeasurementRecord;

#[derive(Default)]
struct PatientIndex {
    /// First-seen order.
    patients: Vec<Arc<Patient>>,
    by_id: HashMap<i64, usize>,
}

/// Per-patient measurement store shared by ingestion and evaluation.
///
/// # Examples
///
/// ```
/// use vitalwatch_storage::TimeSeriesStore;
///
/// let store = TimeSeriesStore::new();
/// store.ingest(1, 120.0, "BloodPressure", 1_000);
/// store.ingest(1, 80.0, "HeartRate", 2_000);
///
/// let patient = store.get_patient(1).unwrap();
/// assert_eq!(store.query_range(&patient, 0, 1_500).len(), 1);
/// ```
#[derive(Default)]
pub struct TimeSeriesStore {
    index: RwLock<PatientIndex>,
}

impl TimeSeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one measurement, creating the patient on first sight.
    ///
    /// The append happens while the index lock is held, so a concurrent
    /// [`clear`](Self::clear) either sees the record or runs before it.
    pub fn ingest(&self, patient_id: i64, value: f64, kind: &str, timestamp: i64) {
        {
            let index = self.read();
            if let Some(&i) = index.by_id.get(&patient_id) {
                index.patients[i].add_record(value, kind, timestamp);
                tracing::trace!(patient_id, kind, timestamp, value, "Measurement ingested");
                return;
            }
        }

        let mut index = self.write();
        // Another writer may have won the race between the two locks.
        let existing = index.by_id.get(&patient_id).copied();
        let slot = match existing {
            Some(i) => i,
            None => {
                let slot = index.patients.len();
                index.patients.push(Arc::new(Patient::new(patient_id)));
                index.by_id.insert(patient_id, slot);
                tracing::debug!(patient_id, "New patient registered");
                slot
            }
        };
        index.patients[slot].add_record(value, kind, timestamp);
        tracing::trace!(patient_id, kind, timestamp, value, "Measurement ingested");
    }

    pub fn get_patient(&self, patient_id: i64) -> Option<Arc<Patient>> {
        let index = self.read();
        index
            .by_id
            .get(&patient_id)
            .map(|&i| Arc::clone(&index.patients[i]))
    }

    /// Like [`get_patient`](Self::get_patient) but an unknown id is an error.
    pub fn require_patient(&self, patient_id: i64) -> Result<Arc<Patient>> {
        self.get_patient(patient_id)
            .ok_or(StorageError::PatientNotFound { id: patient_id })
    }

    /// Snapshot of every patient in first-seen order.
    ///
    /// The store lock is released before this returns.
    pub fn all_patients(&self) -> Vec<Arc<Patient>> {
        self.read().patients.clone()
    }

    /// Records of `patient` with `timestamp` in `[from, to]`, unsorted.
    pub fn query_range(&self, patient: &Patient, from: i64, to: i64) -> Vec<MeasurementRecord> {
        patient.records_between(from, to)
    }

    pub fn patient_count(&self) -> usize {
        self.read().patients.len()
    }

    pub fn record_count(&self) -> usize {
        self.read().patients.iter().map(|p| p.len()).sum()
    }

    /// Forget every patient and record.
    pub fn clear(&self) {
        let mut index = self.write();
        for patient in &index.patients {
            patient.clear();
        }
        index.patients.clear();
        index.by_id.clear();
        tracing::debug!("Measurement store cleared");
    }

    fn read(&self) -> RwLockReadGuard<'_, PatientIndex> {
        self.index.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, PatientIndex> {
        self.index.write().unwrap_or_else(|e| e.into_inner())
    }
}
