use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use vitalwatch_common::types::{MeasurementRecord, VitalKind};

/// All measurements recorded for one patient, in insertion order.
pub struct Patient {
    id: i64,
    records: RwLock<Vec<MeasurementRecord>>,
}

impl Patient {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            records: RwLock::new(Vec::new()),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    /// Append a measurement. The record is stamped with this patient's id.
    pub fn add_record(&self, value: f64, kind: &str, timestamp: i64) {
        let record = MeasurementRecord::new(self.id, value, kind, timestamp);
        self.write().push(record);
    }

    /// Copy out every record with `timestamp` in `[from, to]`.
    ///
    /// The result is in insertion order, not timestamp order.
    pub fn records_between(&self, from: i64, to: i64) -> Vec<MeasurementRecord> {
        self.read()
            .iter()
            .filter(|r| r.timestamp >= from && r.timestamp <= to)
            .cloned()
            .collect()
    }

    /// Same as [`records_between`](Self::records_between), restricted to one vital family.
    pub fn records_of_kind_between(
        &self,
        kind: VitalKind,
        from: i64,
        to: i64,
    ) -> Vec<MeasurementRecord> {
        self.read()
            .iter()
            .filter(|r| r.is_kind(kind) && r.timestamp >= from && r.timestamp <= to)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Drop every record. Only used by reset lifecycles.
    pub fn clear(&self) {
        self.write().clear();
    }

    // Appends never leave a half-written record behind, so a poisoned lock
    // still guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, Vec<MeasurementRecord>> {
        self.records.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<MeasurementRecord>> {
        self.records.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for Patient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Patient")
            .field("id", &self.id)
            .field("records", &self.len())
            .finish()
    }
}
