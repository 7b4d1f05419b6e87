use crate::error::StorageError;
use crate::{Patient, TimeSeriesStore};
use std::sync::Arc;
use std::thread;
use vitalwatch_common::types::VitalKind;

const BASE: i64 = 1_000;

#[test]
fn ingest_creates_patient_on_first_sight() {
    let store = TimeSeriesStore::new();
    assert!(store.all_patients().is_empty());

    store.ingest(1, 120.0, "BloodPressure", BASE);
    let patients = store.all_patients();
    assert_eq!(patients.len(), 1);
    assert_eq!(patients[0].id(), 1);
}

#[test]
fn all_patients_keeps_first_seen_order() {
    let store = TimeSeriesStore::new();
    store.ingest(9, 80.0, "HeartRate", BASE);
    store.ingest(3, 80.0, "HeartRate", BASE);
    store.ingest(9, 82.0, "HeartRate", BASE + 1);
    store.ingest(5, 80.0, "HeartRate", BASE);

    let ids: Vec<i64> = store.all_patients().iter().map(|p| p.id()).collect();
    assert_eq!(ids, vec![9, 3, 5]);
    assert_eq!(store.record_count(), 4);
}

#[test]
fn every_record_carries_its_patient_id() {
    let store = TimeSeriesStore::new();
    store.ingest(4, 97.0, "SpO2", BASE);
    store.ingest(4, 96.0, "SpO2", BASE + 10);
    store.ingest(8, 96.0, "SpO2", BASE + 10);

    let patient = store.get_patient(4).unwrap();
    let records = store.query_range(&patient, i64::MIN, i64::MAX);
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.patient_id == 4));
}

#[test]
fn query_range_is_inclusive_on_both_ends() {
    let patient = Patient::new(42);
    patient.add_record(60.0, "HeartRate", BASE);
    patient.add_record(65.0, "HeartRate", BASE + 10_000);
    patient.add_record(70.0, "HeartRate", BASE + 20_000);

    let inner = patient.records_between(BASE + 5_000, BASE + 15_000);
    assert_eq!(inner.len(), 1);
    assert_eq!(inner[0].value, 65.0);

    let edges = patient.records_between(BASE, BASE + 20_000);
    assert_eq!(edges.len(), 3);

    assert!(patient.records_between(BASE + 100_000, BASE + 200_000).is_empty());
}

#[test]
fn query_range_ignores_insertion_order() {
    let store = TimeSeriesStore::new();
    for ts in [50, 10, 40, 20, 30] {
        store.ingest(1, ts as f64, "ECG", ts);
    }
    let patient = store.get_patient(1).unwrap();

    let mut got: Vec<i64> = store
        .query_range(&patient, 20, 40)
        .iter()
        .map(|r| r.timestamp)
        .collect();
    got.sort_unstable();
    assert_eq!(got, vec![20, 30, 40]);
}

#[test]
fn records_of_kind_filters_family() {
    let patient = Patient::new(1);
    patient.add_record(120.0, "BloodPressure", BASE);
    patient.add_record(95.0, "SpO2", BASE);
    patient.add_record(5.2, "Cholesterol", BASE);

    let bp = patient.records_of_kind_between(VitalKind::BloodPressure, 0, BASE);
    assert_eq!(bp.len(), 1);
    assert_eq!(bp[0].value, 120.0);
    assert!(patient
        .records_of_kind_between(VitalKind::Ecg, 0, BASE)
        .is_empty());
}

#[test]
fn require_patient_reports_unknown_id() {
    let store = TimeSeriesStore::new();
    store.ingest(1, 70.0, "HeartRate", BASE);

    assert!(store.require_patient(1).is_ok());
    match store.require_patient(2) {
        Err(StorageError::PatientNotFound { id }) => assert_eq!(id, 2),
        other => panic!("expected PatientNotFound, got {other:?}"),
    }
}

#[test]
fn clear_resets_store() {
    let store = TimeSeriesStore::new();
    store.ingest(1, 70.0, "HeartRate", BASE);
    store.ingest(2, 70.0, "HeartRate", BASE);
    let held = store.get_patient(1).unwrap();

    store.clear();
    assert_eq!(store.patient_count(), 0);
    assert_eq!(store.record_count(), 0);
    assert!(held.is_empty());
    assert!(store.get_patient(1).is_none());
}

#[test]
fn snapshot_is_stable_under_concurrent_ingest() {
    let store = Arc::new(TimeSeriesStore::new());
    store.ingest(1, 0.0, "HeartRate", 0);
    let patient = store.get_patient(1).unwrap();

    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for ts in 1..2_000 {
                store.ingest(1, ts as f64, "HeartRate", ts);
            }
        })
    };

    for _ in 0..50 {
        let snapshot = store.query_range(&patient, 0, i64::MAX);
        // Appends land in timestamp order here, so a consistent snapshot is a prefix.
        for (i, rec) in snapshot.iter().enumerate() {
            assert_eq!(rec.timestamp, i as i64);
            assert_eq!(rec.value, i as f64);
        }
    }

    writer.join().unwrap();
    assert_eq!(patient.len(), 2_000);
}

#[test]
fn concurrent_first_ingest_creates_one_patient() {
    let store = Arc::new(TimeSeriesStore::new());
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..100 {
                    store.ingest(7, 1.0, "SpO2", t * 100 + i);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(store.patient_count(), 1);
    assert_eq!(store.record_count(), 800);
}

#[test]
fn clear_never_orphans_a_concurrent_append() {
    let store = Arc::new(TimeSeriesStore::new());
    store.ingest(1, 0.0, "HeartRate", 0);

    let writers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for ts in 1..500 {
                    store.ingest(1, 70.0, "HeartRate", ts);
                }
            })
        })
        .collect();

    let mut dropped = Vec::new();
    for _ in 0..200 {
        if let Some(patient) = store.get_patient(1) {
            dropped.push(patient);
        }
        store.clear();
    }

    for w in writers {
        w.join().unwrap();
    }

    // Every patient removed by clear() must stay empty: a late append into a
    // removed patient would be lost.
    for patient in &dropped {
        assert!(patient.is_empty(), "record appended after clear");
    }
}
