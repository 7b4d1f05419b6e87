use crate::error::{AlertError, Result};
use std::collections::HashSet;
use vitalwatch_common::types::{Alert, AlertKind};

/// Builds [`Alert`] values for the condition kinds the evaluator has registered.
///
/// # Examples
///
/// ```
/// use vitalwatch_alert::factory::AlertFactory;
/// use vitalwatch_common::types::AlertKind;
///
/// let mut factory = AlertFactory::new();
/// factory.register(AlertKind::Ecg);
///
/// let alert = factory.create(AlertKind::Ecg, "99", "ecg peak", 91_011).unwrap();
/// assert_eq!(alert.patient_id, "99");
/// assert!(factory.create(AlertKind::SpO2, "99", "low o2", 1).is_err());
/// ```
#[derive(Debug, Default, Clone)]
pub struct AlertFactory {
    kinds: HashSet<AlertKind>,
}

impl AlertFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: AlertKind) {
        self.kinds.insert(kind);
    }

    pub fn supports(&self, kind: AlertKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn create(
        &self,
        kind: AlertKind,
        patient_id: &str,
        detail: &str,
        timestamp: i64,
    ) -> Result<Alert> {
        if !self.supports(kind) {
            return Err(AlertError::UnknownKind(kind.to_string()));
        }
        Ok(Alert {
            patient_id: patient_id.to_string(),
            kind,
            condition: detail.to_string(),
            timestamp,
        })
    }

    /// Like [`create`](Self::create), taking the kind by its wire name.
    pub fn create_named(
        &self,
        kind: &str,
        patient_id: &str,
        detail: &str,
        timestamp: i64,
    ) -> Result<Alert> {
        let kind: AlertKind = kind
            .parse()
            .map_err(|_| AlertError::UnknownKind(kind.to_string()))?;
        self.create(kind, patient_id, detail, timestamp)
    }
}
