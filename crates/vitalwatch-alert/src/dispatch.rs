use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use vitalwatch_common::types::{format_timestamp, Alert, Priority, PriorityAlert};

/// Destination for alerts leaving the evaluation engine.
///
/// Any `Fn(Alert) -> anyhow::Result<()>` closure is a dispatcher. Delivery
/// failures should come back as `Err`; the evaluator logs them and carries on
/// with the remaining rules. A panic is caught and counted the same way, but
/// it still runs the panic hook and poisons any lock the dispatcher held.
pub trait AlertDispatcher: Send + Sync {
    fn dispatch(&self, alert: Alert) -> anyhow::Result<()>;
}

impl<F> AlertDispatcher for F
where
    F: Fn(Alert) -> anyhow::Result<()> + Send + Sync,
{
    fn dispatch(&self, alert: Alert) -> anyhow::Result<()> {
        self(alert)
    }
}

/// Writes each alert as a structured `warn` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDispatcher;

impl AlertDispatcher for TracingDispatcher {
    fn dispatch(&self, alert: Alert) -> anyhow::Result<()> {
        tracing::warn!(
            patient_id = %alert.patient_id,
            kind = %alert.kind,
            timestamp = %format_timestamp(alert.timestamp),
            condition = %alert.condition,
            "ALERT"
        );
        Ok(())
    }
}

/// Keeps a priority-tagged history of alerts and optionally forwards each
/// one downstream.
///
/// No deduplication is performed: equal alerts are all recorded. The history
/// is unbounded unless [`with_history_limit`](Self::with_history_limit) is
/// set, in which case the oldest entries are dropped first.
pub struct AlertManager {
    history: Mutex<VecDeque<PriorityAlert>>,
    history_limit: Option<usize>,
    downstream: Option<Box<dyn AlertDispatcher>>,
}

impl AlertManager {
    pub fn new() -> Self {
        Self {
            history: Mutex::new(VecDeque::new()),
            history_limit: None,
            downstream: None,
        }
    }

    pub fn with_downstream(downstream: Box<dyn AlertDispatcher>) -> Self {
        Self {
            downstream: Some(downstream),
            ..Self::new()
        }
    }

    /// Keep at most `limit` alerts in the history.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    pub fn history(&self) -> Vec<PriorityAlert> {
        self.lock().iter().cloned().collect()
    }

    pub fn history_for(&self, patient_id: &str) -> Vec<PriorityAlert> {
        self.lock()
            .iter()
            .filter(|a| a.patient_id() == patient_id)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<PriorityAlert>> {
        self.history.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for AlertManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertDispatcher for AlertManager {
    fn dispatch(&self, alert: Alert) -> anyhow::Result<()> {
        let priority = Priority::for_kind(alert.kind);
        {
            let mut history = self.lock();
            if let Some(limit) = self.history_limit {
                while history.len() >= limit.max(1) {
                    history.pop_front();
                }
            }
            history.push_back(PriorityAlert::new(alert.clone(), priority));
        }

        // History lock is released before calling out.
        match &self.downstream {
            Some(downstream) => downstream.dispatch(alert),
            None => Ok(()),
        }
    }
}
