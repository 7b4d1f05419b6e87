use crate::config::EngineConfig;
use crate::dispatch::AlertDispatcher;
use crate::factory::AlertFactory;
use crate::rules::blood_pressure::BloodPressureRule;
use crate::rules::ecg::EcgRule;
use crate::rules::heart_rate::HeartRateRule;
use crate::rules::hypotensive_hypoxemia::HypotensiveHypoxemiaRule;
use crate::rules::spo2::SpO2Rule;
use crate::VitalRule;
use chrono::{DateTime, Utc};
use std::ops::AddAssign;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use vitalwatch_common::types::Alert;
use vitalwatch_storage::{Patient, TimeSeriesStore};

/// Counters for one or more evaluation passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluationReport {
    pub rules_evaluated: usize,
    pub alerts_dispatched: usize,
    pub dispatch_failures: usize,
}

impl AddAssign for EvaluationReport {
    fn add_assign(&mut self, rhs: Self) {
        self.rules_evaluated += rhs.rules_evaluated;
        self.alerts_dispatched += rhs.alerts_dispatched;
        self.dispatch_failures += rhs.dispatch_failures;
    }
}

pub struct Evaluator {
    rules: Vec<Box<dyn VitalRule>>,
    factory: AlertFactory,
    dispatcher: Arc<dyn AlertDispatcher>,
}

impl Evaluator {
    pub fn new(rules: Vec<Box<dyn VitalRule>>, dispatcher: Arc<dyn AlertDispatcher>) -> Self {
        let mut factory = AlertFactory::new();
        for rule in &rules {
            factory.register(rule.kind());
        }
        Self {
            rules,
            factory,
            dispatcher,
        }
    }

    /// Every built-in rule, in the order blood pressure, heart rate, SpO2,
    /// ECG, hypotensive hypoxemia.
    pub fn with_default_rules(dispatcher: Arc<dyn AlertDispatcher>) -> Self {
        Self::from_config(&EngineConfig::default(), dispatcher)
    }

    pub fn from_config(config: &EngineConfig, dispatcher: Arc<dyn AlertDispatcher>) -> Self {
        let enabled = &config.rules;
        let mut rules: Vec<Box<dyn VitalRule>> = Vec::new();
        if enabled.blood_pressure {
            rules.push(Box::new(BloodPressureRule::default()));
        }
        if enabled.heart_rate {
            rules.push(Box::new(HeartRateRule::default()));
        }
        if enabled.spo2 {
            rules.push(Box::new(SpO2Rule::default()));
        }
        if enabled.ecg {
            rules.push(Box::new(EcgRule::default()));
        }
        if enabled.hypotensive_hypoxemia {
            rules.push(Box::new(HypotensiveHypoxemiaRule::default()));
        }
        Self::new(rules, dispatcher)
    }

    pub fn rules(&self) -> &[Box<dyn VitalRule>] {
        &self.rules
    }

    /// Get a rule by its name.
    pub fn rule(&self, name: &str) -> Option<&dyn VitalRule> {
        self.rules.iter().find(|r| r.name() == name).map(|r| r.as_ref())
    }

    /// Register a rule after the existing ones.
    pub fn add_rule(&mut self, rule: Box<dyn VitalRule>) {
        self.factory.register(rule.kind());
        self.rules.push(rule);
    }

    pub fn evaluate_data(&self, patient: &Patient) -> EvaluationReport {
        self.evaluate_data_at(patient, Utc::now())
    }

    /// Run every rule against `patient` as of `now` and dispatch one alert
    /// per finding.
    ///
    /// # Panics
    ///
    /// Panics if a rule reports a kind that was never registered with the
    /// alert factory.
    pub fn evaluate_data_at(&self, patient: &Patient, now: DateTime<Utc>) -> EvaluationReport {
        let patient_id = patient.id().to_string();
        let timestamp = now.timestamp_millis();
        let mut report = EvaluationReport::default();

        for rule in &self.rules {
            report.rules_evaluated += 1;

            let Some(finding) = rule.evaluate(patient, now) else {
                continue;
            };

            tracing::debug!(
                rule = rule.name(),
                patient_id = %patient_id,
                kind = %finding.kind,
                detail = %finding.detail,
                "Rule condition met"
            );

            let alert = match self
                .factory
                .create(finding.kind, &patient_id, &finding.detail, timestamp)
            {
                Ok(alert) => alert,
                Err(e) => {
                    tracing::error!(rule = rule.name(), error = %e, "Alert registry mismatch");
                    panic!("rule '{}' produced an unregistered finding: {e}", rule.name());
                }
            };

            match self.dispatch(alert) {
                Ok(()) => report.alerts_dispatched += 1,
                Err(e) => {
                    report.dispatch_failures += 1;
                    tracing::error!(
                        rule = rule.name(),
                        patient_id = %patient_id,
                        kind = %finding.kind,
                        error = %e,
                        "Failed to dispatch alert"
                    );
                }
            }
        }

        report
    }

    /// Hand one alert to the dispatcher. A panicking dispatcher is reported
    /// as a failed dispatch instead of unwinding through the evaluation loop.
    fn dispatch(&self, alert: Alert) -> anyhow::Result<()> {
        let dispatcher = &self.dispatcher;
        match panic::catch_unwind(AssertUnwindSafe(|| dispatcher.dispatch(alert))) {
            Ok(result) => result,
            Err(payload) => {
                let reason = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                Err(anyhow::anyhow!("dispatcher panicked: {reason}"))
            }
        }
    }

    pub fn evaluate_all(&self, store: &TimeSeriesStore) -> EvaluationReport {
        self.evaluate_all_at(store, Utc::now())
    }

    /// Evaluate every patient in first-seen order.
    pub fn evaluate_all_at(&self, store: &TimeSeriesStore, now: DateTime<Utc>) -> EvaluationReport {
        let mut total = EvaluationReport::default();
        // all_patients() hands back owned handles, so no store lock is held
        // while rules run or alerts are dispatched.
        for patient in store.all_patients() {
            total += self.evaluate_data_at(&patient, now);
        }
        tracing::debug!(
            alerts = total.alerts_dispatched,
            failures = total.dispatch_failures,
            "Evaluation pass complete"
        );
        total
    }
}
