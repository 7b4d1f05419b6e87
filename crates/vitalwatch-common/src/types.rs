use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A single timestamped vital-sign measurement.
///
/// `kind` is kept as free text so that record families no rule watches
/// (e.g. `"Cholesterol"`) can still be stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub patient_id: i64,
    pub kind: String,
    pub value: f64,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

impl MeasurementRecord {
    pub fn new(patient_id: i64, value: f64, kind: impl Into<String>, timestamp: i64) -> Self {
        Self {
            patient_id,
            kind: kind.into(),
            value,
            timestamp,
        }
    }

    pub fn is_kind(&self, kind: VitalKind) -> bool {
        self.kind == kind.as_str()
    }
}

/// The vital-sign families the rule catalogue understands.
///
/// # Examples
///
/// ```
/// use vitalwatch_common::types::VitalKind;
///
/// let kind: VitalKind = "SpO2".parse().unwrap();
/// assert_eq!(kind, VitalKind::SpO2);
/// assert_eq!(VitalKind::Ecg.to_string(), "ECG");
/// assert!("Cholesterol".parse::<VitalKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VitalKind {
    BloodPressure,
    HeartRate,
    #[serde(rename = "SpO2")]
    SpO2,
    #[serde(rename = "ECG")]
    Ecg,
}

impl VitalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VitalKind::BloodPressure => "BloodPressure",
            VitalKind::HeartRate => "HeartRate",
            VitalKind::SpO2 => "SpO2",
            VitalKind::Ecg => "ECG",
        }
    }
}

impl std::fmt::Display for VitalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VitalKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BloodPressure" => Ok(VitalKind::BloodPressure),
            "HeartRate" => Ok(VitalKind::HeartRate),
            "SpO2" => Ok(VitalKind::SpO2),
            "ECG" => Ok(VitalKind::Ecg),
            _ => Err(format!("unknown vital kind: {s}")),
        }
    }
}

/// Condition kind carried by a rule finding and the alert built from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertKind {
    BloodPressure,
    HeartRate,
    #[serde(rename = "SpO2")]
    SpO2,
    #[serde(rename = "ECG")]
    Ecg,
    HypotensiveHypoxemia,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::BloodPressure => "BloodPressure",
            AlertKind::HeartRate => "HeartRate",
            AlertKind::SpO2 => "SpO2",
            AlertKind::Ecg => "ECG",
            AlertKind::HypotensiveHypoxemia => "HypotensiveHypoxemia",
        }
    }
}

impl From<VitalKind> for AlertKind {
    fn from(kind: VitalKind) -> Self {
        match kind {
            VitalKind::BloodPressure => AlertKind::BloodPressure,
            VitalKind::HeartRate => AlertKind::HeartRate,
            VitalKind::SpO2 => AlertKind::SpO2,
            VitalKind::Ecg => AlertKind::Ecg,
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AlertKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HypotensiveHypoxemia" => Ok(AlertKind::HypotensiveHypoxemia),
            other => other
                .parse::<VitalKind>()
                .map(AlertKind::from)
                .map_err(|_| format!("unknown alert kind: {s}")),
        }
    }
}

/// An alert raised for one positive rule finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub patient_id: String,
    pub kind: AlertKind,
    /// Human-readable detail, e.g. `"Heart rate critically high: 130.0 bpm"`.
    pub condition: String,
    /// Epoch milliseconds of the evaluation that produced the alert.
    pub timestamp: i64,
}

impl Alert {
    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    pub fn kind(&self) -> AlertKind {
        self.kind
    }

    pub fn condition(&self) -> &str {
        &self.condition
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

/// Alert priority, ordered from lowest to highest.
///
/// # Examples
///
/// ```
/// use vitalwatch_common::types::{AlertKind, Priority};
///
/// assert!(Priority::Critical > Priority::Low);
/// assert_eq!(Priority::for_kind(AlertKind::Ecg), Priority::Critical);
/// assert_eq!(Priority::High.as_i32(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_i32(&self) -> i32 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
            Priority::Critical => 4,
        }
    }

    /// Default priority assigned by the alert manager.
    pub fn for_kind(kind: AlertKind) -> Self {
        match kind {
            AlertKind::Ecg | AlertKind::HypotensiveHypoxemia => Priority::Critical,
            AlertKind::BloodPressure | AlertKind::SpO2 => Priority::High,
            AlertKind::HeartRate => Priority::Medium,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
            Priority::Critical => write!(f, "critical"),
        }
    }
}

impl TryFrom<i32> for Priority {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Priority::Low),
            2 => Ok(Priority::Medium),
            3 => Ok(Priority::High),
            4 => Ok(Priority::Critical),
            _ => Err(format!("priority out of range: {value}")),
        }
    }
}

/// An [`Alert`] tagged with a priority for downstream consumers.
///
/// The wrapped alert is kept intact; the accessors delegate to it.
///
/// # Examples
///
/// ```
/// use vitalwatch_common::types::{Alert, AlertKind, Priority, PriorityAlert};
///
/// let alert = Alert {
///     patient_id: "7".to_string(),
///     kind: AlertKind::HeartRate,
///     condition: "Heart rate critically low: 42.0 bpm".to_string(),
///     timestamp: 1_000,
/// };
/// let tagged = PriorityAlert::new(alert.clone(), Priority::High);
/// assert_eq!(tagged.patient_id(), "7");
/// assert_eq!(tagged.condition(), alert.condition());
/// assert_eq!(tagged.into_inner(), alert);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityAlert {
    alert: Alert,
    priority: Priority,
}

impl PriorityAlert {
    pub fn new(alert: Alert, priority: Priority) -> Self {
        Self { alert, priority }
    }

    pub fn patient_id(&self) -> &str {
        self.alert.patient_id()
    }

    pub fn kind(&self) -> AlertKind {
        self.alert.kind()
    }

    pub fn condition(&self) -> &str {
        self.alert.condition()
    }

    pub fn timestamp(&self) -> i64 {
        self.alert.timestamp()
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn alert(&self) -> &Alert {
        &self.alert
    }

    pub fn into_inner(self) -> Alert {
        self.alert
    }
}

/// Render epoch milliseconds as RFC 3339 for log output.
///
/// # Examples
///
/// ```
/// use vitalwatch_common::types::format_timestamp;
///
/// assert_eq!(format_timestamp(0), "1970-01-01T00:00:00.000Z");
/// ```
pub fn format_timestamp(millis: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(ts) => ts.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => format!("{millis}ms"),
    }
}
