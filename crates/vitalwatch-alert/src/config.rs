use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Engine configuration, usually read from a TOML file.
///
/// ```toml
/// [rules]
/// ecg = true
/// hypotensive_hypoxemia = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub rules: RulesConfig,
}

/// Which built-in rules are registered. Every rule is on unless disabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default = "default_enabled")]
    pub blood_pressure: bool,
    #[serde(default = "default_enabled")]
    pub heart_rate: bool,
    #[serde(default = "default_enabled")]
    pub spo2: bool,
    #[serde(default = "default_enabled")]
    pub ecg: bool,
    #[serde(default = "default_enabled")]
    pub hypotensive_hypoxemia: bool,
}

fn default_enabled() -> bool {
    true
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            blood_pressure: true,
            heart_rate: true,
            spo2: true,
            ecg: true,
            hypotensive_hypoxemia: true,
        }
    }
}

impl EngineConfig {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }
}
