/// Errors that can occur within the alert engine.
///
/// # Examples
///
/// ```rust
/// use vitalwatch_alert::error::AlertError;
///
/// let err = AlertError::UnknownKind("Cholesterol".to_string());
/// assert!(err.to_string().contains("Cholesterol"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    /// A finding carried a condition kind no registered rule produces.
    #[error("Alert: no alert factory registered for kind '{0}'")]
    UnknownKind(String),

    /// The engine configuration file could not be read.
    #[error("Alert: failed to read config: {0}")]
    Config(#[from] std::io::Error),

    /// The engine configuration file is not valid TOML for [`crate::config::EngineConfig`].
    #[error("Alert: invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Convenience `Result` alias for alert engine operations.
pub type Result<T> = std::result::Result<T, AlertError>;
