/// Errors that can occur within the measurement store.
///
/// # Examples
///
/// ```rust
/// use vitalwatch_storage::error::StorageError;
///
/// let err = StorageError::PatientNotFound { id: 42 };
/// assert!(err.to_string().contains("42"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No measurement has ever been ingested for this patient.
    #[error("Storage: patient not found (id={id})")]
    PatientNotFound { id: i64 },
}

/// Convenience `Result` alias for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
