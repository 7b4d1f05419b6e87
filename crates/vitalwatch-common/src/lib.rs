//! Shared data model for the vital-sign alerting workspace.

pub mod types;
