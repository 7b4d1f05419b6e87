//! In-memory, append-only measurement store.
//!
//! Records are grouped per patient. Each [`Patient`] guards its own record
//! list so that range queries return a stable snapshot while ingestion
//! continues on other threads.

pub mod error;
pub mod patient;
pub mod store;

#[cfg(test)]
mod tests;

pub use patient::Patient;
pub use store::TimeSeriesStore;
