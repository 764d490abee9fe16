//! Domain Port Interfaces
//!
//! Contracts the compiler consumes and outer layers implement:
//!
//! - **linguistic_database** - read-only category and feature metadata
//! - **report** - sink for user-visible info, warnings and errors

/// Read-only linguistic metadata
pub mod linguistic_database;
/// User-visible message sink
pub mod report;

pub use linguistic_database::{FeatureForm, LinguisticDatabase};
pub use report::{ReportSink, Severity};
