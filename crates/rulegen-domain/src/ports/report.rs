//! Report Sink Port
//!
//! The compiler never raises for a recoverable problem in one rule. It
//! records the problem here and moves on to the next rule.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level of a reported message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "ERROR"),
            Self::Warning => write!(f, "WARNING"),
            Self::Info => write!(f, "INFO"),
        }
    }
}

/// Receiver of user-visible messages
pub trait ReportSink {
    /// Record one message
    fn record(&mut self, severity: Severity, message: &str);

    fn info(&mut self, message: &str) {
        self.record(Severity::Info, message);
    }

    fn warning(&mut self, message: &str) {
        self.record(Severity::Warning, message);
    }

    fn error(&mut self, message: &str) {
        self.record(Severity::Error, message);
    }
}
