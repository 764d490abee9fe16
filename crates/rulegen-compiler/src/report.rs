//! Compile Report
//!
//! Collecting [`ReportSink`] that also mirrors every message to `tracing`.
//! Renders as JSON for tooling or as text for the terminal.

use rulegen_domain::{ReportSink, Severity};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// One recorded message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub severity: Severity,
    pub message: String,
}

/// Counts per severity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    /// Whether no error was recorded
    pub passed: bool,
}

/// Messages recorded during a compile session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompileReport {
    entries: Vec<ReportEntry>,
}

impl ReportSink for CompileReport {
    fn record(&mut self, severity: Severity, message: &str) {
        match severity {
            Severity::Error => error!("{message}"),
            Severity::Warning => warn!("{message}"),
            Severity::Info => info!("{message}"),
        }
        self.entries.push(ReportEntry {
            severity,
            message: message.to_string(),
        });
    }
}

impl CompileReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Messages of one severity, in recording order
    pub fn messages(&self, severity: Severity) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.severity == severity)
            .map(|e| e.message.as_str())
            .collect()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.messages(Severity::Error)
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.messages(Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    fn count(&self, severity: Severity) -> usize {
        self.entries.iter().filter(|e| e.severity == severity).count()
    }

    pub fn summary(&self) -> ReportSummary {
        let errors = self.count(Severity::Error);
        ReportSummary {
            errors,
            warnings: self.count(Severity::Warning),
            infos: self.count(Severity::Info),
            passed: errors == 0,
        }
    }

    /// Forget every recorded message
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// JSON rendering with entries and summary
    pub fn to_json(&self) -> String {
        let value = serde_json::json!({
            "summary": self.summary(),
            "entries": self.entries,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Text rendering for terminal output
    pub fn to_human_readable(&self) -> String {
        let summary = self.summary();
        let mut output = String::new();

        output.push_str("=== Rule Generation Report ===\n\n");
        for severity in [Severity::Error, Severity::Warning, Severity::Info] {
            for message in self.messages(severity) {
                output.push_str(&format!("[{severity}] {message}\n"));
            }
        }
        if !self.entries.is_empty() {
            output.push('\n');
        }

        output.push_str("--- Summary ---\n");
        output.push_str(&format!("  Errors:   {}\n", summary.errors));
        output.push_str(&format!("  Warnings: {}\n", summary.warnings));
        output.push_str(&format!("  Info:     {}\n", summary.infos));
        output.push('\n');
        if summary.passed {
            output.push_str("Result: PASSED\n");
        } else {
            output.push_str("Result: FAILED\n");
        }
        output
    }
}
