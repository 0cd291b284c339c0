//! Low-level diagnostic channel for failed operations
//!
//! Distinct from the user-facing message log: receives the full error chain
//! with a correlation id so a failure line can be traced back to its cause.

use serde_json::{Value, json};
use std::sync::{Mutex, PoisonError};

/// Full detail about one failed operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureReport {
    /// Unique correlation ID for this failure
    pub correlation_id: String,
    pub service: String,
    pub operation: String,
    /// Top-level error message
    pub message: String,
    /// Underlying causes, outermost first (excluding `message`)
    pub chain: Vec<String>,
}

impl FailureReport {
    pub fn new(service: &str, operation: &str, error: &anyhow::Error) -> Self {
        Self {
            correlation_id: uuid::Uuid::new_v4().to_string(),
            service: service.to_string(),
            operation: operation.to_string(),
            message: error.to_string(),
            chain: error.chain().skip(1).map(ToString::to_string).collect(),
        }
    }

    /// Structured form written to the log backend
    pub fn to_json(&self) -> Value {
        json!({
            "event": "operation_failed",
            "correlation_id": self.correlation_id,
            "service": self.service,
            "operation": self.operation,
            "error": self.message,
            "chain": self.chain,
            "timestamp": chrono::Utc::now().to_rfc3339()
        })
    }
}

/// Receiver of failure diagnostics
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, report: &FailureReport);
}

/// Writes each failure as one `log::error!` record
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl DiagnosticSink for LogDiagnostics {
    fn report(&self, report: &FailureReport) {
        log::error!("API Operation Failed: {}", report.to_json());
    }
}

/// Keeps reports in memory, for surfacing failures elsewhere or in tests
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    reports: Mutex<Vec<FailureReport>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<FailureReport> {
        self.reports.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn len(&self) -> usize {
        self.reports.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for RecordingDiagnostics {
    fn report(&self, report: &FailureReport) {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, anyhow};

    #[test]
    fn test_report_captures_chain() {
        let error = Err::<(), _>(anyhow!("connection refused"))
            .context("GET api/heroes")
            .unwrap_err();
        let report = FailureReport::new("HeroService", "getHeroes()", &error);

        assert_eq!(report.message, "GET api/heroes");
        assert_eq!(report.chain, vec!["connection refused"]);
        assert!(!report.correlation_id.is_empty());

        let json = report.to_json();
        assert_eq!(json["event"], "operation_failed");
        assert_eq!(json["operation"], "getHeroes()");
    }

    #[test]
    fn test_recording_sink_keeps_reports() {
        let sink = RecordingDiagnostics::new();
        assert!(sink.is_empty());

        let error = anyhow!("500 Internal Server Error");
        let report = FailureReport::new("HeroService", "addHero()", &error);
        sink.report(&report);

        assert_eq!(sink.len(), 1);
        assert_eq!(sink.reports()[0].operation, "addHero()");
    }
}
