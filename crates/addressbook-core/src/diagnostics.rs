// ── Diagnostics hook ──
//
// Injected observability collaborator. The form controller and store
// report what they did (and what went wrong) through a `DiagnosticSink`
// instead of logging as a side effect of error handling.

use std::sync::{Mutex, PoisonError};

use strum::Display;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A single diagnostic record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticEvent {
    pub severity: Severity,
    /// The user action or lifecycle step that produced the event
    /// (e.g. `"lookup"`, `"select"`, `"hydrate"`).
    pub action: &'static str,
    pub message: String,
}

/// Receives diagnostics from the core.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, event: DiagnosticEvent);

    fn info(&self, action: &'static str, message: &str) {
        self.emit(DiagnosticEvent {
            severity: Severity::Info,
            action,
            message: message.to_owned(),
        });
    }

    fn warning(&self, action: &'static str, message: &str) {
        self.emit(DiagnosticEvent {
            severity: Severity::Warning,
            action,
            message: message.to_owned(),
        });
    }

    fn error(&self, action: &'static str, message: &str) {
        self.emit(DiagnosticEvent {
            severity: Severity::Error,
            action,
            message: message.to_owned(),
        });
    }
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, event: DiagnosticEvent) {
        match event.severity {
            Severity::Info => info!(action = event.action, "{}", event.message),
            Severity::Warning => warn!(action = event.action, "{}", event.message),
            Severity::Error => error!(action = event.action, "{}", event.message),
        }
    }
}

/// Records diagnostics in memory. Handy in tests and for front ends that
/// render a diagnostics panel.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Events recorded at the given severity.
    pub fn with_severity(&self, severity: Severity) -> Vec<DiagnosticEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.severity == severity)
            .collect()
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, event: DiagnosticEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
