use std::sync::Mutex;

/// Sink for non-fatal diagnostics raised while rendering.
///
/// Components take a sink instead of logging globally so that tests can
/// observe what was reported.
pub trait Diagnostics: Send + Sync {
    fn warn(&self, component: &str, message: &str);
    fn debug(&self, component: &str, message: &str);
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, component: &str, message: &str) {
        tracing::warn!(component, "{message}");
    }

    fn debug(&self, component: &str, message: &str) {
        tracing::debug!(component, "{message}");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Warn,
    Debug,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub component: String,
    pub message: String,
}

/// Keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    records: Mutex<Vec<Diagnostic>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Diagnostic> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn warnings(&self) -> Vec<Diagnostic> {
        self.records()
            .into_iter()
            .filter(|record| record.level == DiagnosticLevel::Warn)
            .collect()
    }

    fn push(&self, level: DiagnosticLevel, component: &str, message: &str) {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(Diagnostic {
                level,
                component: component.to_string(),
                message: message.to_string(),
            });
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn warn(&self, component: &str, message: &str) {
        self.push(DiagnosticLevel::Warn, component, message);
    }

    fn debug(&self, component: &str, message: &str) {
        self.push(DiagnosticLevel::Debug, component, message);
    }
}
