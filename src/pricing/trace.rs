//! Decision trail returned with every pricing result.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceLevel {
    Info,
    Warn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceEntry {
    pub step: &'static str,
    pub level: TraceLevel,
    pub detail: String,
}

/// Ordered list of the branches taken while pricing one request.
/// Every entry is also emitted through `tracing`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DecisionTrace(Vec<TraceEntry>);

impl DecisionTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, step: &'static str, detail: impl Into<String>) {
        let detail = detail.into();
        tracing::debug!(step, "{}", detail);
        self.0.push(TraceEntry {
            step,
            level: TraceLevel::Info,
            detail,
        });
    }

    pub fn warn(&mut self, step: &'static str, detail: impl Into<String>) {
        let detail = detail.into();
        tracing::warn!(step, "{}", detail);
        self.0.push(TraceEntry {
            step,
            level: TraceLevel::Warn,
            detail,
        });
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.0
    }

    /// First entry recorded for a step.
    pub fn find(&self, step: &str) -> Option<&TraceEntry> {
        self.0.iter().find(|e| e.step == step)
    }

    pub fn has_warnings(&self) -> bool {
        self.0.iter().any(|e| e.level == TraceLevel::Warn)
    }
}
