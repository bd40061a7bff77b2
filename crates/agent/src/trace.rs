//! Reasoning trace types.
//!
//! Each loop iteration records what the model thought, which tool it
//! called, and what came back. The trace powers verbose mode and makes a
//! completed turn inspectable in tests.

use serde::{Deserialize, Serialize};

/// The kind of a single trace entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    /// The model's reasoning text for an iteration
    Thought,
    /// A tool invocation, rendered as `name(arguments)`
    Action,
    /// The tool's output (or its error text)
    Observation,
}

/// One step in the reasoning trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceStep {
    pub kind: TraceKind,
    pub content: String,
}

impl TraceStep {
    pub fn thought(content: impl Into<String>) -> Self {
        Self {
            kind: TraceKind::Thought,
            content: content.into(),
        }
    }

    pub fn action(content: impl Into<String>) -> Self {
        Self {
            kind: TraceKind::Action,
            content: content.into(),
        }
    }

    pub fn observation(content: impl Into<String>) -> Self {
        Self {
            kind: TraceKind::Observation,
            content: content.into(),
        }
    }
}

impl std::fmt::Display for TraceStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self.kind {
            TraceKind::Thought => "Thought",
            TraceKind::Action => "Action",
            TraceKind::Observation => "Observation",
        };
        write!(f, "{label}: {}", self.content)
    }
}

/// The result of one completed turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnReport {
    /// The final answer text
    pub answer: String,

    /// Complete reasoning trace for the turn
    pub trace: Vec<TraceStep>,

    /// Number of reasoning iterations used
    pub iterations: usize,

    /// Total tool calls made
    pub tool_calls_made: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_step_display() {
        let step = TraceStep::action("calculator({\"expression\":\"2+2\"})");
        let rendered = step.to_string();
        assert!(rendered.starts_with("Action: "));
        assert!(rendered.contains("calculator"));
    }

    #[test]
    fn trace_kind_serializes_lowercase() {
        let json = serde_json::to_string(&TraceKind::Observation).unwrap();
        assert_eq!(json, "\"observation\"");
    }
}
