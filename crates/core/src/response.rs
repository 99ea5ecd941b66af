//! Engine output: ranked chips plus one trace entry per registered module.

use serde::{Deserialize, Serialize};

/// A single quick-reply suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chip {
    pub label: String,
    /// Opaque action identifier interpreted by the client.
    pub action: String,
    /// Higher sorts first.
    pub priority: i32,
}

impl Chip {
    pub fn new(label: impl Into<String>, action: impl Into<String>, priority: i32) -> Self {
        Self {
            label: label.into(),
            action: action.into(),
            priority,
        }
    }
}

/// Per-module audit record: did it fire, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub module: String,
    pub fired: bool,
    pub reason: String,
}

impl TraceEntry {
    pub fn fired(module: &str, reason: impl Into<String>) -> Self {
        Self {
            module: module.to_string(),
            fired: true,
            reason: reason.into(),
        }
    }

    pub fn skipped(module: &str, reason: impl Into<String>) -> Self {
        Self {
            module: module.to_string(),
            fired: false,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseOption {
    Success,
    Error,
}

/// The result of one compute call.  Errors are carried as data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChipResponse {
    pub option: ResponseOption,
    pub chips: Vec<Chip>,
    pub trace: Vec<TraceEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChipResponse {
    pub fn success(chips: Vec<Chip>, trace: Vec<TraceEntry>) -> Self {
        Self {
            option: ResponseOption::Success,
            chips,
            trace,
            error: None,
        }
    }

    /// An error response: no chips and an empty trace.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            option: ResponseOption::Error,
            chips: Vec::new(),
            trace: Vec::new(),
            error: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.option == ResponseOption::Success
    }
}

impl From<crate::Error> for ChipResponse {
    fn from(err: crate::Error) -> Self {
        Self::error(err.to_string())
    }
}
