//! The rule-module contract.
//!
//! A module looks at one request and proposes zero or more chips, always
//! explaining itself with exactly one [`TraceEntry`].  Modules hold no
//! state; each is a zero-sized value living in the registry.

use smartchip_core::{Chip, ChipRequest, ModuleKey, TraceEntry};

/// What one module produced for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleOutcome {
    pub chips: Vec<Chip>,
    pub trace: TraceEntry,
}

impl ModuleOutcome {
    pub fn fired(module: &str, chips: Vec<Chip>, reason: impl Into<String>) -> Self {
        Self {
            chips,
            trace: TraceEntry::fired(module, reason),
        }
    }

    pub fn skipped(module: &str, reason: impl Into<String>) -> Self {
        Self {
            chips: Vec::new(),
            trace: TraceEntry::skipped(module, reason),
        }
    }
}

/// A self-contained rule unit mapped to one configuration toggle.
pub trait ChipModule: Send + Sync {
    /// Stable identity used in trace entries (e.g. "BudgetModule").
    fn name(&self) -> &'static str;

    /// The toggle in `config.modules` that enables this module.
    fn config_key(&self) -> ModuleKey;

    /// Evaluate the module.  Inapplicability is a non-firing outcome, never an error.
    fn execute(&self, request: &ChipRequest) -> ModuleOutcome;
}
