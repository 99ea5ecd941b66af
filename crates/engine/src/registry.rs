//! Module registry: the fixed, ordered set of rule modules.
//!
//! Registry order is the order of the response trace.  It is not
//! configurable; config can only switch modules off.

use crate::module::ChipModule;
use crate::modules::{BudgetModule, CartModule, FacetModule, OrderModule, PolicyModule, SortModule};

/// Every module, in dispatch order.
pub static MODULES: [&dyn ChipModule; 6] = [
    &BudgetModule,
    &FacetModule,
    &SortModule,
    &OrderModule,
    &CartModule,
    &PolicyModule,
];

/// Read-only view over [`MODULES`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ModuleRegistry;

impl ModuleRegistry {
    /// The built-in registry.
    pub fn standard() -> Self {
        Self
    }

    /// Modules in dispatch order.
    pub fn modules(&self) -> &'static [&'static dyn ChipModule] {
        &MODULES
    }

    /// Number of registered modules.
    pub fn len(&self) -> usize {
        MODULES.len()
    }

    pub fn is_empty(&self) -> bool {
        MODULES.is_empty()
    }

    /// Module names in dispatch order.
    pub fn names(&self) -> Vec<&'static str> {
        MODULES.iter().map(|m| m.name()).collect()
    }

    /// Look up a module by its trace name.
    pub fn get(&self, name: &str) -> Option<&'static dyn ChipModule> {
        MODULES.iter().copied().find(|m| m.name() == name)
    }
}
