//! # SmartChip Core
//!
//! Domain types, diagnostics and error definitions for the SmartChip
//! quick-reply engine.  This crate has **no engine logic**: it defines the
//! request/response model that the config and engine crates work against.
//!
//! Every value here is created fresh per request and discarded once the
//! response is returned.

pub mod channel;
pub mod error;
pub mod issues;
pub mod presets;
pub mod request;
pub mod response;

// Re-export key types at crate root for ergonomics
pub use channel::{CHANNEL_LIMITS, Channel};
pub use error::{Error, Result};
pub use issues::{FieldPath, Issue, Issues};
pub use request::{
    AuthState, CartContext, ChipRequest, EngineConfig, Facet, FacetValue, IntegrationType,
    IntentContext, ModuleKey, ModuleToggles, Order, OrderContext, OrderStatus, PolicyContext,
    PolicyType, SearchStats, StoreConfig, Thresholds,
};
pub use response::{Chip, ChipResponse, ResponseOption, TraceEntry};
