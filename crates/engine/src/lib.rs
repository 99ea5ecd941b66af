//! The SmartChip engine.
//!
//! A request flows through a fixed pipeline:
//!
//! 1. **Hydrate** (optional): a `merchant_id` is resolved against the
//!    merchant store and merged with `config_overrides`
//! 2. **Validate** the request shape, collecting every violation
//! 3. **Dispatch** each registered module in registry order
//! 4. **Rank** the pooled chips by priority (stable)
//! 5. **Truncate** to the channel's chip limit
//!
//! Everything is synchronous and stateless; a single [`ChipEngine`] can
//! be shared across threads.

pub mod compute;
pub mod format;
pub mod hydrate;
pub mod module;
pub mod modules;
pub mod rank;
pub mod registry;
pub mod truncate;
pub mod validator;

pub use compute::{compute_chips, compute_request, parse_request};
pub use hydrate::{ChipEngine, hydrate_request_with_merchant_config};
pub use module::{ChipModule, ModuleOutcome};
pub use rank::rank_chips;
pub use registry::{MODULES, ModuleRegistry};
pub use truncate::{truncate_chips, truncate_for_channel};
pub use validator::validate_request;
