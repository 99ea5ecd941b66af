//! Error types for the SmartChip domain.
//!
//! Uses `thiserror` for ergonomic error definitions.  Every core entry point
//! returns these as values; none of them is fatal or worth retrying.

use crate::issues::Issues;
use thiserror::Error;

/// The top-level error type for chip computation.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or out-of-range request.  No module has run.
    #[error("{0}")]
    Validation(Issues),

    /// A `merchant_id` that the merchant store does not know.
    #[error("Unknown merchant_id: {0}")]
    UnknownMerchant(String),

    /// `config_overrides` failed the strict override schema.
    #[error("config_overrides invalid: {0}")]
    InvalidOverride(Issues),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;
