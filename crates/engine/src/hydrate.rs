//! Merchant hydration: turn `{merchant_id, config_overrides, ...}` into a
//! full compute request before it reaches the validator.

use crate::compute::compute_chips;
use serde_json::{Map, Value};
use smartchip_config::{MerchantStore, apply_engine_config_override, resolve_merchant_config};
use smartchip_core::{ChipResponse, Error};
use std::sync::Arc;
use tracing::{debug, warn};

/// Request keys copied verbatim into a hydrated request when present.
const PASSTHROUGH_KEYS: [&str; 3] = ["channel", "stats", "context"];

/// Fill in `config` from the merchant store.
///
/// Inputs that are not objects, that already carry a non-null `config`, or
/// that have no usable `merchant_id` are returned unchanged for the
/// validator to judge.
pub fn hydrate_request_with_merchant_config(
    input: Value,
    store: &dyn MerchantStore,
) -> Result<Value, Error> {
    let Value::Object(doc) = &input else {
        return Ok(input);
    };
    if doc.get("config").is_some_and(|c| !c.is_null()) {
        return Ok(input);
    }
    let Some(merchant_id) = doc
        .get("merchant_id")
        .and_then(Value::as_str)
        .filter(|id| !id.trim().is_empty())
    else {
        return Ok(input);
    };

    let Some(merchant) = resolve_merchant_config(store, merchant_id) else {
        warn!(merchant_id, "Unknown merchant");
        return Err(Error::UnknownMerchant(merchant_id.to_string()));
    };

    let base = merchant.to_engine_config();
    let config = apply_engine_config_override(&base, doc.get("config_overrides"))?;

    let mut request = Map::new();
    let intent = doc.get("intent").and_then(Value::as_str).unwrap_or_default();
    request.insert("intent".into(), Value::String(intent.to_string()));
    for key in PASSTHROUGH_KEYS {
        if let Some(value) = doc.get(key) {
            request.insert(key.into(), value.clone());
        }
    }
    request.insert("config".into(), serde_json::to_value(config)?);

    debug!(merchant_id, "Hydrated request from merchant config");
    Ok(Value::Object(request))
}

/// Hydration plus computation over a shared merchant store.
///
/// This is the whole entry point a transport layer needs: every outcome,
/// including hydration failures, is a [`ChipResponse`].
#[derive(Clone)]
pub struct ChipEngine {
    store: Arc<dyn MerchantStore>,
}

impl ChipEngine {
    pub fn new(store: Arc<dyn MerchantStore>) -> Self {
        Self { store }
    }

    pub fn compute(&self, input: Value) -> ChipResponse {
        match hydrate_request_with_merchant_config(input, self.store.as_ref()) {
            Ok(request) => compute_chips(&request),
            Err(e) => ChipResponse::from(e),
        }
    }
}
