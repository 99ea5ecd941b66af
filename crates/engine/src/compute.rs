//! The compute pipeline: validate → dispatch → rank → truncate.

use crate::rank::rank_chips;
use crate::registry::ModuleRegistry;
use crate::truncate::truncate_for_channel;
use crate::validator::validate_request;
use serde_json::Value;
use smartchip_core::{ChipRequest, ChipResponse, Error, TraceEntry};
use tracing::{debug, info, warn};

const DISABLED_REASON: &str = "Module disabled by config";

/// Compute chips for an arbitrary JSON input.
///
/// Never fails: invalid input yields an error response with no chips and
/// an empty trace.
pub fn compute_chips(input: &Value) -> ChipResponse {
    match parse_request(input) {
        Ok(request) => compute_request(&request),
        Err(e) => {
            warn!(error = %e, "Rejected compute request");
            ChipResponse::from(e)
        }
    }
}

/// Validate `input` and convert it into a typed request.
pub fn parse_request(input: &Value) -> Result<ChipRequest, Error> {
    validate_request(input).map_err(Error::Validation)?;
    Ok(serde_json::from_value(input.clone())?)
}

/// Run every registered module against an already-typed request.
///
/// Disabled modules still get a trace entry, so the trace always has one
/// entry per registered module.
pub fn compute_request(request: &ChipRequest) -> ChipResponse {
    let registry = ModuleRegistry::standard();
    let mut pool = Vec::new();
    let mut trace = Vec::with_capacity(registry.len());

    for module in registry.modules() {
        if !request.config.modules.is_enabled(module.config_key()) {
            trace.push(TraceEntry::skipped(module.name(), DISABLED_REASON));
            continue;
        }
        let outcome = module.execute(request);
        debug!(
            module = module.name(),
            fired = outcome.trace.fired,
            chips = outcome.chips.len(),
            "Module executed"
        );
        pool.extend(outcome.chips);
        trace.push(outcome.trace);
    }

    let pooled = pool.len();
    let chips = truncate_for_channel(rank_chips(pool), request.channel);
    info!(
        channel = %request.channel,
        pooled,
        returned = chips.len(),
        fired = trace.iter().filter(|t| t.fired).count(),
        "Computed chips"
    );
    ChipResponse::success(chips, trace)
}
