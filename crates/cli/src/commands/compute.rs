//! `smartchip compute`: Run the pipeline and print the response.

use super::{CmdResult, load_settings, read_input};
use smartchip_engine::ChipEngine;
use std::sync::Arc;
use tracing::debug;

pub fn run(input: Option<String>, preset: Option<String>, pretty: bool) -> CmdResult {
    let settings = load_settings()?;
    let request = match preset {
        Some(name) => super::presets::preset_request(&name, settings.default_channel)?,
        None => read_input(input.as_deref())?,
    };

    let engine = ChipEngine::new(Arc::new(settings.merchant_store()?));
    let response = engine.compute(request);
    debug!(
        success = response.is_success(),
        chips = response.chips.len(),
        "Compute finished"
    );

    // An error response is still a response: exit 0 either way.
    let out = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{out}");
    Ok(())
}
