//! `smartchip presets`: Built-in scenarios.

use super::CmdResult;
use serde_json::Value;
use smartchip_core::presets::{self, REQUEST_PRESETS, STATS_PRESETS};
use smartchip_core::{Channel, ChipRequest, EngineConfig, ModuleKey, ModuleToggles, Thresholds};

pub fn list() -> CmdResult {
    println!("Search stats (product discovery):");
    for name in STATS_PRESETS {
        println!("  {name}");
    }
    println!("Requests (intent modules):");
    for name in REQUEST_PRESETS {
        println!("  {name}");
    }
    Ok(())
}

/// The request a preset name stands for.
///
/// Stats presets become a product-discovery request on `channel` with the
/// three discovery modules switched on.
pub fn preset_request(name: &str, channel: Channel) -> Result<Value, Box<dyn std::error::Error>> {
    if let Some(request) = presets::request(name) {
        return Ok(serde_json::to_value(request)?);
    }
    let stats = presets::stats(name).ok_or_else(|| format!("Unknown preset: {name}"))?;

    let mut modules = ModuleToggles::default();
    for key in [ModuleKey::Budget, ModuleKey::Facet, ModuleKey::Sort] {
        modules.set(key, true);
    }
    let request = ChipRequest {
        intent: "product_discovery".into(),
        channel,
        stats,
        context: None,
        config: EngineConfig {
            config_version: None,
            modules,
            thresholds: Thresholds::default(),
            store: None,
        },
    };
    Ok(serde_json::to_value(request)?)
}
