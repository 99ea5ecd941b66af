//! Request builders shared by the module tests.

use smartchip_core::{
    Channel, ChipRequest, EngineConfig, IntentContext, ModuleToggles, SearchStats, StoreConfig,
    Thresholds,
};

/// A product-discovery request with default thresholds and no store.
pub fn discovery_request(stats: SearchStats) -> ChipRequest {
    ChipRequest {
        intent: "product_discovery".into(),
        channel: Channel::Web,
        stats,
        context: None,
        config: EngineConfig {
            config_version: None,
            modules: ModuleToggles::all(),
            thresholds: Thresholds::default(),
            store: None,
        },
    }
}

/// An intent request carrying `context` and `store`.
pub fn intent_request(context: Option<IntentContext>, store: StoreConfig) -> ChipRequest {
    ChipRequest {
        intent: "intent".into(),
        channel: Channel::Web,
        stats: SearchStats::default(),
        context,
        config: EngineConfig {
            config_version: None,
            modules: ModuleToggles::all(),
            thresholds: Thresholds::default(),
            store: Some(store),
        },
    }
}

pub fn labels(chips: &[smartchip_core::Chip]) -> Vec<&str> {
    chips.iter().map(|c| c.label.as_str()).collect()
}
