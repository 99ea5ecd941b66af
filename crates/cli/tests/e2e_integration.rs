//! End-to-end integration tests for the SmartChip engine.
//!
//! These tests drive the full pipeline from raw JSON input to response:
//! merchant hydration, validation, module dispatch, ranking and channel
//! truncation.

use std::sync::Arc;

use serde_json::{Value, json};
use smartchip_config::{AppConfig, StaticMerchantStore, apply_engine_config_override};
use smartchip_core::{Channel, ResponseOption, presets};
use smartchip_engine::{ChipEngine, MODULES, compute_chips, hydrate_request_with_merchant_config};

// ── Fixtures ─────────────────────────────────────────────────────────────

fn request(stats: Value, channel: &str, thresholds: Value) -> Value {
    json!({
        "intent": "product_discovery",
        "channel": channel,
        "stats": stats,
        "config": {
            "modules": {
                "budget": true, "facet": true, "sort": true,
                "order": true, "cart": true, "policy": true
            },
            "thresholds": thresholds
        }
    })
}

fn default_thresholds() -> Value {
    json!({ "variance": 2.0, "facet_threshold": 0.2, "rating_threshold": 0.5 })
}

fn stats(min: f64, max: f64, median: f64, coverage: f64, facets: Value) -> Value {
    json!({
        "price_min": min,
        "price_max": max,
        "price_median": median,
        "rating_coverage": coverage,
        "facets": facets
    })
}

fn discovery(stats: Value) -> Value {
    request(stats, "web", default_thresholds())
}

fn trace_for<'a>(
    resp: &'a smartchip_core::ChipResponse,
    module: &str,
) -> &'a smartchip_core::TraceEntry {
    resp.trace
        .iter()
        .find(|t| t.module == module)
        .unwrap_or_else(|| panic!("no trace entry for {module}"))
}

fn engine() -> ChipEngine {
    ChipEngine::new(Arc::new(StaticMerchantStore::demo()))
}

// ── Pipeline properties ─────────────────────────────────────────────────

#[test]
fn e2e_trace_has_one_entry_per_registered_module() {
    let mut disabled = discovery(serde_json::to_value(presets::mixed_bag()).unwrap());
    disabled["config"]["modules"]["facet"] = json!(false);
    disabled["config"]["modules"]["cart"] = json!(false);

    for input in [
        discovery(serde_json::to_value(presets::mixed_bag()).unwrap()),
        disabled,
    ] {
        let resp = compute_chips(&input);
        assert_eq!(resp.option, ResponseOption::Success);
        assert_eq!(resp.trace.len(), MODULES.len());
        assert_eq!(resp.trace.len(), 6);
    }
}

#[test]
fn e2e_budget_fires_with_expected_chip() {
    let resp = compute_chips(&discovery(stats(100.0, 1000.0, 450.0, 0.0, json!([]))));
    let budget = trace_for(&resp, "BudgetModule");
    assert!(budget.fired);
    assert!(budget.reason.contains("10.0"));

    let chip = resp
        .chips
        .iter()
        .find(|c| c.action.starts_with("filter_price_max"))
        .unwrap();
    assert_eq!(chip.label, "Under $450");
    assert_eq!(chip.action, "filter_price_max:450");
    assert_eq!(chip.priority, 90);
}

#[test]
fn e2e_budget_ratio_equal_to_variance_does_not_fire() {
    let resp = compute_chips(&discovery(stats(100.0, 200.0, 150.0, 0.0, json!([]))));
    assert!(!trace_for(&resp, "BudgetModule").fired);
    assert!(resp.chips.is_empty());
}

#[test]
fn e2e_budget_reports_non_positive_price_min() {
    let resp = compute_chips(&discovery(stats(0.0, 100.0, 40.0, 0.0, json!([]))));
    let budget = trace_for(&resp, "BudgetModule");
    assert!(!budget.fired);
    assert!(budget.reason.contains("price_min is 0"));
}

#[test]
fn e2e_sort_coverage_equal_to_threshold_does_not_fire() {
    let resp = compute_chips(&discovery(stats(10.0, 12.0, 11.0, 0.5, json!([]))));
    assert!(!trace_for(&resp, "SortModule").fired);

    let resp = compute_chips(&discovery(stats(10.0, 12.0, 11.0, 0.51, json!([]))));
    assert!(trace_for(&resp, "SortModule").fired);
    assert_eq!(resp.chips[0].label, "Best Rated");
}

#[test]
fn e2e_facet_with_one_qualifying_value_yields_nothing() {
    let facets = json!([
        { "name": "color", "values": [
            { "value": "Black", "share": 0.8 },
            { "value": "White", "share": 0.12 }
        ]}
    ]);
    let resp = compute_chips(&discovery(stats(10.0, 12.0, 11.0, 0.0, facets)));
    assert!(!trace_for(&resp, "FacetModule").fired);
    assert!(!resp.chips.iter().any(|c| c.action.starts_with("filter_facet")));
}

#[test]
fn e2e_chips_sorted_by_priority_descending() {
    let inputs = [
        discovery(serde_json::to_value(presets::mixed_bag()).unwrap()),
        discovery(serde_json::to_value(presets::no_ratings()).unwrap()),
        serde_json::to_value(presets::request("checkout_with_cart").unwrap()).unwrap(),
        serde_json::to_value(presets::request("policy_returns").unwrap()).unwrap(),
    ];
    for input in inputs {
        let resp = compute_chips(&input);
        assert!(!resp.chips.is_empty());
        assert!(
            resp.chips.windows(2).all(|w| w[0].priority >= w[1].priority),
            "unsorted chips: {:?}",
            resp.chips
        );
    }
}

#[test]
fn e2e_channel_truncation_limits() {
    let stats = serde_json::to_value(presets::mixed_bag()).unwrap();
    let web = compute_chips(&request(stats.clone(), "web", default_thresholds()));
    assert!(web.chips.len() <= Channel::Web.limit());
    assert_eq!(web.chips.len(), 6);

    let whatsapp = compute_chips(&request(stats, "whatsapp", default_thresholds()));
    assert!(whatsapp.chips.len() <= Channel::Whatsapp.limit());
    assert_eq!(whatsapp.chips.len(), 3);
    assert_eq!(&whatsapp.chips[..], &web.chips[..3]);
}

#[test]
fn e2e_garbage_input_is_an_error_response() {
    for input in [json!({ "garbage": true }), json!(42), json!(null), json!([])] {
        let resp = compute_chips(&input);
        assert_eq!(resp.option, ResponseOption::Error);
        assert!(resp.chips.is_empty());
        assert!(resp.trace.is_empty());
        assert!(!resp.error.unwrap_or_default().is_empty());
    }
}

// ── Intent scenarios ────────────────────────────────────────────────────

#[test]
fn e2e_intent_presets_produce_expected_top_chips() {
    let cases = [
        ("track_order_known", vec!["Track #1001", "Track #1002", "Talk to Agent"]),
        ("track_order_unknown", vec!["Login with Phone", "Enter Order ID", "Talk to Agent"]),
        (
            "checkout_with_cart",
            vec![
                "Checkout ($45.00)",
                "Add $5.00 for Free Ship",
                "Pay with Cash (COD)",
                "View Cart",
            ],
        ),
        ("checkout_empty", vec!["Browse Products", "View Deals"]),
        (
            "policy_returns",
            vec![
                "Read Full Policy",
                "Start a Return (30 days)",
                "View Nike Air Max 90",
                "Back to Shopping",
                "View Best Sellers",
            ],
        ),
        ("policy_shipping", vec!["Read Full Policy", "Track My Order", "Back to Shopping"]),
    ];
    for (name, expected) in cases {
        let input = serde_json::to_value(presets::request(name).unwrap()).unwrap();
        let resp = compute_chips(&input);
        let labels: Vec<&str> = resp.chips.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, expected, "preset {name}");
    }
}

#[test]
fn e2e_overlapping_context_fires_each_matching_module() {
    let mut input = discovery(stats(10.0, 12.0, 11.0, 0.0, json!([])));
    input["context"] = json!({
        "policy_type": "general",
        "cart_count": 0,
        "cart_value": 0,
        "currency": "USD",
        "payment_methods": []
    });
    let resp = compute_chips(&input);
    assert!(trace_for(&resp, "CartModule").fired);
    assert!(trace_for(&resp, "PolicyModule").fired);
    assert!(!trace_for(&resp, "OrderModule").fired);
}

// ── Merchant hydration ──────────────────────────────────────────────────

#[test]
fn e2e_unknown_merchant_is_reported() {
    let store = StaticMerchantStore::demo();
    let err = hydrate_request_with_merchant_config(json!({ "merchant_id": "ghost-shop" }), &store)
        .unwrap_err();
    assert!(err.to_string().contains("Unknown merchant_id"));

    let resp = engine().compute(json!({ "merchant_id": "ghost-shop" }));
    assert_eq!(resp.option, ResponseOption::Error);
    assert!(resp.error.unwrap().contains("Unknown merchant_id"));
}

#[test]
fn e2e_zero_variance_override_is_rejected() {
    let resp = engine().compute(json!({
        "merchant_id": "demo-electronics",
        "channel": "web",
        "stats": presets::mixed_bag(),
        "config_overrides": { "thresholds": { "variance": 0 } }
    }));
    assert_eq!(resp.option, ResponseOption::Error);
    assert!(resp.error.unwrap().contains("config_overrides invalid"));
}

#[test]
fn e2e_override_with_unknown_key_is_rejected_whole() {
    let store = StaticMerchantStore::demo();
    let base = smartchip_config::resolve_merchant_config(&store, "demo-electronics")
        .unwrap()
        .to_engine_config();
    let err = apply_engine_config_override(
        &base,
        Some(&json!({ "modules": { "budget": false }, "surprise": 1 })),
    )
    .unwrap_err();
    assert!(err.to_string().starts_with("config_overrides invalid: "));
    assert!(err.to_string().contains("surprise"));
}

#[test]
fn e2e_merchant_request_runs_full_pipeline() {
    let resp = engine().compute(json!({
        "merchant_id": "demo-dollar-store",
        "intent": "checkout_help",
        "channel": "whatsapp",
        "stats": presets::cheap_simple(),
        "context": {
            "cart_count": 2,
            "cart_value": 12.5,
            "currency": "USD",
            "payment_methods": ["cod"]
        }
    }));
    assert_eq!(resp.option, ResponseOption::Success);
    assert_eq!(resp.trace.len(), 6);
    assert_eq!(trace_for(&resp, "BudgetModule").reason, "Module disabled by config");
    let labels: Vec<&str> = resp.chips.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["Checkout ($12.50)", "Add $7.50 for Free Ship", "View Cart"]);
}

#[test]
fn e2e_explicit_config_bypasses_merchant_lookup() {
    let mut input = discovery(stats(100.0, 1000.0, 450.0, 0.0, json!([])));
    input["merchant_id"] = json!("ghost-shop");
    let resp = engine().compute(input);
    assert_eq!(resp.option, ResponseOption::Success);
    assert_eq!(resp.chips[0].label, "Under $450");
}

// ── Settings and catalog ────────────────────────────────────────────────

#[test]
fn e2e_catalog_merchant_overrides_demo_record() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = dir.path().join("merchants.toml");
    std::fs::write(
        &catalog,
        r#"
[merchants.demo-electronics]
config_version = 1

[merchants.demo-electronics.modules]
budget = { enabled = false, variance_threshold = 2.0 }
facet = { enabled = false, facet_share_threshold = 0.2 }
sort = { enabled = true, rating_coverage_threshold = 0.9 }
order = { enabled = false }
cart = { enabled = false }
policy = { enabled = false }
"#,
    )
    .unwrap();

    let settings = AppConfig {
        merchants_path: Some(catalog),
        ..AppConfig::default()
    };
    let engine = ChipEngine::new(Arc::new(settings.merchant_store().unwrap()));
    let resp = engine.compute(json!({
        "merchant_id": "demo-electronics",
        "channel": "web",
        "stats": presets::mixed_bag()
    }));
    assert_eq!(resp.option, ResponseOption::Success);
    assert!(resp.chips.is_empty());
    assert_eq!(
        trace_for(&resp, "SortModule").reason,
        "Rating coverage 72% below threshold 90%"
    );
}
