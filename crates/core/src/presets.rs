//! Canned scenarios for demos, the CLI and tests.
//!
//! Three search-stats presets cover product discovery; six full requests
//! cover the intent-specific modules (order tracking, checkout, policies).

use crate::channel::Channel;
use crate::request::{
    AuthState, CartContext, ChipRequest, EngineConfig, Facet, FacetValue, IntegrationType,
    ModuleKey, ModuleToggles, Order, OrderContext, OrderStatus, PolicyContext, PolicyType,
    SearchStats, StoreConfig, Thresholds,
};
use std::collections::BTreeMap;

/// Names accepted by [`stats`].
pub const STATS_PRESETS: [&str; 3] = ["mixed_bag", "cheap_simple", "no_ratings"];

/// Names accepted by [`request`].
pub const REQUEST_PRESETS: [&str; 6] = [
    "track_order_known",
    "track_order_unknown",
    "checkout_with_cart",
    "checkout_empty",
    "policy_returns",
    "policy_shipping",
];

fn facet(name: &str, values: &[(&str, f64)]) -> Facet {
    Facet {
        name: name.into(),
        values: values
            .iter()
            .map(|(value, share)| FacetValue {
                value: (*value).into(),
                share: *share,
            })
            .collect(),
    }
}

/// Wide price spread, two split facets, good rating coverage.
pub fn mixed_bag() -> SearchStats {
    SearchStats {
        price_min: 25.0,
        price_max: 1200.0,
        price_median: 450.0,
        rating_coverage: 0.72,
        facets: vec![
            facet("gender", &[("Men's", 0.45), ("Women's", 0.40), ("Unisex", 0.15)]),
            facet(
                "brand",
                &[("Nike", 0.35), ("Adidas", 0.30), ("Puma", 0.20), ("Other", 0.15)],
            ),
        ],
    }
}

/// Narrow price band and one dominant colour.
pub fn cheap_simple() -> SearchStats {
    SearchStats {
        price_min: 10.0,
        price_max: 18.0,
        price_median: 14.0,
        rating_coverage: 0.6,
        facets: vec![facet("color", &[("Black", 0.8), ("White", 0.12), ("Other", 0.08)])],
    }
}

/// Almost no ratings.
pub fn no_ratings() -> SearchStats {
    SearchStats {
        price_min: 50.0,
        price_max: 3000.0,
        price_median: 800.0,
        rating_coverage: 0.05,
        facets: vec![facet(
            "category",
            &[("Laptops", 0.4), ("Tablets", 0.35), ("Accessories", 0.25)],
        )],
    }
}

pub fn stats(name: &str) -> Option<SearchStats> {
    match name {
        "mixed_bag" => Some(mixed_bag()),
        "cheap_simple" => Some(cheap_simple()),
        "no_ratings" => Some(no_ratings()),
        _ => None,
    }
}

/// Config with only `key` enabled and the default thresholds.
fn single_module_config(key: ModuleKey, store: StoreConfig) -> EngineConfig {
    EngineConfig {
        config_version: None,
        modules: ModuleToggles::only(key),
        thresholds: Thresholds::default(),
        store: Some(store),
    }
}

fn intent_request(
    intent: &str,
    channel: Channel,
    key: ModuleKey,
    context: impl Into<crate::request::IntentContext>,
    store: StoreConfig,
) -> ChipRequest {
    ChipRequest {
        intent: intent.into(),
        channel,
        stats: SearchStats::default(),
        context: Some(context.into()),
        config: single_module_config(key, store),
    }
}

fn order_store() -> StoreConfig {
    StoreConfig {
        integration_type: Some(IntegrationType::Shopify),
        support_phone: Some("+1-800-555-0199".into()),
        ..StoreConfig::default()
    }
}

fn links(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

pub fn request(name: &str) -> Option<ChipRequest> {
    let req = match name {
        "track_order_known" => intent_request(
            "track_order",
            Channel::Whatsapp,
            ModuleKey::Order,
            OrderContext {
                auth_state: AuthState::Known,
                recent_orders: vec![
                    Order {
                        id: "1001".into(),
                        status: OrderStatus::Shipped,
                    },
                    Order {
                        id: "1002".into(),
                        status: OrderStatus::Processing,
                    },
                ],
            },
            order_store(),
        ),
        "track_order_unknown" => intent_request(
            "track_order",
            Channel::Whatsapp,
            ModuleKey::Order,
            OrderContext {
                auth_state: AuthState::Unknown,
                recent_orders: vec![],
            },
            order_store(),
        ),
        "checkout_with_cart" => intent_request(
            "checkout_help",
            Channel::Web,
            ModuleKey::Cart,
            CartContext {
                cart_count: 3.0,
                cart_value: 45.0,
                currency: "USD".into(),
                payment_methods: vec!["stripe".into(), "cod".into()],
            },
            StoreConfig {
                enable_cod: Some(true),
                free_shipping_threshold: Some(50.0),
                ..StoreConfig::default()
            },
        ),
        "checkout_empty" => intent_request(
            "checkout_help",
            Channel::Web,
            ModuleKey::Cart,
            CartContext {
                cart_count: 0.0,
                cart_value: 0.0,
                currency: "USD".into(),
                payment_methods: vec!["stripe".into()],
            },
            StoreConfig {
                enable_cod: Some(false),
                free_shipping_threshold: Some(50.0),
                ..StoreConfig::default()
            },
        ),
        "policy_returns" => intent_request(
            "check_policy",
            Channel::Web,
            ModuleKey::Policy,
            PolicyContext {
                policy_type: PolicyType::Returns,
                current_product: Some("Nike Air Max 90".into()),
            },
            StoreConfig {
                policy_links: Some(links(&[
                    ("returns", "https://store.example.com/policies/returns"),
                    ("shipping", "https://store.example.com/policies/shipping"),
                ])),
                refund_window: Some("30 days".into()),
                ..StoreConfig::default()
            },
        ),
        "policy_shipping" => intent_request(
            "check_policy",
            Channel::Whatsapp,
            ModuleKey::Policy,
            PolicyContext {
                policy_type: PolicyType::Shipping,
                current_product: None,
            },
            StoreConfig {
                policy_links: Some(links(&[(
                    "shipping",
                    "https://store.example.com/policies/shipping",
                )])),
                refund_window: Some("30 days".into()),
                ..StoreConfig::default()
            },
        ),
        _ => return None,
    };
    Some(req)
}
