//! Versioned per-merchant configuration records and their mapping onto the
//! engine's runtime [`EngineConfig`].

use crate::overrides::merge_store_config;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smartchip_core::issues::{
    NumberRule, Presence, check_bool, check_enum, check_number, check_object, check_string,
    check_string_record, expect_object,
};
use smartchip_core::{
    EngineConfig, FieldPath, IntegrationType, Issues, ModuleToggles, StoreConfig, Thresholds,
};
use std::collections::BTreeMap;

/// The only record version this crate understands.
pub const MERCHANT_CONFIG_VERSION: u32 = 1;

/// A merchant configuration record as kept in the merchant store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantConfigV1 {
    pub config_version: u32,
    pub modules: MerchantModules,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<MerchantStoreInfo>,
}

/// Per-module settings: an on/off switch plus the module's own knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantModules {
    pub budget: BudgetSettings,
    pub facet: FacetSettings,
    pub sort: SortSettings,
    pub order: OrderSettings,
    pub cart: CartSettings,
    pub policy: PolicySettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSettings {
    pub enabled: bool,
    pub variance_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetSettings {
    pub enabled: bool,
    pub facet_share_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortSettings {
    pub enabled: bool,
    pub rating_coverage_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSettings {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSettings {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_cod: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_shipping_threshold: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicySettings {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_links: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refund_window: Option<String>,
}

/// Store metadata that is not tied to a single module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MerchantStoreInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_type: Option<IntegrationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_phone: Option<String>,
}

impl MerchantConfigV1 {
    /// Validate a raw record and convert it.
    pub fn from_value(value: Value) -> Result<Self, Issues> {
        validate_merchant_config(&value)?;
        serde_json::from_value(value).map_err(|e| {
            let mut issues = Issues::new();
            issues.push(&FieldPath::root(), e.to_string());
            issues
        })
    }

    /// Flatten into the engine's runtime shape.
    ///
    /// Toggles go to `modules`, each module's numeric knob to `thresholds`,
    /// and the cart/policy settings are merged into `store` on top of the
    /// merchant's store metadata.
    pub fn to_engine_config(&self) -> EngineConfig {
        let m = &self.modules;
        let base_store = self.store.as_ref().map(|info| StoreConfig {
            integration_type: info.integration_type,
            support_phone: info.support_phone.clone(),
            ..StoreConfig::default()
        });
        let module_store = StoreConfig {
            enable_cod: m.cart.enable_cod,
            free_shipping_threshold: m.cart.free_shipping_threshold,
            policy_links: m.policy.policy_links.clone(),
            refund_window: m.policy.refund_window.clone(),
            ..StoreConfig::default()
        };

        EngineConfig {
            config_version: Some(self.config_version),
            modules: ModuleToggles {
                budget: m.budget.enabled,
                facet: m.facet.enabled,
                sort: m.sort.enabled,
                order: m.order.enabled,
                cart: m.cart.enabled,
                policy: m.policy.enabled,
            },
            thresholds: Thresholds {
                variance: m.budget.variance_threshold,
                facet_threshold: m.facet.facet_share_threshold,
                rating_threshold: m.sort.rating_coverage_threshold,
            },
            store: merge_store_config(base_store.as_ref(), Some(&module_store)),
        }
    }
}

/// Map a merchant record onto an [`EngineConfig`].
pub fn to_engine_config(config: &MerchantConfigV1) -> EngineConfig {
    config.to_engine_config()
}

/// Check a raw record against the version-1 schema.  Unknown keys are ignored.
pub fn validate_merchant_config(value: &Value) -> Result<(), Issues> {
    let mut issues = Issues::new();
    let root = FieldPath::root();
    let Some(record) = expect_object(Some(value), &root, &mut issues) else {
        return issues.into_result();
    };

    match record.get("config_version") {
        None => issues.push(&root.key("config_version"), "Required"),
        Some(v) if v.as_f64() == Some(f64::from(MERCHANT_CONFIG_VERSION)) => {}
        Some(_) => issues.push(
            &root.key("config_version"),
            format!("Invalid literal value, expected {MERCHANT_CONFIG_VERSION}"),
        ),
    }

    if let Some(modules) = check_object(record, "modules", &root, Presence::Required, &mut issues)
    {
        let base = root.key("modules");
        let module = |key: &str, issues: &mut Issues| {
            let path = base.key(key);
            let settings = check_object(modules, key, &base, Presence::Required, issues)?;
            check_bool(settings, "enabled", &path, Presence::Required, issues);
            Some((settings, path))
        };

        if let Some((s, path)) = module("budget", &mut issues) {
            check_number(
                s,
                "variance_threshold",
                &path,
                Presence::Required,
                NumberRule::positive(),
                &mut issues,
            );
        }
        if let Some((s, path)) = module("facet", &mut issues) {
            check_number(
                s,
                "facet_share_threshold",
                &path,
                Presence::Required,
                NumberRule::unit(),
                &mut issues,
            );
        }
        if let Some((s, path)) = module("sort", &mut issues) {
            check_number(
                s,
                "rating_coverage_threshold",
                &path,
                Presence::Required,
                NumberRule::unit(),
                &mut issues,
            );
        }
        module("order", &mut issues);
        if let Some((s, path)) = module("cart", &mut issues) {
            check_bool(s, "enable_cod", &path, Presence::Optional, &mut issues);
            check_number(
                s,
                "free_shipping_threshold",
                &path,
                Presence::Optional,
                NumberRule::any().min(0.0),
                &mut issues,
            );
        }
        if let Some((s, path)) = module("policy", &mut issues) {
            check_string_record(s, "policy_links", &path, Presence::Optional, &mut issues);
            check_string(s, "refund_window", &path, Presence::Optional, &mut issues);
        }
    }

    if let Some(store) = check_object(record, "store", &root, Presence::Optional, &mut issues) {
        let path = root.key("store");
        check_enum(
            store,
            "integration_type",
            &path,
            Presence::Optional,
            &IntegrationType::NAMES,
            &mut issues,
        );
        check_string(store, "support_phone", &path, Presence::Optional, &mut issues);
    }

    issues.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn electronics() -> Value {
        json!({
            "config_version": 1,
            "modules": {
                "budget": { "enabled": true, "variance_threshold": 2.0 },
                "facet": { "enabled": true, "facet_share_threshold": 0.2 },
                "sort": { "enabled": true, "rating_coverage_threshold": 0.5 },
                "order": { "enabled": true },
                "cart": { "enabled": true, "enable_cod": true, "free_shipping_threshold": 50 },
                "policy": {
                    "enabled": true,
                    "refund_window": "30 days",
                    "policy_links": { "returns": "https://store.example.com/policies/returns" }
                }
            },
            "store": { "integration_type": "shopify", "support_phone": "+1-800-555-0199" }
        })
    }

    #[test]
    fn valid_record_maps_to_engine_config() {
        let record = MerchantConfigV1::from_value(electronics()).unwrap();
        let config = record.to_engine_config();
        assert_eq!(config.config_version, Some(1));
        assert!(config.modules.budget);
        assert_eq!(config.thresholds.variance, 2.0);
        assert_eq!(config.thresholds.facet_threshold, 0.2);
        assert_eq!(config.thresholds.rating_threshold, 0.5);

        let store = config.store.unwrap();
        assert_eq!(store.support_phone.as_deref(), Some("+1-800-555-0199"));
        assert_eq!(store.integration_type, Some(IntegrationType::Shopify));
        assert_eq!(store.enable_cod, Some(true));
        assert_eq!(store.free_shipping_threshold, Some(50.0));
        assert_eq!(store.refund_window.as_deref(), Some("30 days"));
        assert_eq!(
            store.policy_links.unwrap().get("returns").map(String::as_str),
            Some("https://store.example.com/policies/returns")
        );
    }

    #[test]
    fn record_without_store_still_gets_module_store_fields() {
        let mut raw = electronics();
        raw.as_object_mut().unwrap().remove("store");
        let config = MerchantConfigV1::from_value(raw).unwrap().to_engine_config();
        let store = config.store.unwrap();
        assert!(store.support_phone.is_none());
        assert_eq!(store.enable_cod, Some(true));
    }

    #[test]
    fn wrong_version_rejected() {
        let mut raw = electronics();
        raw["config_version"] = json!(2);
        let err = validate_merchant_config(&raw).unwrap_err();
        assert_eq!(err.to_string(), "config_version: Invalid literal value, expected 1");
    }

    #[test]
    fn bad_thresholds_reported_with_paths() {
        let mut raw = electronics();
        raw["modules"]["budget"]["variance_threshold"] = json!(0);
        raw["modules"]["facet"]["facet_share_threshold"] = json!(1.5);
        raw["modules"]["order"] = json!({});
        let rendered = validate_merchant_config(&raw).unwrap_err().to_string();
        assert!(
            rendered.contains("modules.budget.variance_threshold: Number must be greater than 0")
        );
        assert!(
            rendered.contains("modules.facet.facet_share_threshold: Number must be less than or equal to 1")
        );
        assert!(rendered.contains("modules.order.enabled: Required"));
    }

    #[test]
    fn non_object_record_rejected() {
        let err = validate_merchant_config(&json!([1, 2])).unwrap_err();
        assert_eq!(err.to_string(), ": Expected object, received array");
    }
}
