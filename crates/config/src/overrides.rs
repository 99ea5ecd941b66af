//! Caller-supplied partial overrides on top of a resolved [`EngineConfig`].
//!
//! Merge rules, per section:
//! - `modules` / `thresholds`: keys present in the override replace the base.
//! - `store`: fields present in the override replace the base, except
//!   `policy_links`, which is a map union (override wins on collision).
//!
//! The override's top-level object is strict: unknown keys reject the
//! whole override and nothing is merged.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use smartchip_core::issues::{
    NumberRule, Presence, check_bool, check_enum, check_number, check_object, check_string,
    check_string_record, expect_object, reject_unknown_keys,
};
use smartchip_core::{
    EngineConfig, Error, FieldPath, IntegrationType, Issues, ModuleKey, StoreConfig,
};
use tracing::{debug, warn};

const OVERRIDE_KEYS: [&str; 3] = ["modules", "thresholds", "store"];

/// Partial module toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleTogglesOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facet: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<bool>,
}

impl ModuleTogglesOverride {
    fn get(&self, key: ModuleKey) -> Option<bool> {
        match key {
            ModuleKey::Budget => self.budget,
            ModuleKey::Facet => self.facet,
            ModuleKey::Sort => self.sort,
            ModuleKey::Order => self.order,
            ModuleKey::Cart => self.cart,
            ModuleKey::Policy => self.policy,
        }
    }
}

/// Partial thresholds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdsOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facet_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_threshold: Option<f64>,
}

/// A validated `config_overrides` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfigOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modules: Option<ModuleTogglesOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<ThresholdsOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreConfig>,
}

impl EngineConfigOverride {
    /// Validate against the strict override schema and convert.
    pub fn parse(value: &Value) -> Result<Self, Issues> {
        validate_override(value)?;
        serde_json::from_value(value.clone()).map_err(|e| {
            let mut issues = Issues::new();
            issues.push(&FieldPath::root(), e.to_string());
            issues
        })
    }

    /// Apply this override on top of `base`.
    pub fn apply(&self, base: &EngineConfig) -> EngineConfig {
        let mut merged = base.clone();

        if let Some(modules) = &self.modules {
            for key in ModuleKey::ALL {
                if let Some(enabled) = modules.get(key) {
                    merged.modules.set(key, enabled);
                }
            }
        }

        if let Some(thresholds) = &self.thresholds {
            let t = &mut merged.thresholds;
            t.variance = thresholds.variance.unwrap_or(t.variance);
            t.facet_threshold = thresholds.facet_threshold.unwrap_or(t.facet_threshold);
            t.rating_threshold = thresholds.rating_threshold.unwrap_or(t.rating_threshold);
        }

        merged.store = merge_store_config(base.store.as_ref(), self.store.as_ref());
        merged
    }
}

/// Merge `overlay` onto `base` field by field.  `policy_links` is unioned.
///
/// Returns `None` only when both sides are absent.
pub fn merge_store_config(
    base: Option<&StoreConfig>,
    overlay: Option<&StoreConfig>,
) -> Option<StoreConfig> {
    if base.is_none() && overlay.is_none() {
        return None;
    }
    let empty = StoreConfig::default();
    let base = base.unwrap_or(&empty);
    let overlay = overlay.unwrap_or(&empty);

    let mut policy_links = base.policy_links.clone().unwrap_or_default();
    if let Some(links) = &overlay.policy_links {
        policy_links.extend(links.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    Some(StoreConfig {
        integration_type: overlay.integration_type.or(base.integration_type),
        support_phone: overlay
            .support_phone
            .clone()
            .or_else(|| base.support_phone.clone()),
        enable_cod: overlay.enable_cod.or(base.enable_cod),
        free_shipping_threshold: overlay
            .free_shipping_threshold
            .or(base.free_shipping_threshold),
        policy_links: Some(policy_links),
        refund_window: overlay
            .refund_window
            .clone()
            .or_else(|| base.refund_window.clone()),
    })
}

/// Check an override document without applying it.
pub fn validate_override(value: &Value) -> Result<(), Issues> {
    let mut issues = Issues::new();
    let root = FieldPath::root();
    let Some(doc) = expect_object(Some(value), &root, &mut issues) else {
        return issues.into_result();
    };
    reject_unknown_keys(doc, &OVERRIDE_KEYS, &root, &mut issues);

    if let Some(modules) = check_object(doc, "modules", &root, Presence::Optional, &mut issues) {
        let path = root.key("modules");
        for key in ModuleKey::ALL {
            check_bool(modules, key.as_str(), &path, Presence::Optional, &mut issues);
        }
    }

    if let Some(t) = check_object(doc, "thresholds", &root, Presence::Optional, &mut issues) {
        let path = root.key("thresholds");
        check_number(t, "variance", &path, Presence::Optional, NumberRule::positive(), &mut issues);
        check_number(
            t,
            "facet_threshold",
            &path,
            Presence::Optional,
            NumberRule::unit(),
            &mut issues,
        );
        check_number(
            t,
            "rating_threshold",
            &path,
            Presence::Optional,
            NumberRule::unit(),
            &mut issues,
        );
    }

    if let Some(store) = check_object(doc, "store", &root, Presence::Optional, &mut issues) {
        check_store_fields(store, &root.key("store"), &mut issues);
    }

    issues.into_result()
}

/// Field checks shared by request `config.store` and override `store`.
pub fn check_store_fields(
    store: &serde_json::Map<String, Value>,
    path: &FieldPath,
    issues: &mut Issues,
) {
    check_enum(
        store,
        "integration_type",
        path,
        Presence::Optional,
        &IntegrationType::NAMES,
        issues,
    );
    check_string(store, "support_phone", path, Presence::Optional, issues);
    check_bool(store, "enable_cod", path, Presence::Optional, issues);
    check_number(
        store,
        "free_shipping_threshold",
        path,
        Presence::Optional,
        NumberRule::any(),
        issues,
    );
    check_string_record(store, "policy_links", path, Presence::Optional, issues);
    check_string(store, "refund_window", path, Presence::Optional, issues);
}

/// Merge `override_input` onto `base`.
///
/// An absent or `null` override returns `base` unchanged.  A rejected
/// override leaves nothing merged.
pub fn apply_engine_config_override(
    base: &EngineConfig,
    override_input: Option<&Value>,
) -> Result<EngineConfig, Error> {
    let Some(input) = override_input.filter(|v| !v.is_null()) else {
        return Ok(base.clone());
    };

    match EngineConfigOverride::parse(input) {
        Ok(ov) => {
            debug!(
                modules = ov.modules.is_some(),
                thresholds = ov.thresholds.is_some(),
                store = ov.store.is_some(),
                "Applying config override"
            );
            Ok(ov.apply(base))
        }
        Err(issues) => {
            warn!(issues = issues.len(), "Rejected config override: {issues}");
            Err(Error::InvalidOverride(issues))
        }
    }
}
