//! The merchant-config store: an externally owned `merchant_id → record`
//! lookup.  The engine only ever reads from it.

use crate::ConfigError;
use crate::merchant::{
    BudgetSettings, CartSettings, FacetSettings, MERCHANT_CONFIG_VERSION, MerchantConfigV1,
    MerchantModules, MerchantStoreInfo, OrderSettings, PolicySettings, SortSettings,
};
use smartchip_core::IntegrationType;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Read-only lookup of merchant records by id.
pub trait MerchantStore: Send + Sync {
    /// The record for `merchant_id`, if known.  Absence is not an error.
    fn resolve(&self, merchant_id: &str) -> Option<MerchantConfigV1>;

    /// All known merchant ids.
    fn merchant_ids(&self) -> Vec<String>;
}

/// Resolve a merchant record from `store`.
pub fn resolve_merchant_config(
    store: &dyn MerchantStore,
    merchant_id: &str,
) -> Option<MerchantConfigV1> {
    let found = store.resolve(merchant_id);
    debug!(merchant_id, found = found.is_some(), "Resolved merchant config");
    found
}

/// An in-memory store, optionally loaded from a TOML catalog.
///
/// Catalog format:
///
/// ```toml
/// [merchants.demo-electronics]
/// config_version = 1
///
/// [merchants.demo-electronics.modules]
/// budget = { enabled = true, variance_threshold = 2.0 }
/// facet = { enabled = true, facet_share_threshold = 0.2 }
/// sort = { enabled = true, rating_coverage_threshold = 0.5 }
/// order = { enabled = true }
/// cart = { enabled = true, enable_cod = true, free_shipping_threshold = 50 }
/// policy = { enabled = true, refund_window = "30 days" }
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticMerchantStore {
    merchants: BTreeMap<String, MerchantConfigV1>,
}

impl StaticMerchantStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The two built-in demo merchants.
    pub fn demo() -> Self {
        let mut store = Self::new();
        store.insert("demo-electronics", demo_electronics());
        store.insert("demo-dollar-store", demo_dollar_store());
        store
    }

    /// Add or replace a merchant record.
    pub fn insert(&mut self, merchant_id: impl Into<String>, config: MerchantConfigV1) {
        self.merchants.insert(merchant_id.into(), config);
    }

    /// Add every record of `other`, replacing ids that already exist.
    pub fn extend(&mut self, other: StaticMerchantStore) {
        self.merchants.extend(other.merchants);
    }

    pub fn len(&self) -> usize {
        self.merchants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.merchants.is_empty()
    }

    /// Parse a TOML catalog.  Every record is validated; one bad record
    /// fails the whole catalog.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let doc: toml::Table = toml::from_str(toml_str)
            .map_err(|e| ConfigError::ValidationError(format!("invalid merchant catalog: {e}")))?;

        let mut store = Self::new();
        let Some(merchants) = doc.get("merchants") else {
            return Ok(store);
        };
        let Some(merchants) = merchants.as_table() else {
            return Err(ConfigError::ValidationError(
                "`merchants` must be a table of merchant records".into(),
            ));
        };

        for (id, record) in merchants {
            let value = serde_json::to_value(record)
                .map_err(|e| ConfigError::ValidationError(format!("merchant {id}: {e}")))?;
            let config = MerchantConfigV1::from_value(value).map_err(|issues| {
                ConfigError::InvalidMerchant {
                    id: id.clone(),
                    issues,
                }
            })?;
            store.insert(id.clone(), config);
        }
        Ok(store)
    }

    /// Load a TOML catalog from disk.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let store = Self::from_toml(&content).map_err(|e| match e {
            ConfigError::ValidationError(reason) => ConfigError::ParseError {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })?;
        info!(path = %path.display(), merchants = store.len(), "Loaded merchant catalog");
        Ok(store)
    }
}

impl MerchantStore for StaticMerchantStore {
    fn resolve(&self, merchant_id: &str) -> Option<MerchantConfigV1> {
        self.merchants.get(merchant_id).cloned()
    }

    fn merchant_ids(&self) -> Vec<String> {
        self.merchants.keys().cloned().collect()
    }
}

fn demo_electronics() -> MerchantConfigV1 {
    MerchantConfigV1 {
        config_version: MERCHANT_CONFIG_VERSION,
        modules: MerchantModules {
            budget: BudgetSettings {
                enabled: true,
                variance_threshold: 2.0,
            },
            facet: FacetSettings {
                enabled: true,
                facet_share_threshold: 0.2,
            },
            sort: SortSettings {
                enabled: true,
                rating_coverage_threshold: 0.5,
            },
            order: OrderSettings { enabled: true },
            cart: CartSettings {
                enabled: true,
                enable_cod: Some(true),
                free_shipping_threshold: Some(50.0),
            },
            policy: PolicySettings {
                enabled: true,
                refund_window: Some("30 days".into()),
                policy_links: Some(BTreeMap::from([
                    (
                        "returns".to_string(),
                        "https://store.example.com/policies/returns".to_string(),
                    ),
                    (
                        "shipping".to_string(),
                        "https://store.example.com/policies/shipping".to_string(),
                    ),
                    (
                        "warranty".to_string(),
                        "https://store.example.com/policies/warranty".to_string(),
                    ),
                ])),
            },
        },
        store: Some(MerchantStoreInfo {
            integration_type: Some(IntegrationType::Shopify),
            support_phone: Some("+1-800-555-0199".into()),
        }),
    }
}

fn demo_dollar_store() -> MerchantConfigV1 {
    MerchantConfigV1 {
        config_version: MERCHANT_CONFIG_VERSION,
        modules: MerchantModules {
            budget: BudgetSettings {
                enabled: false,
                variance_threshold: 2.0,
            },
            facet: FacetSettings {
                enabled: true,
                facet_share_threshold: 0.3,
            },
            sort: SortSettings {
                enabled: false,
                rating_coverage_threshold: 0.6,
            },
            order: OrderSettings { enabled: true },
            cart: CartSettings {
                enabled: true,
                enable_cod: Some(false),
                free_shipping_threshold: Some(20.0),
            },
            policy: PolicySettings {
                enabled: true,
                policy_links: None,
                refund_window: None,
            },
        },
        store: Some(MerchantStoreInfo {
            integration_type: Some(IntegrationType::Manual),
            support_phone: None,
        }),
    }
}
