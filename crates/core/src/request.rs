//! The compute request: search statistics, optional intent context and the
//! engine configuration that parameterizes every rule module.

use crate::channel::Channel;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// A full request to the chip engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChipRequest {
    /// Caller-supplied intent label.  Advisory only.
    pub intent: String,
    pub channel: Channel,
    pub stats: SearchStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<IntentContext>,
    pub config: EngineConfig,
}

// ── Product discovery ──────────────────────────────────────────────

/// Aggregate statistics over a product search result set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    pub price_min: f64,
    pub price_max: f64,
    pub price_median: f64,
    /// Fraction of results that carry a rating.
    pub rating_coverage: f64,
    #[serde(default)]
    pub facets: Vec<Facet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facet {
    pub name: String,
    pub values: Vec<FacetValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetValue {
    pub value: String,
    /// Fraction of results exhibiting this value.
    pub share: f64,
}

// ── Intent context ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthState {
    Known,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Processing,
    Shipped,
    Delivered,
    Returned,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderContext {
    pub auth_state: AuthState,
    pub recent_orders: Vec<Order>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartContext {
    pub cart_count: f64,
    pub cart_value: f64,
    pub currency: String,
    pub payment_methods: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyType {
    Returns,
    Shipping,
    Warranty,
    General,
}

impl PolicyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyType::Returns => "returns",
            PolicyType::Shipping => "shipping",
            PolicyType::Warranty => "warranty",
            PolicyType::General => "general",
        }
    }
}

impl fmt::Display for PolicyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyContext {
    pub policy_type: PolicyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_product: Option<String>,
}

/// Intent-specific session context.
///
/// The wire format carries no discriminant: the variant is implied by which
/// key is present (`auth_state` for orders, `cart_count` for carts,
/// `policy_type` for policies).  Each view is populated when its key is
/// present and the object parses as that shape, so an object carrying keys
/// of several shapes exposes several views.  The input object is kept
/// verbatim and is what gets serialized back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct IntentContext {
    raw: Map<String, Value>,
    order: Option<OrderContext>,
    cart: Option<CartContext>,
    policy: Option<PolicyContext>,
}

impl IntentContext {
    pub const ORDER_KEY: &'static str = "auth_state";
    pub const CART_KEY: &'static str = "cart_count";
    pub const POLICY_KEY: &'static str = "policy_type";

    pub fn order(&self) -> Option<&OrderContext> {
        self.order.as_ref()
    }

    pub fn cart(&self) -> Option<&CartContext> {
        self.cart.as_ref()
    }

    pub fn policy(&self) -> Option<&PolicyContext> {
        self.policy.as_ref()
    }

    fn view<T: serde::de::DeserializeOwned>(raw: &Map<String, Value>, key: &str) -> Option<T> {
        if !raw.contains_key(key) {
            return None;
        }
        serde_json::from_value(Value::Object(raw.clone())).ok()
    }
}

impl From<Map<String, Value>> for IntentContext {
    fn from(raw: Map<String, Value>) -> Self {
        Self {
            order: Self::view(&raw, Self::ORDER_KEY),
            cart: Self::view(&raw, Self::CART_KEY),
            policy: Self::view(&raw, Self::POLICY_KEY),
            raw,
        }
    }
}

impl From<IntentContext> for Map<String, Value> {
    fn from(ctx: IntentContext) -> Self {
        ctx.raw
    }
}

impl From<OrderContext> for IntentContext {
    fn from(ctx: OrderContext) -> Self {
        to_context(&ctx)
    }
}

impl From<CartContext> for IntentContext {
    fn from(ctx: CartContext) -> Self {
        to_context(&ctx)
    }
}

impl From<PolicyContext> for IntentContext {
    fn from(ctx: PolicyContext) -> Self {
        to_context(&ctx)
    }
}

fn to_context<T: Serialize>(ctx: &T) -> IntentContext {
    match serde_json::to_value(ctx) {
        Ok(Value::Object(map)) => IntentContext::from(map),
        _ => IntentContext::from(Map::new()),
    }
}

// ── Engine configuration ───────────────────────────────────────────

/// Identifies a rule module's toggle in [`ModuleToggles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKey {
    Budget,
    Facet,
    Sort,
    Order,
    Cart,
    Policy,
}

impl ModuleKey {
    pub const ALL: [ModuleKey; 6] = [
        ModuleKey::Budget,
        ModuleKey::Facet,
        ModuleKey::Sort,
        ModuleKey::Order,
        ModuleKey::Cart,
        ModuleKey::Policy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleKey::Budget => "budget",
            ModuleKey::Facet => "facet",
            ModuleKey::Sort => "sort",
            ModuleKey::Order => "order",
            ModuleKey::Cart => "cart",
            ModuleKey::Policy => "policy",
        }
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime configuration consumed by the rule modules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(
        default,
        deserialize_with = "integral_version",
        skip_serializing_if = "Option::is_none"
    )]
    pub config_version: Option<u32>,
    pub modules: ModuleToggles,
    pub thresholds: Thresholds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreConfig>,
}

impl EngineConfig {
    pub fn store(&self) -> Option<&StoreConfig> {
        self.store.as_ref()
    }
}

/// Accepts `1` as well as `1.0`; JSON producers do not always keep the two apart.
fn integral_version<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error as _;

    let Some(n) = Option::<f64>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if n.fract() != 0.0 || n < 1.0 || n > f64::from(u32::MAX) {
        return Err(D::Error::custom(format!(
            "config_version must be a positive integer, got {n}"
        )));
    }
    Ok(Some(n as u32))
}

/// One on/off switch per rule module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleToggles {
    pub budget: bool,
    pub facet: bool,
    pub sort: bool,
    pub order: bool,
    pub cart: bool,
    pub policy: bool,
}

impl ModuleToggles {
    pub fn all() -> Self {
        Self {
            budget: true,
            facet: true,
            sort: true,
            order: true,
            cart: true,
            policy: true,
        }
    }

    /// Only the given module switched on.
    pub fn only(key: ModuleKey) -> Self {
        let mut toggles = Self::default();
        toggles.set(key, true);
        toggles
    }

    pub fn is_enabled(&self, key: ModuleKey) -> bool {
        match key {
            ModuleKey::Budget => self.budget,
            ModuleKey::Facet => self.facet,
            ModuleKey::Sort => self.sort,
            ModuleKey::Order => self.order,
            ModuleKey::Cart => self.cart,
            ModuleKey::Policy => self.policy,
        }
    }

    pub fn set(&mut self, key: ModuleKey, enabled: bool) {
        let slot = match key {
            ModuleKey::Budget => &mut self.budget,
            ModuleKey::Facet => &mut self.facet,
            ModuleKey::Sort => &mut self.sort,
            ModuleKey::Order => &mut self.order,
            ModuleKey::Cart => &mut self.cart,
            ModuleKey::Policy => &mut self.policy,
        };
        *slot = enabled;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// `price_max / price_min` ratio above which Budget fires.  Always > 0.
    pub variance: f64,
    /// Minimum facet share (exclusive) for a value to qualify.
    pub facet_threshold: f64,
    /// Minimum rating coverage (exclusive) for Sort to fire.
    pub rating_threshold: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            variance: 2.0,
            facet_threshold: 0.2,
            rating_threshold: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationType {
    Shopify,
    CourierApi,
    Manual,
}

impl IntegrationType {
    pub const NAMES: [&'static str; 3] = ["shopify", "courier_api", "manual"];
}

/// Static per-store data the modules read (support line, COD, policies...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_type: Option<IntegrationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_cod: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_shipping_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_links: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refund_window: Option<String>,
}

impl StoreConfig {
    /// Support phone, if set to a non-empty value.
    pub fn support_phone(&self) -> Option<&str> {
        self.support_phone.as_deref().filter(|p| !p.is_empty())
    }

    pub fn cod_enabled(&self) -> bool {
        self.enable_cod.unwrap_or(false)
    }

    /// Free shipping threshold, if set to a non-zero value.
    pub fn free_shipping_threshold(&self) -> Option<f64> {
        self.free_shipping_threshold.filter(|t| *t != 0.0)
    }

    pub fn policy_link(&self, policy: PolicyType) -> Option<&str> {
        self.policy_links
            .as_ref()?
            .get(policy.as_str())
            .map(String::as_str)
            .filter(|url| !url.is_empty())
    }

    pub fn refund_window(&self) -> Option<&str> {
        self.refund_window.as_deref().filter(|w| !w.is_empty())
    }
}
