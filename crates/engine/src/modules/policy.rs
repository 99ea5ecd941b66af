//! Policy: answer a policy question, then steer back to shopping.

use crate::module::{ChipModule, ModuleOutcome};
use smartchip_core::{Chip, ChipRequest, ModuleKey, PolicyType};

pub struct PolicyModule;

impl ChipModule for PolicyModule {
    fn name(&self) -> &'static str {
        "PolicyModule"
    }

    fn config_key(&self) -> ModuleKey {
        ModuleKey::Policy
    }

    fn execute(&self, request: &ChipRequest) -> ModuleOutcome {
        let Some(ctx) = request.context.as_ref().and_then(|c| c.policy()) else {
            return ModuleOutcome::skipped(self.name(), "No policy context provided in request");
        };

        let store = request.config.store();
        let mut chips = Vec::new();
        let mut parts: Vec<String> = Vec::new();

        if let Some(url) = store.and_then(|s| s.policy_link(ctx.policy_type)) {
            chips.push(Chip::new("Read Full Policy", format!("link:{url}"), 90));
            parts.push("linked full policy".into());
        }

        match ctx.policy_type {
            PolicyType::Returns => {
                let label = match store.and_then(|s| s.refund_window()) {
                    Some(window) => format!("Start a Return ({window})"),
                    None => "Start a Return".to_string(),
                };
                chips.push(Chip::new(label, "flow:start_return", 85));
                parts.push("offered return flow".into());
            }
            PolicyType::Shipping => {
                chips.push(Chip::new("Track My Order", "navigate:track_order", 85));
                parts.push("pivoted to order tracking".into());
            }
            PolicyType::Warranty => {
                chips.push(Chip::new("Check Warranty Status", "flow:warranty_check", 85));
                parts.push("offered warranty check".into());
            }
            PolicyType::General => {}
        }

        if let Some(product) = ctx.current_product.as_deref().filter(|p| !p.is_empty()) {
            chips.push(Chip::new(
                format!("View {product}"),
                format!("navigate:product:{product}"),
                75,
            ));
            parts.push(format!("linked back to {product}"));
        }

        // Shopping pivot keeps the session going whatever the answer was.
        chips.push(Chip::new("Back to Shopping", "navigate:shop", 60));
        chips.push(Chip::new("View Best Sellers", "navigate:best_sellers", 55));
        parts.push("added shopping pivot".into());

        let reason = format!("Policy type \"{}\": {}", ctx.policy_type, parts.join(", "));
        ModuleOutcome::fired(self.name(), chips, reason)
    }
}
