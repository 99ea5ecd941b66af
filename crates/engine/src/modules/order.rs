//! Order: order-tracking chips for the `track_order` intent.
//!
//! Unknown shoppers are offered a way to identify themselves.  Known
//! shoppers get one tracking chip per active order, plus issue and return
//! chips when something has been delivered.  A configured support line
//! always adds an agent handoff.

use crate::module::{ChipModule, ModuleOutcome};
use smartchip_core::{AuthState, Chip, ChipRequest, ModuleKey, OrderStatus};

pub struct OrderModule;

/// Priority of the first tracking chip; each later one is one lower.
const TRACK_PRIORITY: i32 = 85;

impl ChipModule for OrderModule {
    fn name(&self) -> &'static str {
        "OrderModule"
    }

    fn config_key(&self) -> ModuleKey {
        ModuleKey::Order
    }

    fn execute(&self, request: &ChipRequest) -> ModuleOutcome {
        let Some(ctx) = request.context.as_ref().and_then(|c| c.order()) else {
            return ModuleOutcome::skipped(self.name(), "No order context provided in request");
        };

        let support_phone = request.config.store().and_then(|s| s.support_phone());
        let agent_chip = support_phone
            .map(|phone| Chip::new("Talk to Agent", format!("handoff:phone:{phone}"), 60));

        if ctx.auth_state == AuthState::Unknown {
            let mut chips = vec![
                Chip::new("Login with Phone", "auth:phone_login", 95),
                Chip::new("Enter Order ID", "auth:manual_order_id", 90),
            ];
            let handoff = if agent_chip.is_some() { " + agent handoff" } else { "" };
            chips.extend(agent_chip);
            return ModuleOutcome::fired(
                self.name(),
                chips,
                format!("User unknown: offered login + manual entry{handoff}"),
            );
        }

        let active: Vec<_> = ctx
            .recent_orders
            .iter()
            .filter(|o| o.status != OrderStatus::Returned)
            .collect();
        let delivered: Vec<_> = ctx
            .recent_orders
            .iter()
            .filter(|o| o.status == OrderStatus::Delivered)
            .collect();

        let mut chips: Vec<Chip> = active
            .iter()
            .enumerate()
            .map(|(i, order)| {
                let offset = i32::try_from(i).unwrap_or(i32::MAX);
                Chip::new(
                    format!("Track #{}", order.id),
                    format!("track_specific_order:{}", order.id),
                    TRACK_PRIORITY.saturating_sub(offset),
                )
            })
            .collect();

        if let Some(first) = delivered.first() {
            chips.push(Chip::new("Report Issue", format!("report_issue:{}", first.id), 75));
            chips.push(Chip::new("Return Item", format!("start_return:{}", first.id), 70));
        }

        chips.extend(agent_chip);

        let reason = format!(
            "User known: {} active order(s), {} delivered",
            active.len(),
            delivered.len()
        );
        ModuleOutcome::fired(self.name(), chips, reason)
    }
}
