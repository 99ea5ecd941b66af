//! Cart: checkout chips for the `checkout_help` intent.

use crate::format;
use crate::module::{ChipModule, ModuleOutcome};
use smartchip_core::{Chip, ChipRequest, ModuleKey};

pub struct CartModule;

/// Payment method that must be offered by the cart for the COD chip.
const COD_METHOD: &str = "cod";

fn currency_symbol(currency: &str) -> &str {
    if currency == "USD" { "$" } else { currency }
}

impl ChipModule for CartModule {
    fn name(&self) -> &'static str {
        "CartModule"
    }

    fn config_key(&self) -> ModuleKey {
        ModuleKey::Cart
    }

    fn execute(&self, request: &ChipRequest) -> ModuleOutcome {
        let Some(ctx) = request.context.as_ref().and_then(|c| c.cart()) else {
            return ModuleOutcome::skipped(self.name(), "No cart context provided in request");
        };

        let store = request.config.store();
        let sym = currency_symbol(&ctx.currency);

        if ctx.cart_count == 0.0 {
            return ModuleOutcome::fired(
                self.name(),
                vec![
                    Chip::new("Browse Products", "navigate:shop", 90),
                    Chip::new("View Deals", "navigate:deals", 85),
                ],
                "Cart empty: offered browse + deals to recover session",
            );
        }

        let value = format::fixed(ctx.cart_value, 2);
        let mut chips = vec![Chip::new(
            format!("Checkout ({sym}{value})"),
            "checkout:proceed",
            95,
        )];

        let threshold = store.and_then(|s| s.free_shipping_threshold());
        if let Some(threshold) = threshold.filter(|t| ctx.cart_value < *t) {
            let diff = format::fixed(threshold - ctx.cart_value, 2);
            chips.push(Chip::new(
                format!("Add {sym}{diff} for Free Ship"),
                format!("navigate:upsell:{diff}"),
                85,
            ));
        }

        let cod_enabled = store.is_some_and(|s| s.cod_enabled());
        if cod_enabled && ctx.payment_methods.iter().any(|m| m == COD_METHOD) {
            chips.push(Chip::new("Pay with Cash (COD)", "checkout:cod", 80));
        }

        chips.push(Chip::new("View Cart", "navigate:cart", 70));

        let shipping_note = threshold
            .map(|t| format!(" (free shipping at {sym}{})", format::number(t)))
            .unwrap_or_default();
        let reason = format!(
            "Cart has {} item(s) worth {sym}{value}{shipping_note}",
            format::number(ctx.cart_count)
        );
        ModuleOutcome::fired(self.name(), chips, reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::test_helpers::{intent_request, labels};
    use smartchip_core::{CartContext, StoreConfig};

    fn cart(count: f64, value: f64, currency: &str, methods: &[&str]) -> CartContext {
        CartContext {
            cart_count: count,
            cart_value: value,
            currency: currency.into(),
            payment_methods: methods.iter().map(|m| (*m).to_string()).collect(),
        }
    }

    fn store(enable_cod: Option<bool>, free_shipping_threshold: Option<f64>) -> StoreConfig {
        StoreConfig {
            enable_cod,
            free_shipping_threshold,
            ..StoreConfig::default()
        }
    }

    fn run(ctx: CartContext, store: StoreConfig) -> ModuleOutcome {
        CartModule.execute(&intent_request(Some(ctx.into()), store))
    }

    #[test]
    fn missing_context_does_not_fire() {
        let out = CartModule.execute(&intent_request(None, StoreConfig::default()));
        assert!(!out.trace.fired);
        assert_eq!(out.trace.reason, "No cart context provided in request");
    }

    #[test]
    fn empty_cart_offers_browse_and_deals_only() {
        let out = run(
            cart(0.0, 0.0, "USD", &["stripe", "cod"]),
            store(Some(true), Some(50.0)),
        );
        assert!(out.trace.fired);
        assert_eq!(labels(&out.chips), vec!["Browse Products", "View Deals"]);
        assert_eq!(out.chips[0].action, "navigate:shop");
        assert_eq!(out.chips[1].action, "navigate:deals");
    }

    #[test]
    fn full_cart_offers_checkout_upsell_cod_and_view_cart() {
        let out = run(
            cart(3.0, 45.0, "USD", &["stripe", "cod"]),
            store(Some(true), Some(50.0)),
        );
        assert_eq!(out.chips, vec![
            Chip::new("Checkout ($45.00)", "checkout:proceed", 95),
            Chip::new("Add $5.00 for Free Ship", "navigate:upsell:5.00", 85),
            Chip::new("Pay with Cash (COD)", "checkout:cod", 80),
            Chip::new("View Cart", "navigate:cart", 70),
        ]);
        assert_eq!(
            out.trace.reason,
            "Cart has 3 item(s) worth $45.00 (free shipping at $50)"
        );
    }

    #[test]
    fn no_upsell_at_or_above_threshold() {
        let out = run(cart(5.0, 75.0, "USD", &["stripe"]), store(None, Some(50.0)));
        assert!(!out.chips.iter().any(|c| c.action.starts_with("navigate:upsell")));
        let out = run(cart(5.0, 50.0, "USD", &["stripe"]), store(None, Some(50.0)));
        assert!(!out.chips.iter().any(|c| c.action.starts_with("navigate:upsell")));
    }

    #[test]
    fn cod_needs_store_flag_and_payment_method() {
        let out = run(cart(1.0, 30.0, "USD", &["stripe", "cod"]), store(Some(false), None));
        assert!(!labels(&out.chips).contains(&"Pay with Cash (COD)"));
        let out = run(cart(1.0, 30.0, "USD", &["stripe"]), store(Some(true), None));
        assert!(!labels(&out.chips).contains(&"Pay with Cash (COD)"));
    }

    #[test]
    fn non_usd_currency_is_used_verbatim() {
        let out = run(cart(2.0, 1200.0, "INR", &[]), store(None, Some(1500.0)));
        assert_eq!(out.chips[0].label, "Checkout (INR1200.00)");
        assert_eq!(out.chips[1].label, "Add INR300.00 for Free Ship");
        assert_eq!(
            out.trace.reason,
            "Cart has 2 item(s) worth INR1200.00 (free shipping at INR1500)"
        );
    }

    #[test]
    fn zero_threshold_is_unset() {
        let out = run(cart(1.0, 10.0, "USD", &[]), store(None, Some(0.0)));
        assert_eq!(labels(&out.chips), vec!["Checkout ($10.00)", "View Cart"]);
        assert_eq!(out.trace.reason, "Cart has 1 item(s) worth $10.00");
    }

    #[test]
    fn half_cent_cart_value_rounds_up() {
        let out = run(cart(1.0, 10.125, "USD", &[]), store(None, None));
        assert_eq!(out.chips[0].label, "Checkout ($10.13)");
        assert_eq!(out.trace.reason, "Cart has 1 item(s) worth $10.13");
    }
}
