//! Budget: offer a price cap when the result set spans a wide price range.

use crate::format;
use crate::module::{ChipModule, ModuleOutcome};
use smartchip_core::{Chip, ChipRequest, ModuleKey};

pub struct BudgetModule;

impl ChipModule for BudgetModule {
    fn name(&self) -> &'static str {
        "BudgetModule"
    }

    fn config_key(&self) -> ModuleKey {
        ModuleKey::Budget
    }

    fn execute(&self, request: &ChipRequest) -> ModuleOutcome {
        let stats = &request.stats;
        let threshold = request.config.thresholds.variance;

        if stats.price_min <= 0.0 {
            return ModuleOutcome::skipped(
                self.name(),
                format!(
                    "price_min is {}, cannot compute variance ratio",
                    format::number(stats.price_min)
                ),
            );
        }

        let ratio = stats.price_max / stats.price_min;
        if ratio > threshold {
            let median = stats.price_median;
            ModuleOutcome::fired(
                self.name(),
                vec![Chip::new(
                    format!("Under {}", format::price(median)),
                    format!("filter_price_max:{}", format::number(median)),
                    90,
                )],
                format!(
                    "Variance ratio {}x exceeds threshold {}x",
                    format::fixed(ratio, 1),
                    format::number(threshold)
                ),
            )
        } else {
            ModuleOutcome::skipped(
                self.name(),
                format!(
                    "Variance ratio {}x below threshold {}x",
                    format::fixed(ratio, 1),
                    format::number(threshold)
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::test_helpers::discovery_request;
    use smartchip_core::SearchStats;

    fn stats(min: f64, max: f64, median: f64) -> SearchStats {
        SearchStats {
            price_min: min,
            price_max: max,
            price_median: median,
            ..SearchStats::default()
        }
    }

    #[test]
    fn fires_on_wide_spread() {
        let out = BudgetModule.execute(&discovery_request(stats(100.0, 1000.0, 450.0)));
        assert!(out.trace.fired);
        assert_eq!(out.chips, vec![Chip::new("Under $450", "filter_price_max:450", 90)]);
        assert!(out.trace.reason.contains("10.0"));
        assert_eq!(out.trace.module, "BudgetModule");
    }

    #[test]
    fn ratio_equal_to_threshold_does_not_fire() {
        let out = BudgetModule.execute(&discovery_request(stats(100.0, 200.0, 150.0)));
        assert!(!out.trace.fired);
        assert!(out.chips.is_empty());
        assert_eq!(out.trace.reason, "Variance ratio 2.0x below threshold 2x");
    }

    #[test]
    fn zero_price_min_is_reported() {
        let out = BudgetModule.execute(&discovery_request(stats(0.0, 100.0, 50.0)));
        assert!(!out.trace.fired);
        assert!(out.trace.reason.contains("price_min is 0"));
    }

    #[test]
    fn fractional_median_renders_two_decimals() {
        let out = BudgetModule.execute(&discovery_request(stats(10.0, 100.0, 49.5)));
        assert_eq!(out.chips[0].label, "Under $49.50");
        assert_eq!(out.chips[0].action, "filter_price_max:49.5");
    }

    #[test]
    fn ratio_on_a_half_rounds_up() {
        let out = BudgetModule.execute(&discovery_request(stats(4.0, 9.0, 6.0)));
        assert!(out.trace.fired);
        assert_eq!(out.trace.reason, "Variance ratio 2.3x exceeds threshold 2x");
    }
}
