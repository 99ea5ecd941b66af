//! Sort: suggest rating order when enough results carry a rating.

use crate::format;
use crate::module::{ChipModule, ModuleOutcome};
use smartchip_core::{Chip, ChipRequest, ModuleKey};

pub struct SortModule;

impl ChipModule for SortModule {
    fn name(&self) -> &'static str {
        "SortModule"
    }

    fn config_key(&self) -> ModuleKey {
        ModuleKey::Sort
    }

    fn execute(&self, request: &ChipRequest) -> ModuleOutcome {
        let coverage = request.stats.rating_coverage;
        let threshold = request.config.thresholds.rating_threshold;

        if coverage > threshold {
            ModuleOutcome::fired(
                self.name(),
                vec![Chip::new("Best Rated", "sort:rating_desc", 80)],
                format!(
                    "Rating coverage {}% exceeds threshold {}%",
                    format::percent(coverage),
                    format::percent(threshold)
                ),
            )
        } else {
            ModuleOutcome::skipped(
                self.name(),
                format!(
                    "Rating coverage {}% below threshold {}%",
                    format::percent(coverage),
                    format::percent(threshold)
                ),
            )
        }
    }
}
