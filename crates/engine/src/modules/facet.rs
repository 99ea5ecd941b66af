//! Facet: offer filter chips for facets whose results are meaningfully split.

use crate::format;
use crate::module::{ChipModule, ModuleOutcome};
use smartchip_core::{Chip, ChipRequest, ModuleKey};

pub struct FacetModule;

/// A facet contributes only when at least this many values qualify.
const MIN_QUALIFYING_VALUES: usize = 2;

impl ChipModule for FacetModule {
    fn name(&self) -> &'static str {
        "FacetModule"
    }

    fn config_key(&self) -> ModuleKey {
        ModuleKey::Facet
    }

    fn execute(&self, request: &ChipRequest) -> ModuleOutcome {
        let threshold = request.config.thresholds.facet_threshold;
        let mut chips = Vec::new();

        for facet in &request.stats.facets {
            let qualifying: Vec<_> = facet.values.iter().filter(|v| v.share > threshold).collect();
            if qualifying.len() < MIN_QUALIFYING_VALUES {
                continue;
            }
            chips.extend(qualifying.into_iter().map(|v| {
                Chip::new(
                    v.value.clone(),
                    format!("filter_facet:{}:{}", facet.name, v.value),
                    70 + (v.share * 10.0).round() as i32,
                )
            }));
        }

        if chips.is_empty() {
            return ModuleOutcome::skipped(
                self.name(),
                format!(
                    "No facet had 2+ values exceeding {}% share threshold",
                    format::percent(threshold)
                ),
            );
        }

        let reason = format!(
            "Generated {} chips from facets exceeding {}% share",
            chips.len(),
            format::percent(threshold)
        );
        ModuleOutcome::fired(self.name(), chips, reason)
    }
}
