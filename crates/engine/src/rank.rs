//! Chip ranking.

use smartchip_core::Chip;

/// Sort chips by priority, highest first.
///
/// The sort is stable: chips of equal priority keep their pool order,
/// which is registry order and then emission order within a module.
pub fn rank_chips(mut chips: Vec<Chip>) -> Vec<Chip> {
    chips.sort_by(|a, b| b.priority.cmp(&a.priority));
    chips
}
