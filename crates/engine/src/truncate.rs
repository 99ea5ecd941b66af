//! Channel truncation.

use smartchip_core::{Channel, Chip};

/// Keep at most `limit` chips, preserving order.
pub fn truncate_chips(mut chips: Vec<Chip>, limit: usize) -> Vec<Chip> {
    chips.truncate(limit);
    chips
}

/// Keep at most as many chips as `channel` can display.
pub fn truncate_for_channel(chips: Vec<Chip>, channel: Channel) -> Vec<Chip> {
    truncate_chips(chips, channel.limit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chips(n: i32) -> Vec<Chip> {
        (0..n).map(|i| Chip::new(format!("c{i}"), "x", 100 - i)).collect()
    }

    #[test]
    fn whatsapp_keeps_three() {
        let kept = truncate_for_channel(chips(5), Channel::Whatsapp);
        let labels: Vec<&str> = kept.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["c0", "c1", "c2"]);
    }

    #[test]
    fn web_keeps_six() {
        assert_eq!(truncate_for_channel(chips(9), Channel::Web).len(), 6);
    }

    #[test]
    fn short_lists_are_untouched() {
        assert_eq!(truncate_for_channel(chips(2), Channel::Whatsapp).len(), 2);
        assert!(truncate_chips(Vec::new(), 6).is_empty());
    }
}
