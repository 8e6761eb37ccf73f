use crate::modules::items::models::LineItem;

/// Next 1-based sequence number for a new item: highest existing + 1.
///
/// Gaps left by deletions are not reused until the list is renumbered.
pub fn next_item_seq(items: &[LineItem]) -> u32 {
    items.iter().map(|item| item.item_seq).max().unwrap_or(0) + 1
}

/// Compact sequence numbers to 1..=len in the current list order.
pub fn renumber(items: &mut [LineItem]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.item_seq = (index + 1) as u32;
    }
}
