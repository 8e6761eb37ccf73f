use tracing::warn;

use crate::core::Identified;

/// Merge the server's canonical representation into a local list: replace
/// the entry carrying the same id, or append when none matches.
///
/// This is the single merge rule for every save path. Sequence numbers and
/// other display ordinals are never used as identity.
///
/// Returns `true` when an existing entry was replaced.
pub fn reconcile_by_id<T: Identified>(items: &mut Vec<T>, canonical: T) -> bool {
    match canonical.id() {
        Some(id) => {
            if let Some(slot) = items.iter_mut().find(|item| item.id() == Some(id)) {
                *slot = canonical;
                true
            } else {
                items.push(canonical);
                false
            }
        }
        None => {
            // A canonical entity without an id should not happen; keep the
            // data rather than dropping it.
            warn!("Canonical entity carries no id; appending without merge");
            items.push(canonical);
            false
        }
    }
}
