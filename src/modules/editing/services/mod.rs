pub mod reconcile;
pub mod retry;
pub mod save_reconciler;
pub mod session;
pub mod totals_reconciler;

pub use reconcile::reconcile_by_id;
pub use retry::{run_with_retry, RetryPolicy};
pub use save_reconciler::SaveReconciler;
pub use session::{DocumentSession, EditState};
pub use totals_reconciler::TotalsReconciler;
