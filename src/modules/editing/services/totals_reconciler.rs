use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::core::Result;
use crate::modules::backend::services::CommercialBackend;
use crate::modules::documents::models::{Document, DocumentKind};
use crate::modules::documents::services::DocumentTotalsCalculator;

/// Recomputes a document's totals from the backend's authoritative item list
/// and writes them back onto the parent.
///
/// Local optimistic state is deliberately not an input: only items the
/// backend has already accepted count toward the parent totals. A failure
/// here leaves the parent stale, never inconsistent; callers treat it as
/// non-fatal.
pub struct TotalsReconciler {
    backend: Arc<dyn CommercialBackend>,
    kind: DocumentKind,
}

impl TotalsReconciler {
    pub fn new(backend: Arc<dyn CommercialBackend>, kind: DocumentKind) -> Self {
        Self { backend, kind }
    }

    /// Fetch authoritative items, aggregate them, and write the totals to
    /// the parent.
    ///
    /// # Returns
    /// * `Result<Document>` - The canonical parent after the totals write
    pub async fn reconcile(&self, document_id: Uuid) -> Result<Document> {
        let items = self.backend.list_items(self.kind, document_id).await?;
        let totals = DocumentTotalsCalculator::aggregate(&items);

        let document = self
            .backend
            .update_totals(self.kind, document_id, &totals)
            .await?;

        info!(
            "Reconciled totals for {} {} (products {}, services {}, document {})",
            self.kind,
            document_id,
            totals.total_products,
            totals.total_services,
            totals.total_document
        );

        Ok(document)
    }
}
