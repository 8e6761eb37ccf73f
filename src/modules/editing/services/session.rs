// Editing session over one commercial document and its items.
//
// The session is the headless counterpart of a document form: it owns the
// local copy of the document, the item list and a single item draft, and it
// enforces the editing protocol around saves:
//
//   - one save in flight at a time (mutating calls take &mut self);
//   - after an optimistic-lock conflict the session parks in ConflictPending
//     and rejects every mutation until recover_from_conflict() has reloaded
//     authoritative state - the optimistic local rows are discarded, never
//     pushed over what the server has;
//   - after each successful item write, parent totals are reconciled from
//     authoritative data; a failure there only marks the totals stale.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use super::retry::{run_with_retry, RetryPolicy};
use super::save_reconciler::SaveReconciler;
use super::totals_reconciler::TotalsReconciler;
use crate::config::EditingConfig;
use crate::core::{AppError, Result};
use crate::modules::backend::services::CommercialBackend;
use crate::modules::documents::models::{Document, DocumentKind};
use crate::modules::documents::services::DocumentTotalsCalculator;
use crate::modules::items::models::{LineItem, UnitType};
use crate::modules::items::services::sequence;

/// Observable editing state, for embedders to drive control enablement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    /// No draft open; items and document may be saved or deleted
    Browsing,
    /// An item draft is open for editing
    Editing,
    /// A save is in flight
    Saving,
    /// A conflict was detected; everything is paused until the reload
    ConflictPending,
}

/// Editing session for one document and its items
pub struct DocumentSession {
    backend: Arc<dyn CommercialBackend>,
    kind: DocumentKind,
    saver: SaveReconciler,
    totals: TotalsReconciler,
    retry_policy: RetryPolicy,
    reload_delay: Duration,
    document: Document,
    items: Vec<LineItem>,
    draft: Option<LineItem>,
    state: EditState,
    totals_stale: bool,
}

impl DocumentSession {
    /// Open a session on an existing document, loading it and its
    /// authoritative items.
    pub async fn open(
        backend: Arc<dyn CommercialBackend>,
        config: &EditingConfig,
        kind: DocumentKind,
        document_id: Uuid,
    ) -> Result<Self> {
        let document = backend.fetch_document(kind, document_id).await?;
        let items = backend.list_items(kind, document_id).await?;

        info!("Opened {} {} with {} items", kind, document_id, items.len());
        Ok(Self::assemble(backend, config, kind, document, items))
    }

    /// Start a session on a brand-new draft document. Items can be added
    /// once the document has been saved and has an id.
    pub fn start(
        backend: Arc<dyn CommercialBackend>,
        config: &EditingConfig,
        kind: DocumentKind,
    ) -> Self {
        Self::assemble(backend, config, kind, Document::new(), Vec::new())
    }

    fn assemble(
        backend: Arc<dyn CommercialBackend>,
        config: &EditingConfig,
        kind: DocumentKind,
        document: Document,
        items: Vec<LineItem>,
    ) -> Self {
        Self {
            saver: SaveReconciler::new(Arc::clone(&backend), kind),
            totals: TotalsReconciler::new(Arc::clone(&backend), kind),
            retry_policy: RetryPolicy::from(config),
            reload_delay: Duration::from_millis(config.conflict_reload_delay_ms),
            backend,
            kind,
            document,
            items,
            draft: None,
            state: EditState::Browsing,
            totals_stale: false,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn draft(&self) -> Option<&LineItem> {
        self.draft.as_ref()
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    /// Whether the parent totals failed to reconcile after the last write
    /// and may lag behind the items until the next successful one.
    pub fn totals_stale(&self) -> bool {
        self.totals_stale
    }

    // Draft workflow

    /// Open a blank draft positioned after the last item.
    pub fn new_item(&mut self) -> Result<&LineItem> {
        self.ensure_mutable()?;
        if self.state == EditState::Editing {
            return Err(AppError::validation("An item is already being edited"));
        }

        let document_id = self.document.id.ok_or_else(|| {
            AppError::validation("Save the document before adding items")
        })?;

        let draft = self
            .draft
            .insert(LineItem::new(document_id, sequence::next_item_seq(&self.items)));
        self.state = EditState::Editing;
        Ok(draft)
    }

    /// Open an existing item for editing, working on a copy until saved.
    pub fn edit_item(&mut self, id: Uuid) -> Result<&LineItem> {
        self.ensure_mutable()?;
        if self.state == EditState::Editing {
            return Err(AppError::validation("An item is already being edited"));
        }

        let item = self
            .items
            .iter()
            .find(|item| item.id == Some(id))
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Item {}", id)))?;

        let draft = self.draft.insert(item);
        self.state = EditState::Editing;
        Ok(draft)
    }

    /// Discard the open draft without saving.
    pub fn cancel_edit(&mut self) {
        if self.state == EditState::Editing {
            self.draft = None;
            self.state = EditState::Browsing;
        }
    }

    // Draft field setters. The three numeric inputs recompute both derived
    // fields synchronously; the descriptive setters leave them untouched.

    pub fn set_quantity(&mut self, quantity: Option<Decimal>) -> Result<()> {
        let draft = self.draft_mut()?;
        draft.quantity = quantity;
        draft.recompute();
        Ok(())
    }

    pub fn set_unit_price(&mut self, unit_price: Option<Decimal>) -> Result<()> {
        let draft = self.draft_mut()?;
        draft.unit_price = unit_price;
        draft.recompute();
        Ok(())
    }

    pub fn set_discount_percentage(&mut self, discount_percentage: Option<Decimal>) -> Result<()> {
        let draft = self.draft_mut()?;
        draft.discount_percentage = discount_percentage;
        draft.recompute();
        Ok(())
    }

    pub fn set_product(&mut self, product_id: Option<Uuid>) -> Result<()> {
        self.draft_mut()?.set_product(product_id);
        Ok(())
    }

    pub fn set_service(&mut self, service_id: Option<Uuid>) -> Result<()> {
        self.draft_mut()?.set_service(service_id);
        Ok(())
    }

    pub fn set_description(&mut self, description: Option<String>) -> Result<()> {
        self.draft_mut()?.description = description;
        Ok(())
    }

    pub fn set_unit_type(&mut self, unit_type: Option<UnitType>) -> Result<()> {
        self.draft_mut()?.unit_type = unit_type;
        Ok(())
    }

    pub fn set_observation(&mut self, observation: Option<String>) -> Result<()> {
        self.draft_mut()?.observation = observation;
        Ok(())
    }

    fn draft_mut(&mut self) -> Result<&mut LineItem> {
        self.ensure_mutable()?;
        self.draft
            .as_mut()
            .ok_or_else(|| AppError::validation("No item is being edited"))
    }

    // Persistence

    /// Save the open draft through the backend and merge the canonical
    /// result into the item list, then reconcile parent totals.
    ///
    /// On a conflict the session parks in `ConflictPending` and the local
    /// list stays untouched; any other failure returns to `Editing` so the
    /// draft can be corrected and resubmitted.
    pub async fn save_draft(&mut self) -> Result<LineItem> {
        self.ensure_mutable()?;
        let draft = self
            .draft
            .clone()
            .ok_or_else(|| AppError::validation("No item draft to save"))?;

        self.state = EditState::Saving;
        match self.saver.save_item(&mut self.items, &draft).await {
            Ok(saved) => {
                self.draft = None;
                self.state = EditState::Browsing;
                self.refresh_totals().await;
                Ok(saved)
            }
            Err(error) if error.is_conflict() => {
                self.state = EditState::ConflictPending;
                warn!("{} save hit a conflict: {}", self.kind, error);
                Err(error)
            }
            Err(error) => {
                self.state = EditState::Editing;
                Err(error)
            }
        }
    }

    /// Delete an item, drop it locally, and reconcile parent totals.
    pub async fn delete_item(&mut self, id: Uuid) -> Result<()> {
        self.ensure_mutable()?;

        self.saver.delete_item(&mut self.items, id).await?;
        if self.draft.as_ref().and_then(|draft| draft.id) == Some(id) {
            self.cancel_edit();
        }
        self.refresh_totals().await;
        Ok(())
    }

    /// Save the document header, deriving the document-level discount and
    /// the freight-adjusted total first. The local copy is replaced with the
    /// server's canonical one.
    pub async fn save_document(&mut self) -> Result<()> {
        self.ensure_mutable()?;

        let totals = DocumentTotalsCalculator::aggregate(&self.items);
        self.document.financial.discount_value = DocumentTotalsCalculator::derive_discount_value(
            totals.total_document,
            self.document.financial.discount_percentage,
        );
        self.document.apply_totals(&totals);
        self.document.total_document =
            DocumentTotalsCalculator::apply_financial(&totals, &self.document.financial);

        self.state = EditState::Saving;
        match self.saver.save_document(&self.document).await {
            Ok(saved) => {
                self.document = saved;
                self.state = EditState::Browsing;
                Ok(())
            }
            Err(error) if error.is_conflict() => {
                self.state = EditState::ConflictPending;
                warn!("{} save hit a conflict: {}", self.kind, error);
                Err(error)
            }
            Err(error) => {
                self.state = EditState::Browsing;
                Err(error)
            }
        }
    }

    /// Wait out the reload delay, then replace all local state with the
    /// backend's authoritative copy and resume editing.
    ///
    /// The reload reads are retried on conflict classification; if they
    /// still fail the session stays parked and the call can be repeated.
    pub async fn recover_from_conflict(&mut self) -> Result<()> {
        if self.state != EditState::ConflictPending {
            return Err(AppError::validation("No conflict to recover from"));
        }

        let document_id = self
            .document
            .id
            .ok_or_else(|| AppError::validation("Conflicted document has no id to reload"))?;

        tokio::time::sleep(self.reload_delay).await;

        let backend = Arc::clone(&self.backend);
        let kind = self.kind;
        let document = run_with_retry(&self.retry_policy, "document reload", || {
            let backend = Arc::clone(&backend);
            async move { backend.fetch_document(kind, document_id).await }
        })
        .await?;

        let items = run_with_retry(&self.retry_policy, "item reload", || {
            let backend = Arc::clone(&backend);
            async move { backend.list_items(kind, document_id).await }
        })
        .await?;

        self.document = document;
        self.items = items;
        self.draft = None;
        self.totals_stale = false;
        self.state = EditState::Browsing;

        info!(
            "Reloaded {} {} after conflict ({} items)",
            self.kind,
            document_id,
            self.items.len()
        );
        Ok(())
    }

    /// Reconcile parent totals from authoritative data; a failure is logged
    /// and marks the totals stale instead of unwinding the caller.
    async fn refresh_totals(&mut self) {
        let Some(document_id) = self.document.id else {
            return;
        };

        match self.totals.reconcile(document_id).await {
            Ok(document) => {
                self.document = document;
                self.totals_stale = false;
            }
            Err(error) => {
                warn!(
                    "Totals reconciliation failed for {} {}: {}",
                    self.kind, document_id, error
                );
                self.totals_stale = true;
            }
        }
    }

    fn ensure_mutable(&self) -> Result<()> {
        if self.state == EditState::ConflictPending {
            return Err(AppError::validation(
                "Editing is paused until the document is reloaded after a conflict",
            ));
        }

        if !self.document.is_editable() {
            return Err(AppError::validation(format!(
                "A {} document does not accept edits",
                self.document.status
            )));
        }

        Ok(())
    }
}
