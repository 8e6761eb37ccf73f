// Save path for editor state: validate and recompute locally, branch on id
// presence (create vs update), then fold the server's canonical response back
// into the local list. The local list is only ever changed with data the
// backend has accepted; on failure it is left exactly as it was.

use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use super::reconcile::reconcile_by_id;
use crate::core::Result;
use crate::modules::backend::services::CommercialBackend;
use crate::modules::documents::models::{Document, DocumentKind};
use crate::modules::items::models::LineItem;
use crate::modules::items::services::sequence;

/// Persists documents and items through the backend, merging canonical
/// responses into local state.
pub struct SaveReconciler {
    backend: Arc<dyn CommercialBackend>,
    kind: DocumentKind,
}

impl SaveReconciler {
    pub fn new(backend: Arc<dyn CommercialBackend>, kind: DocumentKind) -> Self {
        Self { backend, kind }
    }

    /// Save one line item and merge the canonical result into `items`.
    ///
    /// The item is validated and recomputed before it leaves the process. An
    /// item without an id is created; one with an id is updated. What lands
    /// in `items` is the server's representation, not the submitted one.
    ///
    /// # Returns
    /// * `Result<LineItem>` - The canonical item as the backend stored it
    pub async fn save_item(&self, items: &mut Vec<LineItem>, item: &LineItem) -> Result<LineItem> {
        item.validate()?;

        let mut outgoing = item.clone();
        outgoing.recompute();

        let saved = match outgoing.id {
            None => {
                debug!("Creating {} item (seq {})", self.kind, outgoing.item_seq);
                self.backend.create_item(self.kind, &outgoing).await?
            }
            Some(id) => {
                debug!("Updating {} item {}", self.kind, id);
                self.backend.update_item(self.kind, id, &outgoing).await?
            }
        };

        reconcile_by_id(items, saved.clone());
        info!("Saved {} item {:?}", self.kind, saved.id);
        Ok(saved)
    }

    /// Delete an item by id, then drop it locally and compact the remaining
    /// sequence numbers.
    pub async fn delete_item(&self, items: &mut Vec<LineItem>, id: Uuid) -> Result<()> {
        self.backend.delete_item(self.kind, id).await?;

        items.retain(|item| item.id != Some(id));
        sequence::renumber(items);
        info!("Deleted {} item {}", self.kind, id);
        Ok(())
    }

    /// Save the document header: create when it has no id, update otherwise.
    /// The caller replaces its local copy with the returned canonical one.
    pub async fn save_document(&self, document: &Document) -> Result<Document> {
        document.validate()?;

        let saved = match document.id {
            None => {
                debug!("Creating {}", self.kind);
                self.backend.create_document(self.kind, document).await?
            }
            Some(id) => {
                debug!("Updating {} {}", self.kind, id);
                self.backend.update_document(self.kind, id, document).await?
            }
        };

        info!("Saved {} {:?}", self.kind, saved.id);
        Ok(saved)
    }
}
