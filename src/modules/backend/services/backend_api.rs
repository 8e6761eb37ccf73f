use async_trait::async_trait;
use uuid::Uuid;

use crate::core::Result;
use crate::modules::documents::models::{Document, DocumentKind, DocumentTotals};
use crate::modules::items::models::LineItem;

/// Client-side seam for the ERP backend that owns all commercial documents.
///
/// The REST implementation talks to the real service over HTTP; tests
/// substitute an in-process double. Every mutating call returns the server's
/// canonical representation, which callers merge into local state instead of
/// trusting what they sent.
#[async_trait]
pub trait CommercialBackend: Send + Sync {
    /// Fetch one document by id.
    async fn fetch_document(&self, kind: DocumentKind, id: Uuid) -> Result<Document>;

    /// Create a document.
    async fn create_document(&self, kind: DocumentKind, document: &Document) -> Result<Document>;

    /// Update a document by id, echoing its optimistic-lock version.
    async fn update_document(
        &self,
        kind: DocumentKind,
        id: Uuid,
        document: &Document,
    ) -> Result<Document>;

    /// Write the three derived totals onto the parent without touching any
    /// other field.
    async fn update_totals(
        &self,
        kind: DocumentKind,
        id: Uuid,
        totals: &DocumentTotals,
    ) -> Result<Document>;

    /// Authoritative item list for a document.
    async fn list_items(&self, kind: DocumentKind, parent_id: Uuid) -> Result<Vec<LineItem>>;

    /// Create an item.
    async fn create_item(&self, kind: DocumentKind, item: &LineItem) -> Result<LineItem>;

    /// Update an item by id.
    async fn update_item(&self, kind: DocumentKind, id: Uuid, item: &LineItem) -> Result<LineItem>;

    /// Delete an item by id.
    async fn delete_item(&self, kind: DocumentKind, id: Uuid) -> Result<()>;
}
