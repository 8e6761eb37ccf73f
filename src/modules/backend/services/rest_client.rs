// REST implementation of the backend seam.
//
// URL shape, shared by every collection:
//   GET    {base}/{collection}/{id}
//   POST   {base}/{collection}
//   PUT    {base}/{collection}/{id}           (full document or partial totals)
//   GET    {base}/{collection}/items?parentId={id}
//   POST   {base}/{collection}/items
//   PUT    {base}/{collection}/items/{id}
//   DELETE {base}/{collection}/items/{id}

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use super::backend_api::CommercialBackend;
use crate::config::BackendConfig;
use crate::core::error::{is_conflict_message, AppError, Result};
use crate::modules::backend::models::{ApiErrorBody, ListEnvelope};
use crate::modules::documents::models::{Document, DocumentKind, DocumentTotals};
use crate::modules::items::models::LineItem;

/// REST client for the ERP backend
pub struct RestBackend {
    client: Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl RestBackend {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer_token: config.bearer_token.clone(),
        })
    }

    fn collection_url(&self, kind: DocumentKind) -> String {
        format!("{}/{}", self.base_url, kind.collection())
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Map a non-success response onto the error taxonomy, preserving the
    /// backend's message verbatim for validation and conflict errors.
    ///
    /// A 404 is classified before the conflict check: a vanished resource is
    /// not a concurrency conflict no matter what its message says.
    async fn classify_failure(response: Response) -> AppError {
        let status = response.status();
        let raw = response.text().await.unwrap_or_default();
        let mut message = ApiErrorBody::extract_message(&raw);
        if message.is_empty() {
            message = status.to_string();
        }

        if status == StatusCode::NOT_FOUND {
            return AppError::not_found(message);
        }

        if status == StatusCode::CONFLICT || is_conflict_message(&message) {
            return AppError::conflict(message);
        }

        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                AppError::validation(message)
            }
            _ => AppError::backend(format!("{}: {}", status, message)),
        }
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T> {
        if !response.status().is_success() {
            return Err(Self::classify_failure(response).await);
        }

        Ok(response.json::<T>().await?)
    }

    async fn expect_success(response: Response) -> Result<()> {
        if !response.status().is_success() {
            return Err(Self::classify_failure(response).await);
        }

        Ok(())
    }

    async fn send_json<B, T>(&self, method: Method, url: String, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.request(method, url).json(body).send().await?;
        Self::parse(response).await
    }
}

#[async_trait]
impl CommercialBackend for RestBackend {
    async fn fetch_document(&self, kind: DocumentKind, id: Uuid) -> Result<Document> {
        let url = format!("{}/{}", self.collection_url(kind), id);
        debug!("Fetching {} {}", kind, id);

        let response = self.request(Method::GET, url).send().await?;
        Self::parse(response).await
    }

    async fn create_document(&self, kind: DocumentKind, document: &Document) -> Result<Document> {
        let url = self.collection_url(kind);
        debug!("Creating {}", kind);

        self.send_json(Method::POST, url, document).await
    }

    async fn update_document(
        &self,
        kind: DocumentKind,
        id: Uuid,
        document: &Document,
    ) -> Result<Document> {
        let url = format!("{}/{}", self.collection_url(kind), id);
        debug!("Updating {} {}", kind, id);

        self.send_json(Method::PUT, url, document).await
    }

    async fn update_totals(
        &self,
        kind: DocumentKind,
        id: Uuid,
        totals: &DocumentTotals,
    ) -> Result<Document> {
        let url = format!("{}/{}", self.collection_url(kind), id);
        debug!("Writing totals for {} {}", kind, id);

        self.send_json(Method::PUT, url, totals).await
    }

    async fn list_items(&self, kind: DocumentKind, parent_id: Uuid) -> Result<Vec<LineItem>> {
        let url = format!("{}/items?parentId={}", self.collection_url(kind), parent_id);
        debug!("Listing items for {} {}", kind, parent_id);

        let response = self.request(Method::GET, url).send().await?;
        let value: serde_json::Value = Self::parse(response).await?;
        let envelope = ListEnvelope::<LineItem>::from_value(value)?;
        Ok(envelope.into_items())
    }

    async fn create_item(&self, kind: DocumentKind, item: &LineItem) -> Result<LineItem> {
        let url = format!("{}/items", self.collection_url(kind));
        debug!("Creating {} item (seq {})", kind, item.item_seq);

        self.send_json(Method::POST, url, item).await
    }

    async fn update_item(&self, kind: DocumentKind, id: Uuid, item: &LineItem) -> Result<LineItem> {
        let url = format!("{}/items/{}", self.collection_url(kind), id);
        debug!("Updating {} item {}", kind, id);

        self.send_json(Method::PUT, url, item).await
    }

    async fn delete_item(&self, kind: DocumentKind, id: Uuid) -> Result<()> {
        let url = format!("{}/items/{}", self.collection_url(kind), id);
        debug!("Deleting {} item {}", kind, id);

        let response = self.request(Method::DELETE, url).send().await?;
        Self::expect_success(response).await
    }
}
