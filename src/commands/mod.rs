//! Firestore Store
//!
//! Remote store adapter over Cloud Firestore's REST API, organized by
//! collection.

mod category;
mod document;
mod error;
mod location;

use std::future::Future;

use async_trait::async_trait;
use location_registry::{Category, Location, LocationFields, LocationStore, StoreResult};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;

use crate::config::FirestoreConfig;
use document::{Document, ErrorEnvelope, ListDocumentsResponse};

pub use error::FirestoreError;

/// Characters escaped inside one URL path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

fn segment(raw: &str) -> String {
    utf8_percent_encode(raw, SEGMENT).to_string()
}

/// Error for a non-2xx answer; the envelope's message when the body has one
fn status_error(status: u16, body: String) -> FirestoreError {
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .map(|envelope| envelope.error.message)
        .unwrap_or(body);
    FirestoreError::Status { status, message }
}

/// Fetch pages until one comes back without a (non-empty) next page token.
/// `fetch` gets the token of the page to request, `None` for the first.
async fn collect_pages<F, Fut>(mut fetch: F) -> Result<Vec<Document>, FirestoreError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<ListDocumentsResponse, FirestoreError>>,
{
    let mut documents = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let page = fetch(page_token.take()).await?;
        documents.extend(page.documents);

        match page.next_page_token.filter(|t| !t.is_empty()) {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }
    Ok(documents)
}

#[derive(Debug, Clone)]
pub struct FirestoreStore {
    client: reqwest::Client,
    config: FirestoreConfig,
}

impl FirestoreStore {
    pub fn new(config: FirestoreConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.config.project_id.is_empty()
    }

    fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/projects/{}/databases/{}/documents/{}",
            self.config.base_url.trim_end_matches('/'),
            segment(&self.config.project_id),
            segment(&self.config.database),
            segment(collection)
        )
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}", self.collection_url(collection), segment(id))
    }

    /// Attach the API key and turn non-2xx answers into `FirestoreError::Status`
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, FirestoreError> {
        let request = if self.config.api_key.is_empty() {
            request
        } else {
            request.query(&[("key", self.config.api_key.as_str())])
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            return Ok(body);
        }

        Err(status_error(status.as_u16(), body))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T, FirestoreError> {
        let body = self.send(request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Every document of a collection, following page tokens
    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, FirestoreError> {
        let url = self.collection_url(collection);
        let page_size = self.config.page_size.to_string();
        let (url, page_size) = (url.as_str(), page_size.as_str());

        collect_pages(move |page_token| {
            let mut request = self.client.get(url).query(&[("pageSize", page_size)]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }
            self.send_json::<ListDocumentsResponse>(request)
        })
        .await
    }

    /// Decode each document, skipping (and logging) the malformed ones
    fn decode_all<T>(
        collection: &str,
        documents: &[Document],
        decode: impl Fn(&Document) -> Result<T, FirestoreError>,
    ) -> Vec<T> {
        documents
            .iter()
            .filter_map(|document| match decode(document) {
                Ok(value) => Some(value),
                Err(e) => {
                    log::warn!(
                        "skipping document {:?} in {}: {}",
                        document.name,
                        collection,
                        e
                    );
                    None
                }
            })
            .collect()
    }
}

#[async_trait(?Send)]
impl LocationStore for FirestoreStore {
    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let collection = &self.config.categories_collection;
        let documents = self
            .list_documents(collection)
            .await
            .map_err(FirestoreError::into_read_error)?;
        Ok(Self::decode_all(collection, &documents, category::decode))
    }

    async fn list_locations(&self) -> StoreResult<Vec<Location>> {
        let collection = &self.config.locations_collection;
        let documents = self
            .list_documents(collection)
            .await
            .map_err(FirestoreError::into_read_error)?;
        Ok(Self::decode_all(collection, &documents, location::decode))
    }

    async fn create_location(&self, fields: &LocationFields) -> StoreResult<String> {
        let request = self
            .client
            .post(self.collection_url(&self.config.locations_collection))
            .json(&location::encode(fields));
        let created: Document = self
            .send_json(request)
            .await
            .map_err(FirestoreError::into_write_error)?;

        created
            .id()
            .map(str::to_string)
            .ok_or_else(|| FirestoreError::MissingName.into_write_error())
    }

    async fn update_location(&self, id: &str, fields: &LocationFields) -> StoreResult<()> {
        let request = self
            .client
            .patch(self.document_url(&self.config.locations_collection, id))
            .query(&[("currentDocument.exists", "true")])
            .json(&location::encode(fields));
        self.send(request)
            .await
            .map(|_| ())
            .map_err(FirestoreError::into_write_error)
    }

    async fn delete_location(&self, id: &str) -> StoreResult<()> {
        let request = self
            .client
            .delete(self.document_url(&self.config.locations_collection, id));
        self.send(request)
            .await
            .map(|_| ())
            .map_err(FirestoreError::into_write_error)
    }
}
