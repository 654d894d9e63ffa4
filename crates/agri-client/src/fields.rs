//! Field store transport.
//!
//! The store is a small REST service:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | list      | `GET {base}/fields` |
//! | create    | `POST {base}/fields` |
//! | update    | `PUT {base}/fields/{id}` |
//! | delete    | `DELETE {base}/fields/{id}?hardDelete={bool}` |
//!
//! Listing answers either a bare array or `{"fields": [...]}`. A soft delete
//! answers the archived record; a hard delete may answer an empty body.

use std::time::Duration;

use agri_core::{Field, FieldId, FieldPayload};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::errors::StoreError;
use crate::http;

/// Characters left unescaped in an id path segment (RFC 3986 unreserved).
const ID_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Field store operations consumed by the field manager.
#[trait_variant::make(FieldsApi: Send)]
pub trait LocalFieldsApi {
    async fn list_fields(&self) -> Result<Vec<Field>, StoreError>;

    async fn create_field(&self, payload: &FieldPayload) -> Result<Field, StoreError>;

    async fn update_field(&self, id: &FieldId, payload: &FieldPayload)
        -> Result<Field, StoreError>;

    /// Archive (`hard_delete == false`) or remove a record.
    ///
    /// Returns the record as the store now holds it, if the store sent one.
    async fn delete_field(&self, id: &FieldId, hard_delete: bool)
        -> Result<Option<Field>, StoreError>;
}

/// Accepted shapes of a list response.
#[derive(Deserialize)]
#[serde(untagged)]
enum FieldList {
    Bare(Vec<Field>),
    Wrapped { fields: Vec<Field> },
}

impl From<FieldList> for Vec<Field> {
    fn from(list: FieldList) -> Self {
        match list {
            FieldList::Bare(fields) | FieldList::Wrapped { fields } => fields,
        }
    }
}

/// reqwest-backed [`FieldsApi`].
#[derive(Debug, Clone)]
pub struct HttpFieldsApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpFieldsApi {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> agri_core::Result<Self> {
        Ok(Self {
            client: http::build_client(timeout)?,
            base_url: http::parse_base_url(base_url)?,
        })
    }

    pub fn with_client(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}fields", self.base_url)
    }

    fn record_url(&self, id: &FieldId) -> String {
        format!(
            "{}fields/{}",
            self.base_url,
            utf8_percent_encode(id.as_str(), ID_SEGMENT)
        )
    }

    /// Send a request and return the status-checked body text.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, StoreError> {
        let response = request.send().await.map_err(|e| {
            warn!("Field store request failed: {}", e);
            StoreError::from_transport(&e)
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StoreError::from_transport(&e))?;

        if !status.is_success() {
            warn!("Field store returned {}", status);
            return Err(StoreError::from_status(status, &body));
        }
        Ok(body)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, StoreError> {
    serde_json::from_str(body).map_err(|e| StoreError::Decode(e.to_string()))
}

impl FieldsApi for HttpFieldsApi {
    async fn list_fields(&self) -> Result<Vec<Field>, StoreError> {
        let url = self.collection_url();
        debug!("GET {}", url);
        let body = self.send(self.client.get(&url)).await?;
        let list: FieldList = decode(&body)?;
        Ok(list.into())
    }

    async fn create_field(&self, payload: &FieldPayload) -> Result<Field, StoreError> {
        let url = self.collection_url();
        debug!("POST {}", url);
        let body = self.send(self.client.post(&url).json(payload)).await?;
        decode(&body)
    }

    async fn update_field(
        &self,
        id: &FieldId,
        payload: &FieldPayload,
    ) -> Result<Field, StoreError> {
        let url = self.record_url(id);
        debug!("PUT {}", url);
        let body = self.send(self.client.put(&url).json(payload)).await?;
        decode(&body)
    }

    async fn delete_field(
        &self,
        id: &FieldId,
        hard_delete: bool,
    ) -> Result<Option<Field>, StoreError> {
        let url = format!("{}?hardDelete={}", self.record_url(id), hard_delete);
        debug!("DELETE {}", url);
        let body = self.send(self.client.delete(&url)).await?;

        // Some stores answer `{"message": "..."}` instead of the record
        if body.trim().is_empty() {
            return Ok(None);
        }
        Ok(serde_json::from_str::<Field>(&body).ok())
    }
}
