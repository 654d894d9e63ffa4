//! Test utilities for the service transports
//!
//! Provides:
//! - [`spawn_one_shot_server`] - a local HTTP responder for transport tests
//! - [`StubPredictionApi`] - a [`PredictionApi`] that records calls
//! - [`MemoryFieldsApi`] - an in-memory [`FieldsApi`] with failure injection

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use agri_core::{
    Field, FieldId, FieldPayload, FieldStatus, PredictionMode, PredictionPayload,
    PredictionResult,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::errors::{PredictionError, StoreError};
use crate::fields::FieldsApi;
use crate::prediction::PredictionApi;

// ---------------------------------------------------------------------------
// One-shot HTTP server
// ---------------------------------------------------------------------------

/// A request captured by [`spawn_one_shot_server`].
#[derive(Debug, Clone, Default)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

/// Handle to a running one-shot server.
pub struct OneShotServer {
    /// `http://127.0.0.1:{port}/`
    pub base_url: String,
    request_rx: oneshot::Receiver<CapturedRequest>,
}

impl OneShotServer {
    /// Wait for the captured request.
    pub async fn request(self) -> CapturedRequest {
        self.request_rx.await.unwrap_or_default()
    }
}

/// Accept a single connection, capture its request, and answer with
/// `HTTP/1.1 {status_line}` and a JSON `body`.
pub async fn spawn_one_shot_server(status_line: &str, body: &str) -> OneShotServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    let (request_tx, request_rx) = oneshot::channel();

    let response = format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };

        let mut raw = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = match socket.read(&mut chunk).await {
                Ok(0) | Err(_) => break,
                Ok(n) => n,
            };
            raw.extend_from_slice(&chunk[..n]);
            if request_complete(&raw) {
                break;
            }
        }

        let _ = request_tx.send(parse_request(&raw));
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });

    OneShotServer {
        base_url: format!("http://{addr}/"),
        request_rx,
    }
}

/// A base URL on a local port that nothing is listening on.
pub async fn unused_local_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    drop(listener);
    format!("http://{addr}/")
}

fn header_end(raw: &[u8]) -> Option<usize> {
    raw.windows(4).position(|w| w == b"\r\n\r\n").map(|p| p + 4)
}

fn content_length(head: &str) -> usize {
    head.lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.trim()
                .eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse().ok())
                .flatten()
        })
        .unwrap_or(0)
}

fn request_complete(raw: &[u8]) -> bool {
    match header_end(raw) {
        Some(end) => {
            let head = String::from_utf8_lossy(&raw[..end]);
            raw.len() >= end + content_length(&head)
        }
        None => false,
    }
}

fn parse_request(raw: &[u8]) -> CapturedRequest {
    let end = header_end(raw).unwrap_or(raw.len());
    let head = String::from_utf8_lossy(&raw[..end]);
    let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();

    CapturedRequest {
        method: request_line.next().unwrap_or_default().to_string(),
        path: request_line.next().unwrap_or_default().to_string(),
        body: String::from_utf8_lossy(&raw[end..]).to_string(),
    }
}

// ---------------------------------------------------------------------------
// Prediction stub
// ---------------------------------------------------------------------------

/// [`PredictionApi`] returning a fixed outcome and recording every call.
#[derive(Debug)]
pub struct StubPredictionApi {
    outcome: Mutex<Result<PredictionResult, PredictionError>>,
    calls: Mutex<Vec<(PredictionMode, PredictionPayload)>>,
}

impl StubPredictionApi {
    pub fn returning(result: serde_json::Value) -> Self {
        Self {
            outcome: Mutex::new(Ok(PredictionResult::new(result))),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: PredictionError) -> Self {
        Self {
            outcome: Mutex::new(Err(error)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(PredictionMode, PredictionPayload)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }
}

impl PredictionApi for StubPredictionApi {
    async fn predict(
        &self,
        mode: PredictionMode,
        payload: &PredictionPayload,
    ) -> Result<PredictionResult, PredictionError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((mode, payload.clone()));
        }
        match self.outcome.lock() {
            Ok(outcome) => outcome.clone(),
            Err(_) => Err(PredictionError::unexpected("stub poisoned")),
        }
    }
}

// ---------------------------------------------------------------------------
// In-memory field store
// ---------------------------------------------------------------------------

/// One recorded call against [`MemoryFieldsApi`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldsCall {
    List,
    Create(FieldPayload),
    Update(FieldId, FieldPayload),
    Delete { id: FieldId, hard_delete: bool },
}

/// In-memory [`FieldsApi`] mirroring the store's semantics.
#[derive(Debug, Default)]
pub struct MemoryFieldsApi {
    fields: Mutex<Vec<Field>>,
    calls: Mutex<Vec<FieldsCall>>,
    fail_with: Mutex<Option<String>>,
    next_id: AtomicU64,
}

impl MemoryFieldsApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields(fields: Vec<Field>) -> Self {
        let api = Self::new();
        if let Ok(mut stored) = api.fields.lock() {
            *stored = fields;
        }
        api
    }

    /// Make every following call fail with `message`; `None` restores success.
    pub fn set_failure(&self, message: Option<&str>) {
        if let Ok(mut fail) = self.fail_with.lock() {
            *fail = message.map(str::to_string);
        }
    }

    pub fn calls(&self) -> Vec<FieldsCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn fields(&self) -> Vec<Field> {
        self.fields.lock().map(|f| f.clone()).unwrap_or_default()
    }

    fn record(&self, call: FieldsCall) -> Result<(), StoreError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        match self.fail_with.lock().ok().and_then(|f| f.clone()) {
            Some(message) => Err(StoreError::rejected(message)),
            None => Ok(()),
        }
    }

    fn materialize(id: FieldId, payload: &FieldPayload) -> Field {
        Field {
            id,
            field_name: payload.field_name.clone(),
            crop: payload.crop.clone(),
            area: payload.area,
            area_unit: payload.area_unit,
            soil_type: payload.soil_type,
            location: payload.location.clone(),
            description: payload.description.clone(),
            planting_date: payload.planting_date,
            expected_harvest_date: payload.expected_harvest_date,
            status: payload.status,
            logs: Vec::new(),
            expenses: Vec::new(),
            tasks: Vec::new(),
            created_at: Some(chrono::Utc::now()),
        }
    }
}

impl FieldsApi for MemoryFieldsApi {
    async fn list_fields(&self) -> Result<Vec<Field>, StoreError> {
        self.record(FieldsCall::List)?;
        Ok(self.fields())
    }

    async fn create_field(&self, payload: &FieldPayload) -> Result<Field, StoreError> {
        self.record(FieldsCall::Create(payload.clone()))?;
        let id = FieldId::new(format!(
            "mem-{}",
            self.next_id.fetch_add(1, Ordering::SeqCst) + 1
        ));
        let field = Self::materialize(id, payload);
        if let Ok(mut fields) = self.fields.lock() {
            fields.push(field.clone());
        }
        Ok(field)
    }

    async fn update_field(&self, id: &FieldId, payload: &FieldPayload) -> Result<Field, StoreError> {
        self.record(FieldsCall::Update(id.clone(), payload.clone()))?;
        let mut fields = self
            .fields
            .lock()
            .map_err(|_| StoreError::rejected("store poisoned"))?;
        let existing = fields
            .iter_mut()
            .find(|f| &f.id == id)
            .ok_or_else(|| StoreError::rejected(format!("Field {id} not found")))?;

        let mut updated = Self::materialize(id.clone(), payload);
        updated.created_at = existing.created_at;
        updated.logs = std::mem::take(&mut existing.logs);
        updated.expenses = std::mem::take(&mut existing.expenses);
        updated.tasks = std::mem::take(&mut existing.tasks);
        *existing = updated.clone();
        Ok(updated)
    }

    async fn delete_field(
        &self,
        id: &FieldId,
        hard_delete: bool,
    ) -> Result<Option<Field>, StoreError> {
        self.record(FieldsCall::Delete {
            id: id.clone(),
            hard_delete,
        })?;
        let mut fields = self
            .fields
            .lock()
            .map_err(|_| StoreError::rejected("store poisoned"))?;
        let index = fields
            .iter()
            .position(|f| &f.id == id)
            .ok_or_else(|| StoreError::rejected(format!("Field {id} not found")))?;

        if hard_delete {
            fields.remove(index);
            Ok(None)
        } else {
            fields[index].status = FieldStatus::Archived;
            Ok(Some(fields[index].clone()))
        }
    }
}

/// Build a field record for tests.
pub fn test_field(id: &str, name: &str) -> Field {
    Field {
        id: FieldId::new(id),
        field_name: name.to_string(),
        crop: Some("Wheat".to_string()),
        area: 10.0,
        area_unit: agri_core::AreaUnit::Acres,
        soil_type: agri_core::FieldSoilType::Loamy,
        location: agri_core::Location {
            latitude: 12.5,
            longitude: 77.25,
            address: None,
        },
        description: None,
        planting_date: None,
        expected_harvest_date: None,
        status: FieldStatus::Active,
        logs: Vec::new(),
        expenses: Vec::new(),
        tasks: Vec::new(),
        created_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_length_parsing() {
        assert_eq!(content_length("POST / HTTP/1.1\r\nContent-Length: 12\r\n"), 12);
        assert_eq!(content_length("GET / HTTP/1.1\r\nHost: x\r\n"), 0);
    }

    #[test]
    fn test_parse_request() {
        let raw = b"PUT /fields/1 HTTP/1.1\r\nContent-Length: 2\r\n\r\n{}";
        assert!(request_complete(raw));
        let req = parse_request(raw);
        assert_eq!(req.method, "PUT");
        assert_eq!(req.path, "/fields/1");
        assert_eq!(req.body, "{}");
    }

    #[tokio::test]
    async fn test_memory_api_archive_keeps_record() {
        let api = MemoryFieldsApi::with_fields(vec![test_field("a", "Alpha")]);
        let archived = api
            .delete_field(&FieldId::new("a"), false)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(archived.status, FieldStatus::Archived);
        assert_eq!(api.fields().len(), 1);
    }

    #[tokio::test]
    async fn test_memory_api_failure_injection() {
        let api = MemoryFieldsApi::new();
        api.set_failure(Some("store offline"));

        let err = api.list_fields().await.unwrap_err();
        assert_eq!(err.to_string(), "store offline");
        assert_eq!(api.calls(), vec![FieldsCall::List]);
    }
}
