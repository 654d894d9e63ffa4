//! Prediction service transport.
//!
//! Each [`PredictionMode`] has its own endpoint, `{base_url}/{slug}/`, that
//! accepts a [`PredictionPayload`] and answers `{"result": <scalar>}`.
//! One call is one attempt: there are no retries.

use std::time::Duration;

use agri_core::{PredictionMode, PredictionPayload, PredictionResult};
use tracing::{debug, info, warn};
use url::Url;

use crate::errors::PredictionError;
use crate::http;

/// Prediction operations consumed by the form controller.
#[trait_variant::make(PredictionApi: Send)]
pub trait LocalPredictionApi {
    /// Submit one validated payload to the endpoint for `mode`.
    async fn predict(
        &self,
        mode: PredictionMode,
        payload: &PredictionPayload,
    ) -> Result<PredictionResult, PredictionError>;
}

/// reqwest-backed [`PredictionApi`].
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpPredictionClient {
    /// Create a client for the service at `base_url`.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> agri_core::Result<Self> {
        Ok(Self {
            client: http::build_client(timeout)?,
            base_url: http::parse_base_url(base_url)?,
        })
    }

    /// Create a client sharing an existing reqwest connection pool.
    pub fn with_client(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Endpoint URL for `mode`, always with a trailing slash.
    pub fn endpoint(&self, mode: PredictionMode) -> String {
        format!("{}{}/", self.base_url, mode.slug())
    }
}

impl PredictionApi for HttpPredictionClient {
    async fn predict(
        &self,
        mode: PredictionMode,
        payload: &PredictionPayload,
    ) -> Result<PredictionResult, PredictionError> {
        let url = self.endpoint(mode);
        debug!("POST {} {:?}", url, payload);

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                warn!("Prediction request to {} failed: {}", url, e);
                PredictionError::from_transport(&e, &url)
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PredictionError::from_transport(&e, &url))?;

        if !status.is_success() {
            warn!("Prediction service returned {} for {}", status, url);
            return Err(PredictionError::from_status(status, &body));
        }

        let value: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            PredictionError::unexpected(format!("invalid response from prediction service: {e}"))
        })?;

        let result = PredictionResult::from_response(&value).ok_or_else(|| {
            PredictionError::unexpected("prediction response did not contain a result")
        })?;

        info!("{} prediction result: {}", mode.label(), result);
        Ok(result)
    }
}
