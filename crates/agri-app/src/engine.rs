//! Engine - owns the application state and the message channel
//!
//! The engine is the single owner of [`AppState`]. Front ends feed it key
//! messages and drain completions that background tasks send back through
//! the channel.

use std::sync::Arc;

use agri_client::{FieldsApi, HttpFieldsApi, HttpPredictionClient, PredictionApi};
use agri_core::prelude::*;
use tokio::sync::mpsc;

use crate::actions::Services;
use crate::config::Settings;
use crate::message::Message;
use crate::process::process_message;
use crate::state::AppState;

/// Capacity of the message channel
const MESSAGE_CHANNEL_CAPACITY: usize = 256;

pub struct Engine<P, F> {
    pub state: AppState,
    msg_tx: mpsc::Sender<Message>,
    msg_rx: mpsc::Receiver<Message>,
    services: Services<P, F>,
}

/// Engine backed by the HTTP transports
pub type HttpEngine = Engine<HttpPredictionClient, HttpFieldsApi>;

impl HttpEngine {
    /// Build the HTTP transports from settings.
    ///
    /// Both services share one reqwest client.
    pub fn from_settings(settings: Settings) -> Result<Self> {
        settings.validate()?;

        let client = agri_client::build_client(settings.api.request_timeout())?;
        let prediction = HttpPredictionClient::with_client(
            client.clone(),
            agri_client::parse_base_url(&settings.api.prediction_base_url)?,
        );
        let fields = HttpFieldsApi::with_client(
            client,
            agri_client::parse_base_url(&settings.store.base_url)?,
        );

        info!(
            "Prediction service: {}, field store: {}",
            prediction.base_url(),
            fields.base_url()
        );

        Ok(Self::new(AppState::with_settings(settings), prediction, fields))
    }
}

impl<P, F> Engine<P, F>
where
    P: PredictionApi + Sync + 'static,
    F: FieldsApi + Sync + 'static,
{
    pub fn new(state: AppState, prediction: P, fields: F) -> Self {
        Self::with_services(state, Arc::new(prediction), Arc::new(fields))
    }

    /// Build an engine around shared service handles
    pub fn with_services(state: AppState, prediction: Arc<P>, fields: Arc<F>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel(MESSAGE_CHANNEL_CAPACITY);
        Self {
            state,
            msg_tx,
            msg_rx,
            services: Services::new(prediction, fields),
        }
    }

    /// Kick off startup work (the initial field list load)
    pub fn start(&mut self) {
        self.process_message(Message::LoadFields);
    }

    pub fn process_message(&mut self, message: Message) {
        process_message(&mut self.state, message, &self.msg_tx, &self.services);
    }

    /// Process every message already waiting in the channel.
    ///
    /// Returns how many were processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Wait for the next message from a background task
    pub async fn next_message(&mut self) -> Option<Message> {
        self.msg_rx.recv().await
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }
}
