//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Every action becomes one tokio task that makes one remote call and sends
//! exactly one completion message back. There are no retries.

use std::sync::Arc;

use agri_client::{FieldsApi, PredictionApi};
use tokio::sync::mpsc;
use tracing::warn;

use crate::message::Message;
use crate::UpdateAction;

/// The remote services actions are executed against
pub struct Services<P, F> {
    pub prediction: Arc<P>,
    pub fields: Arc<F>,
}

impl<P, F> Services<P, F> {
    pub fn new(prediction: Arc<P>, fields: Arc<F>) -> Self {
        Self { prediction, fields }
    }
}

impl<P, F> Clone for Services<P, F> {
    fn clone(&self) -> Self {
        Self {
            prediction: Arc::clone(&self.prediction),
            fields: Arc::clone(&self.fields),
        }
    }
}

/// Execute an action by spawning a background task
pub fn handle_action<P, F>(
    action: UpdateAction,
    msg_tx: mpsc::Sender<Message>,
    services: &Services<P, F>,
) where
    P: PredictionApi + Sync + 'static,
    F: FieldsApi + Sync + 'static,
{
    match action {
        UpdateAction::SubmitPrediction {
            generation,
            mode,
            payload,
        } => {
            let api = Arc::clone(&services.prediction);
            tokio::spawn(async move {
                let result = api.predict(mode, &payload).await;
                send(
                    &msg_tx,
                    Message::PredictionCompleted {
                        generation,
                        mode,
                        result,
                    },
                )
                .await;
            });
        }

        UpdateAction::LoadFields => {
            let api = Arc::clone(&services.fields);
            tokio::spawn(async move {
                let result = api.list_fields().await;
                send(&msg_tx, Message::FieldsLoaded(result)).await;
            });
        }

        UpdateAction::CreateField { payload } => {
            let api = Arc::clone(&services.fields);
            tokio::spawn(async move {
                let result = api.create_field(&payload).await;
                send(&msg_tx, Message::FieldCreated(result)).await;
            });
        }

        UpdateAction::UpdateField { id, payload } => {
            let api = Arc::clone(&services.fields);
            tokio::spawn(async move {
                let result = api.update_field(&id, &payload).await;
                send(&msg_tx, Message::FieldUpdated(result)).await;
            });
        }

        UpdateAction::DeleteField { id, hard_delete } => {
            let api = Arc::clone(&services.fields);
            tokio::spawn(async move {
                let result = api.delete_field(&id, hard_delete).await;
                send(
                    &msg_tx,
                    Message::FieldDeleted {
                        id,
                        hard_delete,
                        result,
                    },
                )
                .await;
            });
        }
    }
}

async fn send(msg_tx: &mpsc::Sender<Message>, msg: Message) {
    if msg_tx.send(msg).await.is_err() {
        warn!("Message channel closed before task result was delivered");
    }
}
