//! Message processing
//!
//! Runs a message through the TEA update function, dispatches any resulting
//! action, and follows up with chained messages until none remain.

use agri_client::{FieldsApi, PredictionApi};
use tokio::sync::mpsc;

use crate::actions::{handle_action, Services};
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function
pub fn process_message<P, F>(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    services: &Services<P, F>,
) where
    P: PredictionApi + Sync + 'static,
    F: FieldsApi + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx.clone(), services);
        }

        // Continue with follow-up message
        msg = result.message;
    }
}
