//! Message processing: the TEA update loop plus action dispatch

use tokio::sync::{mpsc, watch};

use crate::actions::{handle_action, Devices};
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function.
///
/// Follow-up messages are processed immediately, in order, before this
/// returns. Actions are dispatched as background tasks whose results come
/// back through `msg_tx`.
pub fn process_message(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    shutdown_rx: &watch::Receiver<bool>,
    devices: &Devices,
) {
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx.clone(), shutdown_rx.clone(), devices);
        }

        msg = result.message;
    }
}
