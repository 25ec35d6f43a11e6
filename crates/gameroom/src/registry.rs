use super::*;
use dlm_core::*;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tokio::sync::mpsc::UnboundedSender;

/// Outbound channel of one live connection. Carries serialized JSON.
pub type Outbox = UnboundedSender<String>;

/// Live connections keyed by participant.
/// Sending to someone who is not here is a silent no-op.
#[derive(Debug, Default)]
pub struct Registry {
    outboxes: RwLock<HashMap<PlayerId, Outbox>>,
}

impl Registry {
    /// Registers a connection, replacing any previous one for the same id.
    pub async fn register(&self, id: PlayerId, outbox: Outbox) {
        if self.outboxes.write().await.insert(id.clone(), outbox).is_some() {
            log::debug!("[registry] {} replaced an existing connection", id);
        }
    }
    pub async fn unregister(&self, id: &PlayerId) {
        self.outboxes.write().await.remove(id);
    }
    /// Sends a message to a participant.
    pub async fn send(&self, id: &PlayerId, msg: ServerMessage) {
        match self.outboxes.read().await.get(id).map(|tx| tx.send(msg.to_json())) {
            Some(Ok(())) => log::trace!("[registry] sent to {}", id),
            Some(Err(_)) => log::debug!("[registry] {} connection closed, dropping message", id),
            None => log::debug!("[registry] {} not connected, dropping message", id),
        }
    }
    pub async fn len(&self) -> usize {
        self.outboxes.read().await.len()
    }
}
