use dlm_core::*;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Participants waiting for an opponent.
///
/// Each entry is claimed independently when its own wait window closes;
/// nothing here ever pairs two waiting participants with each other.
#[derive(Debug, Default)]
pub struct Lobby {
    waiting: Mutex<HashMap<PlayerId, String>>,
}

impl Lobby {
    pub async fn enqueue(&self, id: PlayerId, name: String) {
        log::debug!("[lobby] {} ({}) waiting", id, name);
        self.waiting.lock().await.insert(id, name);
    }
    /// Removes an entry without side effects.
    pub async fn cancel(&self, id: &PlayerId) -> bool {
        self.waiting.lock().await.remove(id).is_some()
    }
    /// Claims an entry for matching.
    pub async fn take(&self, id: &PlayerId) -> Option<String> {
        self.waiting.lock().await.remove(id)
    }
    pub async fn len(&self) -> usize {
        self.waiting.lock().await.len()
    }
}
