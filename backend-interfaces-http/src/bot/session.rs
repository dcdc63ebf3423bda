// Per-chat awaiting-input state

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

/// What the next free-text message from a chat will be consumed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingInput {
    FeedMinutes,
    MedicationName,
}

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<i64, PendingInput>>>,
}

impl SessionStore {
    pub async fn set(&self, chat_id: i64, pending: PendingInput) {
        self.inner.write().await.insert(chat_id, pending);
    }

    /// Removes and returns the pending state; consuming input is one-shot.
    pub async fn take(&self, chat_id: i64) -> Option<PendingInput> {
        self.inner.write().await.remove(&chat_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pending_input_is_consumed_once() {
        let sessions = SessionStore::default();
        sessions.set(1001, PendingInput::FeedMinutes).await;
        assert_eq!(sessions.take(1001).await, Some(PendingInput::FeedMinutes));
        assert_eq!(sessions.take(1001).await, None);
    }

    #[tokio::test]
    async fn chats_do_not_share_pending_state() {
        let sessions = SessionStore::default();
        sessions.set(1001, PendingInput::FeedMinutes).await;
        sessions.set(1002, PendingInput::MedicationName).await;
        assert_eq!(sessions.take(1002).await, Some(PendingInput::MedicationName));
        assert_eq!(sessions.take(1001).await, Some(PendingInput::FeedMinutes));
    }
}
