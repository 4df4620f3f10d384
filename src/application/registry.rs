//! Session registry - active conversations keyed by chat identity.
//!
//! An explicit object passed to the dispatcher, never module-level
//! state. Entries are inserted on flow start, mutated through
//! `with_record`, and evicted eagerly on every terminal outcome to bound
//! memory. Nothing persists across restarts.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::foundation::ChatId;
use crate::domain::survey::ConversationRecord;

/// Process-wide map from chat identity to its conversation record.
///
/// Events for the same identity are assumed to arrive serially (the
/// transport delivers one update per interaction); the lock protects the
/// map itself, not concurrent mutation of one record.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<ChatId, ConversationRecord>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a record for the identity, discarding any prior one.
    pub async fn insert(&self, chat: ChatId, record: ConversationRecord) {
        self.sessions.write().await.insert(chat, record);
    }

    /// Removes and returns the identity's record.
    pub async fn evict(&self, chat: ChatId) -> Option<ConversationRecord> {
        self.sessions.write().await.remove(&chat)
    }

    /// Runs a closure against the identity's record, if one is active.
    pub async fn with_record<R>(
        &self,
        chat: ChatId,
        f: impl FnOnce(&mut ConversationRecord) -> R,
    ) -> Option<R> {
        let mut sessions = self.sessions.write().await;
        sessions.get_mut(&chat).map(f)
    }

    /// Whether the identity has an active conversation.
    pub async fn contains(&self, chat: ChatId) -> bool {
        self.sessions.read().await.contains_key(&chat)
    }

    /// Number of active conversations.
    pub async fn active_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::domain::survey::FlowTemplate;

    fn record() -> ConversationRecord {
        ConversationRecord::new(
            FlowTemplate::FullSurvey,
            NaiveDate::from_ymd_opt(2025, 6, 9).unwrap(),
        )
    }

    #[tokio::test]
    async fn insert_then_contains() {
        let registry = SessionRegistry::new();
        let chat = ChatId::new(1);
        assert!(!registry.contains(chat).await);
        registry.insert(chat, record()).await;
        assert!(registry.contains(chat).await);
        assert_eq!(registry.active_count().await, 1);
    }

    #[tokio::test]
    async fn insert_replaces_prior_record() {
        let registry = SessionRegistry::new();
        let chat = ChatId::new(1);
        registry.insert(chat, record()).await;
        registry
            .with_record(chat, |r| r.add_audience("Users"))
            .await
            .unwrap();

        registry.insert(chat, record()).await;
        let audience_len = registry.with_record(chat, |r| r.audience().len()).await;
        assert_eq!(audience_len, Some(0));
        assert_eq!(registry.active_count().await, 1);
    }

    #[tokio::test]
    async fn evict_removes_and_returns() {
        let registry = SessionRegistry::new();
        let chat = ChatId::new(1);
        registry.insert(chat, record()).await;
        assert!(registry.evict(chat).await.is_some());
        assert!(!registry.contains(chat).await);
        assert!(registry.evict(chat).await.is_none());
    }

    #[tokio::test]
    async fn with_record_mutates_in_place() {
        let registry = SessionRegistry::new();
        let chat = ChatId::new(1);
        registry.insert(chat, record()).await;

        registry
            .with_record(chat, |r| r.add_audience("Drivers"))
            .await
            .unwrap();

        let audience = registry
            .with_record(chat, |r| r.audience().to_vec())
            .await
            .unwrap();
        assert_eq!(audience, ["Drivers"]);
    }

    #[tokio::test]
    async fn with_record_on_unknown_identity_returns_none() {
        let registry = SessionRegistry::new();
        let touched = registry.with_record(ChatId::new(9), |_| ()).await;
        assert!(touched.is_none());
    }

    #[tokio::test]
    async fn identities_are_isolated() {
        let registry = SessionRegistry::new();
        registry.insert(ChatId::new(1), record()).await;
        registry.insert(ChatId::new(2), record()).await;
        registry
            .with_record(ChatId::new(1), |r| r.add_audience("Users"))
            .await
            .unwrap();

        let other = registry
            .with_record(ChatId::new(2), |r| r.audience().len())
            .await;
        assert_eq!(other, Some(0));
    }
}
