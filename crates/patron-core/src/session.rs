//! Session - per-session transcript and context store
//!
//! Process-wide map from session identifier to conversation state. Sessions
//! are created on first use and live for the life of the process; there is
//! no eviction or TTL. Transcripts are bounded to the most recent
//! [`MAX_TRANSCRIPT_ENTRIES`] entries.
//!
//! The store is constructed explicitly and handed to the gateway, never
//! reached through a global.

use patron_llm::MessageRole;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Upper bound on stored transcript entries per session
pub const MAX_TRANSCRIPT_ENTRIES: usize = 20;

/// One transcript entry (a user or assistant turn)
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    /// Who spoke
    pub role: MessageRole,
    /// What was said
    pub text: String,
}

#[derive(Debug, Default, Clone)]
struct Session {
    transcript: Vec<TranscriptEntry>,
    phone: Option<String>,
}

/// Session context store
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The session's transcript (empty for unknown sessions)
    pub async fn transcript(&self, session_id: &str) -> Vec<TranscriptEntry> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .map(|s| s.transcript.clone())
            .unwrap_or_default()
    }

    /// Append one entry, trimming the transcript to the most recent
    /// [`MAX_TRANSCRIPT_ENTRIES`] entries.
    pub async fn append(&self, session_id: &str, role: MessageRole, text: impl Into<String>) {
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(session_id.to_string()).or_default();
        session.transcript.push(TranscriptEntry {
            role,
            text: text.into(),
        });
        if session.transcript.len() > MAX_TRANSCRIPT_ENTRIES {
            let excess = session.transcript.len() - MAX_TRANSCRIPT_ENTRIES;
            session.transcript.drain(..excess);
        }
    }

    /// Overwrite the session's stored phone number (most-recent-wins)
    pub async fn set_phone(&self, session_id: &str, phone: impl Into<String>) {
        let phone = phone.into();
        debug!(session_id, "updating session phone number");
        let mut sessions = self.sessions.write().await;
        sessions.entry(session_id.to_string()).or_default().phone = Some(phone);
    }

    /// The session's last-known phone number, if any
    pub async fn phone(&self, session_id: &str) -> Option<String> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .and_then(|s| s.phone.clone())
    }

    /// Number of live sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_session_is_empty() {
        let store = SessionStore::new();
        assert!(store.transcript("nope").await.is_empty());
        assert_eq!(store.phone("nope").await, None);
    }

    #[tokio::test]
    async fn test_append_and_read_back() {
        let store = SessionStore::new();
        store.append("s1", MessageRole::User, "hi").await;
        store.append("s1", MessageRole::Assistant, "hello!").await;

        let transcript = store.transcript("s1").await;
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].role, MessageRole::User);
        assert_eq!(transcript[1].text, "hello!");
    }

    #[tokio::test]
    async fn test_transcript_never_exceeds_bound() {
        let store = SessionStore::new();
        for i in 0..50 {
            store.append("s1", MessageRole::User, format!("msg {i}")).await;
        }

        let transcript = store.transcript("s1").await;
        assert_eq!(transcript.len(), MAX_TRANSCRIPT_ENTRIES);
        // Oldest entries were dropped, newest kept
        assert_eq!(transcript.last().unwrap().text, "msg 49");
        assert_eq!(transcript.first().unwrap().text, "msg 30");
    }

    #[tokio::test]
    async fn test_phone_most_recent_wins() {
        let store = SessionStore::new();
        store.set_phone("s1", "+111111111").await;
        store.set_phone("s1", "+222222222").await;
        assert_eq!(store.phone("s1").await, Some("+222222222".to_string()));
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        store.append("a", MessageRole::User, "from a").await;
        store.set_phone("b", "+263775123456").await;

        assert!(store.transcript("b").await.is_empty());
        assert_eq!(store.phone("a").await, None);
        assert_eq!(store.session_count().await, 2);
    }
}
