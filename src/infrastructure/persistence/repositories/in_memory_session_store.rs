use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{RepositoryError, SessionStore};
use crate::domain::{ConversationTurn, Session, SessionId, Summary};

/// Process-lifetime session map. No eviction and no expiry.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create(&self, id: &SessionId) -> Result<Session, RepositoryError> {
        if let Some(session) = self.sessions.read().await.get(id) {
            return Ok(session.clone());
        }

        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(id.clone()).or_insert_with(|| {
            tracing::debug!(session_id = %id, "Creating session");
            Session::new(id.clone())
        });
        Ok(session.clone())
    }

    async fn set_summary(&self, id: &SessionId, summary: Summary) -> Result<(), RepositoryError> {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(id.clone())
            .or_insert_with(|| Session::new(id.clone()))
            .replace_summary(summary);
        Ok(())
    }

    async fn commit_turn(
        &self,
        id: &SessionId,
        turn: ConversationTurn,
    ) -> Result<usize, RepositoryError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .entry(id.clone())
            .or_insert_with(|| Session::new(id.clone()));
        session.record_turn(turn);
        Ok(session.turns().len())
    }
}
