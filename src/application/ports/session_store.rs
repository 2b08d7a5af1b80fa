use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{ConversationTurn, Session, SessionId, Summary};

/// Keyed store owning every session for the lifetime of the process.
///
/// Sessions are created lazily on first reference and never evicted.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns a snapshot; mutations go through the other methods.
    async fn get_or_create(&self, id: &SessionId) -> Result<Session, RepositoryError>;

    async fn set_summary(&self, id: &SessionId, summary: Summary) -> Result<(), RepositoryError>;

    /// Appends the turn to the log and its question/answer pair to the chat
    /// history in one step. Returns the number of turns after the commit.
    async fn commit_turn(
        &self,
        id: &SessionId,
        turn: ConversationTurn,
    ) -> Result<usize, RepositoryError>;
}
