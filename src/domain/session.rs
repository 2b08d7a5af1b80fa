use chrono::{DateTime, Utc};

use super::{ChatHistory, ConversationTurn, SessionId, Summary};

/// One user's summary and the conversation held about it.
///
/// The summary is replaced wholesale; turns and chat history only grow, and
/// always grow together through [`Session::record_turn`].
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    summary: Option<Summary>,
    turns: Vec<ConversationTurn>,
    chat_history: ChatHistory,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: SessionId) -> Self {
        let now = Utc::now();
        Self {
            id,
            summary: None,
            turns: Vec::new(),
            chat_history: ChatHistory::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn chat_history(&self) -> &ChatHistory {
        &self.chat_history
    }

    pub fn replace_summary(&mut self, summary: Summary) {
        self.summary = Some(summary);
        self.updated_at = Utc::now();
    }

    pub fn record_turn(&mut self, turn: ConversationTurn) {
        self.chat_history
            .push_exchange(turn.question.clone(), turn.answer.clone());
        self.turns.push(turn);
        self.updated_at = Utc::now();
    }
}
