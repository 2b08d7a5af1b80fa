mod chat_history;
mod chat_message;
mod chunk;
mod conversation_turn;
mod embedding;
mod llm_model;
mod message_role;
mod session;
mod session_id;
mod summary;
mod target_language;
mod web_url;

pub use chat_history::ChatHistory;
pub use chat_message::ChatMessage;
pub use chunk::{Chunk, ChunkId};
pub use conversation_turn::ConversationTurn;
pub use embedding::Embedding;
pub use llm_model::LlmModel;
pub use message_role::MessageRole;
pub use session::Session;
pub use session_id::{DEFAULT_SESSION_ID, SessionId};
pub use summary::Summary;
pub use target_language::{DEFAULT_LANGUAGE, TargetLanguage};
pub use web_url::{UrlValidationError, WebUrl};
