mod conversation_service;
mod interaction_service;
pub mod prompts;
mod retrieval_index;
mod summarization_service;

pub use conversation_service::{AskError, AskResponse, ConversationService, SourceChunk};
pub use interaction_service::{
    AnswerView, ErrorKind, Interaction, InteractionOutcome, InteractionService, SessionView,
    SourceView, SummaryView, TurnView, UserFacingError,
};
pub use retrieval_index::{IndexError, RetrievalIndex, RetrievalIndexBuilder};
pub use summarization_service::{SummarizationService, SummarizeError, SummarizeRequest};
