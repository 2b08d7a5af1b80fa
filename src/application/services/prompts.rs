use crate::domain::{ChatHistory, ChatMessage, TargetLanguage};

pub const SUMMARY_PROMPT_TEMPLATE: &str = "Summarize the following content, ensuring \
the summary is clear, concise, and retains the most important information. \
Please don't generate any text outside of the summary. \
The summary should be written in the specified language: {language}. \
Content: {text}";

pub const CONTEXTUALIZE_QUESTION_PROMPT: &str = "Given a chat history and the latest user question \
which might reference context in the chat history, \
formulate a standalone question which can be understood \
without the chat history. Do NOT answer the question, \
just reformulate it if needed and otherwise return it as is.";

pub const ANSWER_PROMPT_TEMPLATE: &str = "You are an assistant for question-answering tasks. \
Use the following pieces of retrieved context to answer \
the question. If you don't know the answer, say that you \
don't know. Use three sentences maximum and keep the \
answer concise.\n\n{context}";

/// Joins retrieved chunks into the `{context}` slot of the answer prompt.
pub const CONTEXT_SEPARATOR: &str = "\n\n";

pub fn summary_messages(text: &str, language: &TargetLanguage) -> Vec<ChatMessage> {
    // `{text}` last so page content containing "{language}" is never substituted.
    let prompt = SUMMARY_PROMPT_TEMPLATE
        .replace("{language}", language.as_str())
        .replace("{text}", text);
    vec![ChatMessage::user(prompt)]
}

pub fn contextualize_messages(history: &ChatHistory, question: &str) -> Vec<ChatMessage> {
    with_history(
        ChatMessage::system(CONTEXTUALIZE_QUESTION_PROMPT),
        history,
        question,
    )
}

pub fn answer_messages(context: &str, history: &ChatHistory, question: &str) -> Vec<ChatMessage> {
    with_history(
        ChatMessage::system(ANSWER_PROMPT_TEMPLATE.replace("{context}", context)),
        history,
        question,
    )
}

fn with_history(system: ChatMessage, history: &ChatHistory, question: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.messages().len() + 2);
    messages.push(system);
    messages.extend(history.messages().iter().cloned());
    messages.push(ChatMessage::user(question));
    messages
}
