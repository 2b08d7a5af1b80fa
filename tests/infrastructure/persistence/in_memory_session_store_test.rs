use std::sync::Arc;

use sitechat::application::ports::SessionStore;
use sitechat::domain::{ConversationTurn, LlmModel, SessionId, Summary, TargetLanguage, WebUrl};
use sitechat::infrastructure::persistence::InMemorySessionStore;

fn summary(text: &str) -> Summary {
    Summary::new(
        text.to_string(),
        WebUrl::parse("https://example.com").unwrap(),
        TargetLanguage::from_input(None),
        LlmModel::default(),
    )
}

#[tokio::test]
async fn given_unknown_id_when_getting_then_creates_session_once() {
    let store = InMemorySessionStore::new();
    let id = SessionId::from_input("abc");

    let first = store.get_or_create(&id).await.unwrap();
    let second = store.get_or_create(&id).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.created_at, second.created_at);
    assert_eq!(store.session_count().await, 1);
}

#[tokio::test]
async fn given_unseen_session_when_setting_summary_then_creates_it() {
    let store = InMemorySessionStore::new();
    let id = SessionId::from_input("abc");

    store.set_summary(&id, summary("text")).await.unwrap();

    let session = store.get_or_create(&id).await.unwrap();
    assert_eq!(session.summary().unwrap().text, "text");
}

#[tokio::test]
async fn given_turn_when_committing_then_log_and_history_grow_together() {
    let store = InMemorySessionStore::new();
    let id = SessionId::from_input("abc");

    let first = store
        .commit_turn(&id, ConversationTurn::new("q1", "a1"))
        .await
        .unwrap();
    let second = store
        .commit_turn(&id, ConversationTurn::new("q2", "a2"))
        .await
        .unwrap();

    assert_eq!((first, second), (1, 2));
    let session = store.get_or_create(&id).await.unwrap();
    assert_eq!(session.turns().len(), 2);
    assert_eq!(session.chat_history().messages().len(), 4);
    assert_eq!(session.turns()[1].question, "q2");
}

#[tokio::test]
async fn given_two_ids_when_writing_then_sessions_are_isolated() {
    let store = InMemorySessionStore::new();
    let a = SessionId::from_input("a");
    let b = SessionId::from_input("b");

    store.set_summary(&a, summary("for a")).await.unwrap();
    store
        .commit_turn(&a, ConversationTurn::new("q", "a"))
        .await
        .unwrap();

    let session_b = store.get_or_create(&b).await.unwrap();
    assert!(session_b.summary().is_none());
    assert!(session_b.turns().is_empty());
}

#[tokio::test]
async fn given_concurrent_commits_when_finished_then_no_turn_is_lost_or_renumbered() {
    let store = Arc::new(InMemorySessionStore::new());
    let id = SessionId::from_input("shared");

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let store = Arc::clone(&store);
            let id = id.clone();
            tokio::spawn(async move {
                store
                    .commit_turn(&id, ConversationTurn::new(format!("q{i}"), "a"))
                    .await
                    .unwrap()
            })
        })
        .collect();
    let mut numbers = Vec::new();
    for handle in handles {
        numbers.push(handle.await.unwrap());
    }
    numbers.sort_unstable();

    assert_eq!(numbers, (1..=20).collect::<Vec<_>>());

    let session = store.get_or_create(&id).await.unwrap();
    assert_eq!(session.turns().len(), 20);
    assert_eq!(session.chat_history().messages().len(), 40);
}
