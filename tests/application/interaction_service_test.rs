use sitechat::application::services::{ErrorKind, Interaction};
use sitechat::domain::{LlmModel, SessionId};

use crate::helpers::{MockContentFetcher, PAGE_TEXT, ScriptedLlmClient, TestHarness};

#[tokio::test]
async fn given_unknown_session_when_viewing_then_creates_empty_session() {
    let harness = TestHarness::new(
        MockContentFetcher::with_text(PAGE_TEXT),
        ScriptedLlmClient::new(),
    );

    let outcome = harness
        .interaction_service
        .dispatch(&SessionId::from_input("fresh"), Interaction::View)
        .await
        .unwrap();

    assert_eq!(outcome.view.session_id, "fresh");
    assert!(outcome.view.summary.is_none());
    assert!(outcome.view.history.is_empty());
    assert!(outcome.answer.is_none());
    assert!(outcome.error.is_none());
    assert_eq!(harness.store.session_count().await, 1);
}

#[tokio::test]
async fn given_explicit_model_when_summarizing_then_uses_it() {
    let harness = TestHarness::new(
        MockContentFetcher::with_text(PAGE_TEXT),
        ScriptedLlmClient::new().reply("Summary"),
    );

    let outcome = harness
        .interaction_service
        .dispatch(
            &SessionId::default(),
            Interaction::Summarize {
                url: "https://example.com".to_string(),
                language: None,
                model: Some("LLAMA3-70B-8192".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(outcome.view.summary.unwrap().model, "llama3-70b-8192");
    assert_eq!(harness.llm.requests()[0].0, LlmModel::Llama3_70b8192);
}

#[tokio::test]
async fn given_unknown_model_when_asking_then_reports_invalid_input() {
    let harness = TestHarness::new(
        MockContentFetcher::with_text(PAGE_TEXT),
        ScriptedLlmClient::new(),
    );

    let outcome = harness
        .interaction_service
        .dispatch(
            &SessionId::default(),
            Interaction::Ask {
                question: "Hello?".to_string(),
                model: Some("gpt-9".to_string()),
            },
        )
        .await
        .unwrap();

    let error = outcome.error.unwrap();
    assert_eq!(error.kind, ErrorKind::InvalidInput);
    assert!(error.message.starts_with("Unknown model: gpt-9"));
    assert_eq!(harness.llm.request_count(), 0);
}

#[tokio::test]
async fn given_blank_session_id_when_dispatching_then_uses_default_session() {
    let harness = TestHarness::new(
        MockContentFetcher::with_text(PAGE_TEXT),
        ScriptedLlmClient::new(),
    );

    let outcome = harness
        .interaction_service
        .dispatch(&SessionId::from_input("  "), Interaction::View)
        .await
        .unwrap();

    assert_eq!(outcome.view.session_id, "default_session");
}

#[tokio::test]
async fn given_answered_questions_when_viewing_then_history_is_numbered_in_order() {
    let harness = TestHarness::new(
        MockContentFetcher::with_text(PAGE_TEXT),
        ScriptedLlmClient::new()
            .reply(PAGE_TEXT)
            .reply("first answer")
            .reply("What is Cargo used for?")
            .reply("second answer"),
    );
    let session_id = SessionId::from_input("abc");
    let summarize = Interaction::Summarize {
        url: "https://example.com".to_string(),
        language: None,
        model: None,
    };
    harness
        .interaction_service
        .dispatch(&session_id, summarize)
        .await
        .unwrap();
    for question in ["What is Cargo?", "What is it used for?"] {
        harness
            .interaction_service
            .dispatch(
                &session_id,
                Interaction::Ask {
                    question: question.to_string(),
                    model: None,
                },
            )
            .await
            .unwrap();
    }

    let outcome = harness
        .interaction_service
        .dispatch(&session_id, Interaction::View)
        .await
        .unwrap();

    let history = outcome.view.history;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].number, 1);
    assert_eq!(history[0].question, "What is Cargo?");
    assert_eq!(history[0].answer, "first answer");
    assert_eq!(history[1].number, 2);
    assert_eq!(history[1].question, "What is it used for?");
    assert_eq!(history[1].answer, "second answer");
}
