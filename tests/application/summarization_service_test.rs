use sitechat::application::ports::{LlmClientError, SessionStore};
use sitechat::application::services::{
    ErrorKind, Interaction, SummarizationService, SummarizeError, SummarizeRequest,
};
use sitechat::domain::{LlmModel, SessionId, TargetLanguage, UrlValidationError};

use crate::helpers::{MockContentFetcher, PAGE_TEXT, ScriptedLlmClient, TestHarness};

fn summarize(url: &str, language: Option<&str>) -> Interaction {
    Interaction::Summarize {
        url: url.to_string(),
        language: language.map(String::from),
        model: None,
    }
}

#[tokio::test]
async fn given_valid_url_when_summarizing_then_stores_summary_in_session() {
    let harness = TestHarness::new(
        MockContentFetcher::with_text(PAGE_TEXT),
        ScriptedLlmClient::new().reply("  A summary about Rust.  "),
    );
    let session_id = SessionId::from_input("abc");

    let outcome = harness
        .interaction_service
        .dispatch(&session_id, summarize("https://example.com", Some("German")))
        .await
        .unwrap();

    assert!(outcome.error.is_none());
    let summary = outcome.view.summary.unwrap();
    assert_eq!(summary.text, "A summary about Rust.");
    assert_eq!(summary.language, "German");
    assert_eq!(summary.source_url, "https://example.com/");
    assert_eq!(harness.fetcher.calls(), 1);
}

#[tokio::test]
async fn given_blank_language_when_summarizing_then_prompt_targets_english() {
    let harness = TestHarness::new(
        MockContentFetcher::with_text(PAGE_TEXT),
        ScriptedLlmClient::new().reply("Summary"),
    );
    let session_id = SessionId::from_input("abc");

    harness
        .interaction_service
        .dispatch(&session_id, summarize("https://example.com", Some("   ")))
        .await
        .unwrap();

    let requests = harness.llm.requests();
    assert_eq!(requests.len(), 1);
    let (model, messages) = &requests[0];
    assert_eq!(*model, LlmModel::Gemma2_9bIt);
    assert_eq!(messages.len(), 1);
    assert!(messages[0].content.contains("specified language: English."));
    assert!(messages[0].content.contains("Ferris the crab"));
}

#[tokio::test]
async fn given_second_url_when_summarizing_then_replaces_previous_summary() {
    let harness = TestHarness::new(
        MockContentFetcher::with_text(PAGE_TEXT),
        ScriptedLlmClient::new().reply("First").reply("Second"),
    );
    let session_id = SessionId::from_input("abc");

    harness
        .interaction_service
        .dispatch(&session_id, summarize("https://example.com/a", None))
        .await
        .unwrap();
    let outcome = harness
        .interaction_service
        .dispatch(&session_id, summarize("https://example.com/b", None))
        .await
        .unwrap();

    let summary = outcome.view.summary.unwrap();
    assert_eq!(summary.text, "Second");
    assert_eq!(summary.source_url, "https://example.com/b");
}

#[tokio::test]
async fn given_youtube_url_when_summarizing_then_rejects_without_fetching() {
    let harness = TestHarness::new(
        MockContentFetcher::with_text(PAGE_TEXT),
        ScriptedLlmClient::new(),
    );
    let session_id = SessionId::from_input("abc");

    let outcome = harness
        .interaction_service
        .dispatch(&session_id, summarize("https://youtu.be/dQw4w9WgXcQ", None))
        .await
        .unwrap();

    let error = outcome.error.unwrap();
    assert_eq!(error.kind, ErrorKind::InvalidInput);
    assert_eq!(
        error.message,
        "YouTube URLs are not supported. Please enter a regular website URL."
    );
    assert_eq!(harness.fetcher.calls(), 0);
    assert_eq!(harness.llm.request_count(), 0);
}

#[tokio::test]
async fn given_text_that_is_not_a_url_when_summarizing_then_rejects_without_fetching() {
    let harness = TestHarness::new(
        MockContentFetcher::with_text(PAGE_TEXT),
        ScriptedLlmClient::new(),
    );
    let session_id = SessionId::from_input("abc");

    let outcome = harness
        .interaction_service
        .dispatch(&session_id, summarize("not a url", None))
        .await
        .unwrap();

    let error = outcome.error.unwrap();
    assert_eq!(error.message, "Please enter a valid website URL");
    assert_eq!(harness.fetcher.calls(), 0);
    assert!(outcome.view.summary.is_none());
}

#[tokio::test]
async fn given_fetch_failure_when_summarizing_then_keeps_previous_summary() {
    let harness = TestHarness::new(
        MockContentFetcher::with_text(PAGE_TEXT),
        ScriptedLlmClient::new().reply("Original"),
    );
    let session_id = SessionId::from_input("abc");
    harness
        .interaction_service
        .dispatch(&session_id, summarize("https://example.com", None))
        .await
        .unwrap();

    let failing = TestHarness::new(MockContentFetcher::failing(), ScriptedLlmClient::new());
    let service = SummarizationService::new(
        failing.fetcher.clone(),
        failing.llm.clone(),
        harness.store.clone(),
    );
    let result = service
        .summarize(
            &session_id,
            SummarizeRequest {
                url: "https://example.com/other".to_string(),
                language: TargetLanguage::from_input(None),
                model: LlmModel::default(),
            },
        )
        .await;

    assert!(matches!(result, Err(SummarizeError::Fetch(_))));
    let session = harness.store.get_or_create(&session_id).await.unwrap();
    assert_eq!(session.summary().unwrap().text, "Original");
}

#[tokio::test]
async fn given_page_without_text_when_summarizing_then_reports_empty_content() {
    let harness = TestHarness::new(
        MockContentFetcher::with_text("  \n\n "),
        ScriptedLlmClient::new(),
    );
    let session_id = SessionId::from_input("abc");

    let outcome = harness
        .interaction_service
        .dispatch(&session_id, summarize("https://example.com", None))
        .await
        .unwrap();

    let error = outcome.error.unwrap();
    assert_eq!(error.kind, ErrorKind::EmptyContent);
    assert_eq!(
        error.message,
        "Failed to extract content from the provided URL."
    );
    assert_eq!(harness.llm.request_count(), 0);
}

#[tokio::test]
async fn given_model_failure_when_summarizing_then_reports_generation_error() {
    let harness = TestHarness::new(
        MockContentFetcher::with_text(PAGE_TEXT),
        ScriptedLlmClient::new().fail_with(LlmClientError::RateLimited),
    );
    let session_id = SessionId::from_input("abc");

    let outcome = harness
        .interaction_service
        .dispatch(&session_id, summarize("https://example.com", None))
        .await
        .unwrap();

    let error = outcome.error.unwrap();
    assert_eq!(error.kind, ErrorKind::Generation);
    assert!(error.message.starts_with("Failed to generate the summary"));
    assert!(outcome.view.summary.is_none());
}

#[tokio::test]
async fn given_missing_credential_when_summarizing_then_nothing_is_fetched() {
    let harness = TestHarness::new(
        MockContentFetcher::with_text(PAGE_TEXT),
        ScriptedLlmClient::without_credentials(),
    );
    let session_id = SessionId::from_input("abc");

    let outcome = harness
        .interaction_service
        .dispatch(&session_id, summarize("https://example.com", None))
        .await
        .unwrap();

    assert_eq!(outcome.error.unwrap().kind, ErrorKind::MissingCredential);
    assert_eq!(harness.fetcher.calls(), 0);
}

#[tokio::test]
async fn given_empty_url_when_summarizing_directly_then_returns_missing_input() {
    let harness = TestHarness::new(
        MockContentFetcher::with_text(PAGE_TEXT),
        ScriptedLlmClient::new(),
    );
    let service = SummarizationService::new(
        harness.fetcher.clone(),
        harness.llm.clone(),
        harness.store.clone(),
    );

    let result = service
        .summarize(
            &SessionId::default(),
            SummarizeRequest {
                url: "  ".to_string(),
                language: TargetLanguage::from_input(None),
                model: LlmModel::default(),
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(SummarizeError::InvalidUrl(UrlValidationError::Missing))
    ));
}
