use sitechat::domain::LlmModel;

#[test]
fn given_default_when_created_then_is_gemma() {
    assert_eq!(LlmModel::default(), LlmModel::Gemma2_9bIt);
    assert_eq!(LlmModel::default().as_str(), "Gemma2-9b-It");
}

#[test]
fn given_model_name_in_any_case_when_parsing_then_resolves() {
    assert_eq!(
        "gemma2-9b-it".parse::<LlmModel>(),
        Ok(LlmModel::Gemma2_9bIt)
    );
    assert_eq!(
        "llama3-70b-8192".parse::<LlmModel>(),
        Ok(LlmModel::Llama3_70b8192)
    );
}

#[test]
fn given_unknown_name_when_parsing_then_lists_choices() {
    let error = "mixtral".parse::<LlmModel>().unwrap_err();

    assert!(error.starts_with("Unknown model: mixtral"));
    assert!(error.contains("Gemma2-9b-It"));
    assert!(error.contains("llama3-70b-8192"));
}
