use chrono::{DateTime, Utc};

use super::{LlmModel, TargetLanguage, WebUrl};

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub text: String,
    pub source_url: WebUrl,
    pub language: TargetLanguage,
    pub model: LlmModel,
    pub created_at: DateTime<Utc>,
}

impl Summary {
    pub fn new(
        text: String,
        source_url: WebUrl,
        language: TargetLanguage,
        model: LlmModel,
    ) -> Self {
        Self {
            text,
            source_url,
            language,
            model,
            created_at: Utc::now(),
        }
    }
}
