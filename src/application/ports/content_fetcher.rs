use async_trait::async_trait;

use crate::domain::WebUrl;

/// Text extracted from a fetched page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageContent {
    pub title: Option<String>,
    pub text: String,
}

#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, url: &WebUrl) -> Result<PageContent, ContentFetcherError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ContentFetcherError {
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),
    #[error("unreadable body: {0}")]
    InvalidBody(String),
}
