use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, HeaderMap, HeaderValue};

use crate::application::ports::{ContentFetcher, ContentFetcherError, PageContent};
use crate::domain::WebUrl;
use crate::infrastructure::text_processing::sanitize_page_text;
use crate::presentation::config::FetcherSettings;

use super::html_extractor::extract_html_text;

/// Fetches a page over HTTP(S) and reduces it to readable text.
///
/// Sends a browser `User-Agent`; certificate verification follows
/// `FetcherSettings::accept_invalid_certs`.
pub struct HttpContentFetcher {
    client: Client,
}

impl HttpContentFetcher {
    pub fn new(settings: &FetcherSettings) -> Result<Self, ContentFetcherError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,text/plain;q=0.8,*/*;q=0.5",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(settings.max_redirects))
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .build()
            .map_err(|e| ContentFetcherError::RequestFailed(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ContentFetcher for HttpContentFetcher {
    async fn fetch(&self, url: &WebUrl) -> Result<PageContent, ContentFetcherError> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| ContentFetcherError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContentFetcherError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_ascii_lowercase())
            .unwrap_or_else(|| "text/html".to_string());

        let body = response
            .text()
            .await
            .map_err(|e| ContentFetcherError::InvalidBody(e.to_string()))?;

        tracing::debug!(
            url = %url,
            content_type = %content_type,
            bytes = body.len(),
            "Fetched page"
        );

        page_from_body(&content_type, &body)
    }
}

fn page_from_body(content_type: &str, body: &str) -> Result<PageContent, ContentFetcherError> {
    let mime = content_type.split(';').next().unwrap_or("").trim();

    if mime.contains("html") || mime.contains("xml") {
        let extracted = extract_html_text(body);
        Ok(PageContent {
            title: extracted.title,
            text: sanitize_page_text(&extracted.text),
        })
    } else if mime.starts_with("text/") {
        Ok(PageContent {
            title: None,
            text: sanitize_page_text(body),
        })
    } else {
        Err(ContentFetcherError::UnsupportedContentType(mime.to_string()))
    }
}
