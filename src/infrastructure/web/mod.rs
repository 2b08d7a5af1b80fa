mod html_extractor;
mod http_content_fetcher;

pub use html_extractor::{ExtractedHtml, extract_html_text};
pub use http_content_fetcher::HttpContentFetcher;
