use std::fmt;

use url::{Host, Url};

const UNSUPPORTED_HOST_MARKERS: [&str; 2] = ["youtube.com", "youtu.be"];

/// A URL that passed validation and may be fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebUrl(Url);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Please provide the information to get started")]
    Missing,
    #[error("Please enter a valid website URL")]
    Invalid,
    #[error("YouTube URLs are not supported. Please enter a regular website URL.")]
    Unsupported,
}

impl WebUrl {
    /// Checks run in order: presence, syntax and scheme, then video-hosting markers.
    pub fn parse(raw: &str) -> Result<Self, UrlValidationError> {
        let candidate = raw.trim();
        if candidate.is_empty() {
            return Err(UrlValidationError::Missing);
        }

        let parsed = Url::parse(candidate).map_err(|_| UrlValidationError::Invalid)?;
        let has_web_scheme = matches!(parsed.scheme(), "http" | "https");
        // The parser repairs `http:host` and `https:/host`; only the literal form is accepted.
        let has_authority = candidate
            .get(..parsed.scheme().len() + 3)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(&format!("{}://", parsed.scheme())));
        if !has_web_scheme || !has_authority || !has_public_host(&parsed) {
            return Err(UrlValidationError::Invalid);
        }

        let lowered = candidate.to_lowercase();
        if UNSUPPORTED_HOST_MARKERS
            .iter()
            .any(|marker| lowered.contains(marker))
        {
            return Err(UrlValidationError::Unsupported);
        }

        Ok(Self(parsed))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn host(&self) -> &str {
        self.0.host_str().unwrap_or_default()
    }
}

/// An IP address or a dotted domain name such as `example.com`.
fn has_public_host(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => {
            let labels: Vec<&str> = domain.trim_end_matches('.').split('.').collect();
            labels.len() > 1 && labels.iter().all(|label| !label.is_empty())
        }
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
        None => false,
    }
}

impl fmt::Display for WebUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}
