use std::fmt;

pub const DEFAULT_LANGUAGE: &str = "English";

/// Natural language the summary is written in. Free text, passed to the model as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetLanguage(String);

impl TargetLanguage {
    pub fn from_input(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(language) if !language.is_empty() => Self(language.to_string()),
            _ => Self::default(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TargetLanguage {
    fn default() -> Self {
        Self(DEFAULT_LANGUAGE.to_string())
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
