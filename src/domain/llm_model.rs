use std::fmt;
use std::str::FromStr;

/// Hosted chat models a session can be driven with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LlmModel {
    #[default]
    Gemma2_9bIt,
    Llama3_70b8192,
}

impl LlmModel {
    pub const ALL: [LlmModel; 2] = [LlmModel::Gemma2_9bIt, LlmModel::Llama3_70b8192];

    pub fn as_str(&self) -> &'static str {
        match self {
            LlmModel::Gemma2_9bIt => "Gemma2-9b-It",
            LlmModel::Llama3_70b8192 => "llama3-70b-8192",
        }
    }
}

impl FromStr for LlmModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|model| model.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                format!(
                    "Unknown model: {}. Expected one of: {}",
                    wanted,
                    Self::ALL.map(|m| m.as_str()).join(", ")
                )
            })
    }
}

impl fmt::Display for LlmModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
