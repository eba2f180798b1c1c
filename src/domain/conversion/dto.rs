use serde::{Deserialize, Serialize};

/// Request for a text-to-speech conversion. Both fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
}

impl ConversionRequest {
    pub fn new(text: impl Into<String>, voice: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            voice: Some(voice.into()),
        }
    }

    /// Apply defaults for absent fields. Present values are used verbatim.
    pub fn resolve(self, default_text: &str, default_voice: &str) -> ResolvedRequest {
        ResolvedRequest {
            text: self.text.unwrap_or_else(|| default_text.to_string()),
            voice: self.voice.unwrap_or_else(|| default_voice.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequest {
    pub text: String,
    pub voice: String,
}

/// Response for a successful conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub url: String,
    pub version: u64,
}
