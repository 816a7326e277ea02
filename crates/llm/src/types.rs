use serde::{Deserialize, Serialize};

/// Single-turn generation request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    /// Model name (e.g., "claude-sonnet-4-20250514")
    pub model: String,

    /// Prompt text, sent as the only user message
    pub prompt: String,

    /// Maximum tokens to generate
    pub max_tokens: u32,
}

/// Anthropic Messages API request body
#[derive(Debug, Clone, Serialize)]
pub(crate) struct MessagesRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub messages: Vec<Message<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Message<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> From<&'a GenerateRequest> for MessagesRequest<'a> {
    fn from(request: &'a GenerateRequest) -> Self {
        Self {
            model: &request.model,
            max_tokens: request.max_tokens,
            messages: vec![Message {
                role: "user",
                content: &request.prompt,
            }],
        }
    }
}

/// Anthropic Messages API response body
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ContentBlock {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl MessagesResponse {
    /// Concatenated text of all `text` blocks
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text.as_deref())
            .collect()
    }
}

/// Anthropic error envelope
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

/// Names used to address and sign the follow-up email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Addressees {
    pub salesperson_name: String,
    pub prospect_name: String,
}

impl Default for Addressees {
    fn default() -> Self {
        Self {
            salesperson_name: "Sales Representative".to_string(),
            prospect_name: "Valued Customer".to_string(),
        }
    }
}

impl Addressees {
    /// Build from optional form values; blank values fall back to defaults
    pub fn from_optional(salesperson_name: Option<String>, prospect_name: Option<String>) -> Self {
        let defaults = Self::default();
        let pick = |value: Option<String>, fallback: String| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
        };

        Self {
            salesperson_name: pick(salesperson_name, defaults.salesperson_name),
            prospect_name: pick(prospect_name, defaults.prospect_name),
        }
    }
}

/// Follow-up email split into subject and body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpEmail {
    pub subject: String,
    pub body: String,
}

/// Email drafting result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftedEmail {
    pub email: FollowUpEmail,

    /// Model that produced the draft
    pub model: String,
}
