//! Call assistant LLM integration
//!
//! Anthropic Messages API client and follow-up email drafting

mod client;
mod email;
mod llm_trait;
mod prompts;
mod types;

pub use client::AnthropicClient;
pub use email::{parse_email, EmailDrafter};
pub use llm_trait::LlmClient;
pub use prompts::{follow_up_email_prompt, FOLLOW_UP_EMAIL_TEMPLATE};
pub use types::{Addressees, DraftedEmail, FollowUpEmail, GenerateRequest};
