use callassist_common::Result;
use std::sync::Arc;
use tracing::{debug, info};

use crate::llm_trait::LlmClient;
use crate::prompts::follow_up_email_prompt;
use crate::types::{Addressees, DraftedEmail, FollowUpEmail, GenerateRequest};

const SUBJECT_PREFIX: &str = "Subject:";

/// Drafts follow-up sales emails from call transcripts
pub struct EmailDrafter {
    client: Arc<dyn LlmClient>,
    max_tokens: u32,
}

impl EmailDrafter {
    /// Create new drafter
    pub fn new(client: Arc<dyn LlmClient>, max_tokens: u32) -> Self {
        Self { client, max_tokens }
    }

    /// Draft a follow-up email for one transcript
    pub async fn draft(&self, transcript: &str, names: &Addressees) -> Result<DraftedEmail> {
        info!(
            "Drafting follow-up email - Transcript length: {} chars",
            transcript.len()
        );

        let request = GenerateRequest {
            model: self.client.model().to_string(),
            prompt: follow_up_email_prompt(transcript, &names.salesperson_name, &names.prospect_name),
            max_tokens: self.max_tokens,
        };

        let raw = self.client.generate(request).await?;
        let email = parse_email(&raw);
        debug!(
            "Parsed email - Subject: {:?}, Body length: {}",
            email.subject,
            email.body.len()
        );

        Ok(DraftedEmail {
            email,
            model: self.client.model().to_string(),
        })
    }
}

/// Split a model response into subject and body
///
/// Only a response that starts with `Subject:` has a subject; it ends at the
/// first newline. Anything else is returned whole as the body.
pub fn parse_email(raw: &str) -> FollowUpEmail {
    let Some(rest) = raw.strip_prefix(SUBJECT_PREFIX) else {
        return FollowUpEmail {
            subject: String::new(),
            body: raw.to_string(),
        };
    };

    let (subject, body) = match rest.split_once('\n') {
        Some((subject, body)) => (subject, body),
        None => (rest, ""),
    };

    FollowUpEmail {
        subject: subject.trim().to_string(),
        body: body.trim().to_string(),
    }
}
