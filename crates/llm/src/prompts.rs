//! Prompt templates for follow-up emails

/// Instructional template; `{prospect}`, `{salesperson}` and `{transcript}` are substituted
pub const FOLLOW_UP_EMAIL_TEMPLATE: &str = r#"You are a sales email assistant. Based on the following sales call transcript,
write a short, punchy follow-up email.

Rules:
- Address the prospect as {prospect}
- Sign off as {salesperson}
- Keep it under 100 words (excluding subject line)
- Reference 1-2 specific things from the call to show you were listening
- Include one clear call to action
- Be warm but direct, no fluff, no filler
- Start with the subject line in the format: Subject: [subject here]
- Then a blank line, then the email body

TRANSCRIPT:
{transcript}"#;

/// Prompt for drafting a follow-up email from a call transcript
pub fn follow_up_email_prompt(transcript: &str, salesperson: &str, prospect: &str) -> String {
    FOLLOW_UP_EMAIL_TEMPLATE
        .replace("{prospect}", prospect)
        .replace("{salesperson}", salesperson)
        .replace("{transcript}", transcript)
}
