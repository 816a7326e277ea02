use async_trait::async_trait;
use callassist_common::{AppConfig, CallAssistError, Result};
use reqwest::Client;
use tracing::{debug, info};

use crate::llm_trait::LlmClient;
use crate::types::{ErrorResponse, GenerateRequest, MessagesRequest, MessagesResponse};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic Messages API client
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    base_url: String,
    api_key: String,
    model: String,
    client: Client,
}

impl AnthropicClient {
    /// Create new Anthropic client
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(300)) // 5 minutes for LLM calls
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        let model = model.into();
        info!("Anthropic client initialized: {} (model: {})", base_url, model);
        Ok(Self {
            base_url,
            api_key: api_key.into(),
            model,
            client,
        })
    }

    /// Create client from application configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            &config.anthropic_base_url,
            &config.anthropic_api_key,
            &config.llm_model,
        )
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn generate(&self, request: GenerateRequest) -> Result<String> {
        debug!(
            "Sending messages request - Model: {}, Prompt length: {}, Max tokens: {}",
            request.model,
            request.prompt.len(),
            request.max_tokens
        );

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&MessagesRequest::from(&request))
            .send()
            .await
            .map_err(|e| CallAssistError::network(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CallAssistError::network(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }

        let text = parse_response(&body)?;
        debug!("Received response - Length: {}", text.len());
        Ok(text)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Extract generated text from a successful response body
///
/// A reply without text blocks yields an empty string.
fn parse_response(body: &str) -> Result<String> {
    let result: MessagesResponse = serde_json::from_str(body)
        .map_err(|e| CallAssistError::generation(format!("Failed to parse response: {}", e)))?;

    Ok(result.text())
}

/// Build an error from a non-2xx response, preferring the API's own message
fn api_error(status: u16, body: &str) -> CallAssistError {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(err) => CallAssistError::generation(format!(
            "Anthropic API error {} ({}): {}",
            status, err.error.kind, err.error.message
        )),
        Err(_) => CallAssistError::generation(format!("Anthropic API error {}: {}", status, body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
    use callassist_common::ErrorKind;
    use serde_json::json;
    use std::sync::Mutex;

    #[test]
    fn test_client_creation() {
        let client =
            AnthropicClient::new("https://api.anthropic.com/", "sk-test", "claude-sonnet-4-20250514")
                .unwrap();
        assert_eq!(client.model(), "claude-sonnet-4-20250514");
        assert_eq!(client.messages_url(), "https://api.anthropic.com/v1/messages");
    }

    #[test]
    fn test_from_config() {
        let client = AnthropicClient::from_config(&AppConfig::default()).unwrap();
        assert_eq!(client.model(), "claude-sonnet-4-20250514");
    }

    #[test]
    fn test_parse_response() {
        let body = r#"{"content": [{"type": "text", "text": "Subject: Hi\n\nBody"}]}"#;
        assert_eq!(parse_response(body).unwrap(), "Subject: Hi\n\nBody");
    }

    #[test]
    fn test_parse_empty_response() {
        assert_eq!(parse_response(r#"{"content": []}"#).unwrap(), "");
        assert_eq!(
            parse_response(r#"{"content": [{"type": "text", "text": ""}]}"#).unwrap(),
            ""
        );
    }

    #[test]
    fn test_parse_malformed_response() {
        let err = parse_response("not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Generation);
    }

    #[test]
    fn test_api_error_uses_envelope() {
        let body = r#"{"type": "error", "error": {"type": "authentication_error", "message": "invalid x-api-key"}}"#;
        let err = api_error(401, body);
        assert_eq!(
            err.detail(),
            "Anthropic API error 401 (authentication_error): invalid x-api-key"
        );
    }

    #[test]
    fn test_api_error_plain_body() {
        let err = api_error(502, "Bad Gateway");
        assert_eq!(err.detail(), "Anthropic API error 502: Bad Gateway");
    }

    /// Canned Messages API endpoint recording what it received
    struct StubMessages {
        status: u16,
        reply: serde_json::Value,
        headers: Mutex<Vec<(String, String)>>,
        body: Mutex<Option<serde_json::Value>>,
    }

    impl StubMessages {
        fn new(status: u16, reply: serde_json::Value) -> Self {
            Self {
                status,
                reply,
                headers: Mutex::new(Vec::new()),
                body: Mutex::new(None),
            }
        }

        fn header(&self, name: &str) -> Option<String> {
            self.headers
                .lock()
                .unwrap()
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
        }
    }

    async fn stub_messages(
        stub: web::Data<StubMessages>,
        req: HttpRequest,
        body: web::Json<serde_json::Value>,
    ) -> HttpResponse {
        for name in ["x-api-key", "anthropic-version"] {
            if let Some(value) = req.headers().get(name).and_then(|v| v.to_str().ok()) {
                stub.headers
                    .lock()
                    .unwrap()
                    .push((name.to_string(), value.to_string()));
            }
        }
        *stub.body.lock().unwrap() = Some(body.into_inner());

        let status = actix_web::http::StatusCode::from_u16(stub.status).unwrap();
        HttpResponse::build(status).json(stub.reply.clone())
    }

    /// Serve `stub` on a free local port and return its base URL
    fn spawn_stub(stub: web::Data<StubMessages>) -> String {
        let server = HttpServer::new(move || {
            App::new()
                .app_data(stub.clone())
                .route("/v1/messages", web::post().to(stub_messages))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        format!("http://{}", addr)
    }

    fn request() -> GenerateRequest {
        GenerateRequest {
            model: "claude-sonnet-4-20250514".to_string(),
            prompt: "Write the follow-up email.".to_string(),
            max_tokens: 1024,
        }
    }

    #[actix_web::test]
    async fn test_generate_sends_headers_and_body() {
        let stub = web::Data::new(StubMessages::new(
            200,
            json!({
                "content": [
                    { "type": "text", "text": "Subject: Next steps\n\n" },
                    { "type": "text", "text": "Hi Dana" }
                ]
            }),
        ));
        let client =
            AnthropicClient::new(spawn_stub(stub.clone()), "sk-test", "claude-sonnet-4-20250514")
                .unwrap();

        let text = client.generate(request()).await.unwrap();
        assert_eq!(text, "Subject: Next steps\n\nHi Dana");

        assert_eq!(stub.header("x-api-key").as_deref(), Some("sk-test"));
        assert_eq!(stub.header("anthropic-version").as_deref(), Some("2023-06-01"));
        let body = stub.body.lock().unwrap().clone().unwrap();
        assert_eq!(body["model"], "claude-sonnet-4-20250514");
        assert_eq!(body["max_tokens"], 1024);
        assert_eq!(
            body["messages"],
            json!([{ "role": "user", "content": "Write the follow-up email." }])
        );
    }

    #[actix_web::test]
    async fn test_generate_maps_api_error() {
        let stub = web::Data::new(StubMessages::new(
            401,
            json!({
                "type": "error",
                "error": { "type": "authentication_error", "message": "invalid x-api-key" }
            }),
        ));
        let client =
            AnthropicClient::new(spawn_stub(stub), "bad-key", "claude-sonnet-4-20250514").unwrap();

        let err = client.generate(request()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Generation);
        assert_eq!(
            err.detail(),
            "Anthropic API error 401 (authentication_error): invalid x-api-key"
        );
    }

    #[actix_web::test]
    async fn test_generate_passes_empty_reply_through() {
        let stub = web::Data::new(StubMessages::new(200, json!({ "content": [] })));
        let client =
            AnthropicClient::new(spawn_stub(stub), "sk-test", "claude-sonnet-4-20250514").unwrap();

        assert_eq!(client.generate(request()).await.unwrap(), "");
    }
}
