//! OpenAI-compatible chat completions service
//!
//! Posts a non-streaming request to `{endpoint}/chat/completions` and reads
//! the reply from the first choice:
//! ```text
//! {"id":"chatcmpl-xxx","choices":[{"index":0,"message":{"role":"assistant","content":"{...}"}}]}
//! ```

use async_trait::async_trait;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use spamcheck_core::{ChatMessage, Error, Result, ServiceError};
use std::time::Duration;
use tracing::debug;

use crate::ClassificationService;

/// Default endpoint (Groq's OpenAI-compatible API)
pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1";

/// Default chat model
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Settings for the chat completions service
#[derive(Debug, Clone)]
pub struct ChatServiceConfig {
    /// Base URL, without the `/chat/completions` suffix
    pub endpoint: String,

    pub model: String,

    /// Bearer token
    pub api_key: String,

    pub temperature: f32,

    pub max_tokens: u32,

    /// Upper bound for one HTTP round trip
    pub timeout: Duration,
}

impl ChatServiceConfig {
    /// Create settings with defaults for everything but the key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
            temperature: 0.0,
            max_tokens: 1000,
            timeout: Duration::from_secs(30),
        }
    }

    /// Full URL of the completions route
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint.trim_end_matches('/'))
    }
}

/// Chat completions client
pub struct ChatCompletionsService {
    client: reqwest::Client,
    config: ChatServiceConfig,
}

impl ChatCompletionsService {
    /// Create a client from settings
    pub fn new(config: ChatServiceConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::config("classification service API key is empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl ClassificationService for ChatCompletionsService {
    async fn complete(
        &self,
        instructions: &str,
        document_text: &str,
    ) -> std::result::Result<String, ServiceError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage::system(instructions),
                ChatMessage::user(format!("Content: {}", document_text)),
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            stream: false,
        };

        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(request_failure)?;

        let status = response.status();
        let retry_after = parse_retry_after(response.headers());
        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::transient(format!("failed to read response body: {}", e)))?;

        debug!(status = status.as_u16(), bytes = body.len(), "classification service replied");

        if status.is_success() {
            extract_reply(&body)
        } else {
            Err(classify_status(status, retry_after, &body))
        }
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ChatReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Pull the reply text out of a successful response body.
///
/// A well-formed response without content yields an empty reply, which the
/// decoder reports as `empty`.
pub fn extract_reply(body: &str) -> std::result::Result<String, ServiceError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ServiceError::transient(format!("unreadable completion body: {}", e)))?;

    Ok(response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .unwrap_or_default())
}

/// Map a non-success status to a service failure
pub fn classify_status(
    status: StatusCode,
    retry_after: Option<Duration>,
    body: &str,
) -> ServiceError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| format!("HTTP {}", status.as_u16()));
    let reason = format!("{} ({})", detail, status.as_u16());

    match status {
        StatusCode::TOO_MANY_REQUESTS => ServiceError::rate_limited(reason, retry_after),
        StatusCode::REQUEST_TIMEOUT => ServiceError::transient(reason),
        s if s.is_server_error() => ServiceError::transient(reason),
        s if s.is_client_error() => ServiceError::fatal(reason),
        _ => ServiceError::transient(reason),
    }
}

/// Read a `Retry-After` header given in seconds
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

fn request_failure(error: reqwest::Error) -> ServiceError {
    if error.is_timeout() {
        ServiceError::transient("request timed out")
    } else if error.is_builder() {
        ServiceError::fatal(format!("invalid request: {}", error))
    } else {
        ServiceError::transient(format!("request failed: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_extract_reply_from_first_choice() {
        let body = concat!(
            r#"{"id":"x","choices":[{"index":0,"#,
            r#""message":{"role":"assistant","content":"  {\"ads\": 1}\n"}}]}"#
        );
        assert_eq!(extract_reply(body).unwrap(), r#"{"ads": 1}"#);
    }

    #[test]
    fn test_extract_reply_without_choices_is_empty() {
        assert_eq!(extract_reply(r#"{"choices":[]}"#).unwrap(), "");
        let null_content = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        assert_eq!(extract_reply(null_content).unwrap(), "");
    }

    #[test]
    fn test_extract_reply_garbage_is_transient() {
        let err = extract_reply("<html>bad gateway</html>").unwrap_err();
        assert!(err.is_transient());
    }

    #[test]
    fn test_rate_limit_is_transient_with_hint() {
        let err = classify_status(
            StatusCode::TOO_MANY_REQUESTS,
            Some(Duration::from_secs(12)),
            r#"{"error":{"message":"Rate limit reached"}}"#,
        );
        assert!(err.is_transient());
        assert_eq!(err.retry_after(), Some(Duration::from_secs(12)));
        assert!(err.reason().contains("Rate limit reached"));
    }

    #[test]
    fn test_server_errors_are_transient() {
        for status in [
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::BAD_GATEWAY,
            StatusCode::SERVICE_UNAVAILABLE,
        ] {
            assert!(classify_status(status, None, "").is_transient());
        }
        assert!(classify_status(StatusCode::REQUEST_TIMEOUT, None, "").is_transient());
    }

    #[test]
    fn test_client_errors_are_fatal() {
        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::UNAUTHORIZED,
            StatusCode::FORBIDDEN,
            StatusCode::NOT_FOUND,
        ] {
            let err = classify_status(status, None, "");
            assert!(!err.is_transient(), "{status} should be fatal");
        }
    }

    #[test]
    fn test_parse_retry_after_seconds() {
        let mut headers = HeaderMap::new();
        assert_eq!(parse_retry_after(&headers), None);

        headers.insert(RETRY_AFTER, HeaderValue::from_static("30"));
        assert_eq!(parse_retry_after(&headers), Some(Duration::from_secs(30)));

        headers.insert(RETRY_AFTER, HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"));
        assert_eq!(parse_retry_after(&headers), None);
    }

    #[test]
    fn test_empty_api_key_is_config_error() {
        let err = ChatCompletionsService::new(ChatServiceConfig::new("  ")).err().unwrap();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_completions_url_trims_slash() {
        let mut config = ChatServiceConfig::new("key");
        config.endpoint = "http://localhost:8080/v1/".to_string();
        assert_eq!(config.completions_url(), "http://localhost:8080/v1/chat/completions");
    }
}
