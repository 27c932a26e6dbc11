//! Chat-completion client for the configured generation endpoint.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::GenerationError;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4.1";

/// Environment variable overriding the HTTP timeout (seconds).
const TIMEOUT_ENV_VAR: &str = "GROMIT_TIMEOUT";

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Get the request timeout from the environment or use the default.
fn get_timeout() -> Duration {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}

/// Outcome of one generation call. Failures carry a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    Success { text: String },
    Failure { reason: String },
}

impl GenerationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, GenerationResult::Success { .. })
    }

    pub fn into_result(self) -> Result<String, String> {
        match self {
            GenerationResult::Success { text } => Ok(text),
            GenerationResult::Failure { reason } => Err(reason),
        }
    }
}

/// The two fixed request profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallProfile {
    /// Short, low-temperature output for a single commit message.
    CommitMessage,
    /// Longer, more varied output for a PR title and description.
    PullRequest,
}

impl CallProfile {
    pub fn max_tokens(&self) -> u32 {
        match self {
            CallProfile::CommitMessage => 100,
            CallProfile::PullRequest => 1000,
        }
    }

    pub fn temperature(&self) -> f64 {
        match self {
            CallProfile::CommitMessage => 0.3,
            CallProfile::PullRequest => 0.7,
        }
    }
}

/// Endpoint URL and bearer key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub endpoint: String,
    pub api_key: String,
}

/// Anything that can turn a prompt into generated text.
///
/// This abstraction allows mocking the endpoint in command tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, profile: CallProfile) -> GenerationResult;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

/// HTTP client for an OpenAI-compatible chat-completions endpoint.
///
/// One attempt per call, no retries.
#[derive(Debug, Clone)]
pub struct GenerationClient {
    http: reqwest::Client,
    credentials: Credentials,
    model: String,
}

impl GenerationClient {
    /// Create a client using the timeout from `GROMIT_TIMEOUT` (default 120s).
    pub fn new(credentials: Credentials, model: impl Into<String>) -> Result<Self, GenerationError> {
        Self::with_timeout(credentials, model, get_timeout())
    }

    pub fn with_timeout(
        credentials: Credentials,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(GenerationError::ClientBuild)?;

        Ok(Self {
            http,
            credentials,
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send `prompt` with `profile` and return the trimmed message content.
    pub async fn send(&self, prompt: &str, profile: CallProfile) -> Result<String, GenerationError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: profile.max_tokens(),
            temperature: profile.temperature(),
        };

        debug!(
            "Sending {} char prompt to {} (model {}, profile {:?})",
            prompt.len(),
            self.credentials.endpoint,
            self.model,
            profile
        );

        let response = self
            .http
            .post(&self.credentials.endpoint)
            .bearer_auth(&self.credentials.api_key)
            .json(&request)
            .send()
            .await
            .map_err(GenerationError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(GenerationError::Transport)?;

        if !status.is_success() {
            return Err(GenerationError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Generation endpoint returned {}", status);
        parse_chat_response(&body)
    }
}

#[async_trait]
impl TextGenerator for GenerationClient {
    async fn generate(&self, prompt: &str, profile: CallProfile) -> GenerationResult {
        match self.send(prompt, profile).await {
            Ok(text) => GenerationResult::Success { text },
            Err(e) => {
                debug!("Generation failed: {}", e);
                GenerationResult::Failure {
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// Extract `choices[0].message.content` from a response body.
fn parse_chat_response(body: &str) -> Result<String, GenerationError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GenerationError::InvalidResponse("no choices returned".to_string()))?;

    let content = choice.message.content.unwrap_or_default();
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(GenerationError::EmptyContent);
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_valid_response() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  feat: add login\n"}}]}"#;
        assert_eq!(parse_chat_response(body).unwrap(), "feat: add login");
    }

    #[test]
    fn test_parse_missing_choices() {
        let result = parse_chat_response(r#"{"error":"nope"}"#);
        assert!(matches!(result, Err(GenerationError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_empty_choices() {
        let result = parse_chat_response(r#"{"choices":[]}"#);
        assert!(matches!(result, Err(GenerationError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_null_or_blank_content() {
        assert!(matches!(
            parse_chat_response(r#"{"choices":[{"message":{"content":null}}]}"#),
            Err(GenerationError::EmptyContent)
        ));
        assert!(matches!(
            parse_chat_response(r#"{"choices":[{"message":{"content":"  \n "}}]}"#),
            Err(GenerationError::EmptyContent)
        ));
    }

    #[test]
    fn test_parse_not_json() {
        let result = parse_chat_response("<html>bad gateway</html>");
        assert!(matches!(result, Err(GenerationError::InvalidResponse(_))));
    }

    #[test]
    fn test_profiles_differ_only_in_size_and_temperature() {
        assert_eq!(CallProfile::CommitMessage.max_tokens(), 100);
        assert_eq!(CallProfile::CommitMessage.temperature(), 0.3);
        assert!(CallProfile::PullRequest.max_tokens() > CallProfile::CommitMessage.max_tokens());
        assert!(CallProfile::PullRequest.temperature() > CallProfile::CommitMessage.temperature());
    }

    #[test]
    fn test_generation_result_into_result() {
        let ok = GenerationResult::Success { text: "x".into() };
        assert!(ok.is_success());
        assert_eq!(ok.into_result(), Ok("x".to_string()));

        let err = GenerationResult::Failure { reason: "boom".into() };
        assert_eq!(err.into_result(), Err("boom".to_string()));
    }

    #[test]
    #[serial]
    fn test_timeout_default() {
        temp_env::with_var_unset(TIMEOUT_ENV_VAR, || {
            assert_eq!(get_timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        });
    }

    #[test]
    #[serial]
    fn test_timeout_from_env() {
        temp_env::with_var(TIMEOUT_ENV_VAR, Some("30"), || {
            assert_eq!(get_timeout(), Duration::from_secs(30));
        });
    }

    #[test]
    #[serial]
    fn test_timeout_invalid_falls_back() {
        temp_env::with_var(TIMEOUT_ENV_VAR, Some("soon"), || {
            assert_eq!(get_timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        });
    }
}
