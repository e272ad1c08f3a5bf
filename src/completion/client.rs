//! Remote completion client
//!
//! One blocking `POST {base_url}/completions` per call. The request and
//! response bodies follow the legacy OpenAI completions schema.

use crate::config::ApiSettings;
use crate::credential::{ApiKey, KeyValidator};
use crate::error::{CompletionError, CompletionResult};
use reqwest::blocking::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Prompt used to check that a key is accepted
const KEY_CHECK_PROMPT: &str = "test";

/// Longest service error body echoed back to the user
const MAX_ERROR_CHARS: usize = 200;

/// Request body for the completions endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub n: u32,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
}

impl CompletionRequest {
    /// Request for the main generation call
    pub fn generation(api: &ApiSettings, prompt: String) -> Self {
        CompletionRequest {
            model: api.model.clone(),
            prompt,
            max_tokens: api.max_tokens,
            n: 1,
            temperature: api.temperature,
            stop: None,
        }
    }

    /// Minimal request used to validate a key
    pub fn key_check(api: &ApiSettings) -> Self {
        CompletionRequest {
            model: api.model.clone(),
            prompt: KEY_CHECK_PROMPT.to_string(),
            max_tokens: 1,
            n: 1,
            temperature: api.temperature,
            stop: None,
        }
    }
}

/// Response body of the completions endpoint (only the fields we read)
#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Anything that can turn a request into generated text
pub trait CompletionClient {
    /// Send one request and return the first choice's text, trimmed
    fn complete(&self, key: &ApiKey, request: &CompletionRequest) -> CompletionResult<String>;
}

/// HTTP client for an OpenAI-compatible completions endpoint
pub struct OpenAiClient {
    http: HttpClient,
    endpoint: String,
}

impl OpenAiClient {
    pub fn new(api: &ApiSettings) -> CompletionResult<Self> {
        let mut builder = HttpClient::builder()
            .user_agent(concat!("cmdgen/", env!("CARGO_PKG_VERSION")))
            .timeout(api.timeout_secs.map(Duration::from_secs));

        // Local endpoints never go through a system proxy
        if is_loopback(&api.base_url) {
            builder = builder.no_proxy();
        }

        let http = builder
            .build()
            .map_err(|e| CompletionError::Request(e.to_string()))?;

        Ok(OpenAiClient {
            http,
            endpoint: completions_endpoint(&api.base_url),
        })
    }

    /// Full URL requests are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl CompletionClient for OpenAiClient {
    fn complete(&self, key: &ApiKey, request: &CompletionRequest) -> CompletionResult<String> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(key.expose())
            .json(request)
            .send()
            .map_err(|e| CompletionError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| CompletionError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(CompletionError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        parse_completion(&body)
    }
}

/// Checks a key by sending a one-token request through a client
pub struct RemoteKeyValidator<'a, C: CompletionClient> {
    client: &'a C,
    request: CompletionRequest,
}

impl<'a, C: CompletionClient> RemoteKeyValidator<'a, C> {
    pub fn new(client: &'a C, api: &ApiSettings) -> Self {
        RemoteKeyValidator {
            client,
            request: CompletionRequest::key_check(api),
        }
    }
}

impl<C: CompletionClient> KeyValidator for RemoteKeyValidator<'_, C> {
    fn validate(&self, key: &ApiKey) -> CompletionResult<()> {
        self.client.complete(key, &self.request).map(|_| ())
    }
}

/// Join the base URL and the completions path
pub fn completions_endpoint(base_url: &str) -> String {
    format!("{}/completions", base_url.trim().trim_end_matches('/'))
}

/// Whether a base URL points at this machine
fn is_loopback(base_url: &str) -> bool {
    reqwest::Url::parse(base_url.trim())
        .ok()
        .and_then(|url| url.host_str().map(|h| h.to_string()))
        .map(|host| matches!(host.as_str(), "localhost" | "127.0.0.1" | "[::1]"))
        .unwrap_or(false)
}

/// Extract the first choice's text from a response body
pub fn parse_completion(body: &str) -> CompletionResult<String> {
    let response: CompletionResponse = serde_json::from_str(body)
        .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.text.trim().to_string())
        .ok_or(CompletionError::EmptyResponse)
}

/// Human-readable message from an error body
fn error_message(body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return envelope.error.message;
    }

    let trimmed = body.trim();
    if trimmed.chars().count() > MAX_ERROR_CHARS {
        let cut: String = trimmed.chars().take(MAX_ERROR_CHARS).collect();
        format!("{}...", cut)
    } else {
        trimmed.to_string()
    }
}
