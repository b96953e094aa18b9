//! Completion client for the Anthropic Messages API.
//!
//! The trait is the seam: production wires [`AnthropicClient`], tests wire
//! [`MockCompletionClient`]. Both return plain text; streaming and tool use
//! are out of scope for a bartender.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{AiError, AiResult};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Model used when the deployment does not pin one.
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";

/// Speaker of one conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn of conversation, wire-compatible with the Messages API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// Everything one completion needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system: String,
    pub messages: Vec<ChatTurn>,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(messages: Vec<ChatTurn>) -> Self {
        Self { system: String::new(), messages, max_tokens: 1024 }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = system.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Non-streaming completion backend.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Run one completion and return the concatenated text content.
    async fn complete(&self, request: CompletionRequest) -> AiResult<String>;
}

#[async_trait]
impl<C> CompletionClient for Arc<C>
where
    C: CompletionClient + ?Sized,
{
    async fn complete(&self, request: CompletionRequest) -> AiResult<String> {
        (**self).complete(request).await
    }
}

/// Production client for the Anthropic Messages API.
pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl AnthropicClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_base_url(api_key, model, ANTHROPIC_API_URL)
    }

    /// Point the client at a different endpoint. Used by tests.
    pub fn with_base_url(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl CompletionClient for AnthropicClient {
    async fn complete(&self, request: CompletionRequest) -> AiResult<String> {
        if self.api_key.is_empty() {
            return Err(AiError::NotConfigured);
        }

        let body = MessagesRequest {
            model: &self.model,
            max_tokens: request.max_tokens,
            system: &request.system,
            messages: &request.messages,
        };

        let response = self
            .http
            .post(&self.base_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Upstream { status: status.as_u16(), body });
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|error| AiError::MalformedResponse(error.to_string()))?;

        let text: String = parsed
            .content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                ContentBlock::Other => None,
            })
            .collect();

        if text.is_empty() {
            return Err(AiError::MalformedResponse(
                "response carried no text content".to_string(),
            ));
        }
        Ok(text)
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: &'a [ChatTurn],
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

/// Scriptable in-memory client for tests.
///
/// Responses are handed out in queue order and every request is recorded for
/// assertion. An exhausted script fails the completion rather than blocking.
#[derive(Clone, Default)]
pub struct MockCompletionClient {
    script: Arc<Mutex<VecDeque<Result<String, u16>>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockCompletionClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful completion.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        lock(&self.script).push_back(Ok(text.into()));
        self
    }

    /// Queue an upstream failure with the given status.
    pub fn with_failure(self, status: u16) -> Self {
        lock(&self.script).push_back(Err(status));
        self
    }

    /// Requests seen so far, oldest first.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> AiResult<String> {
        lock(&self.requests).push(request);
        match lock(&self.script).pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(status)) => Err(AiError::Upstream {
                status,
                body: "scripted failure".to_string(),
            }),
            None => Err(AiError::MalformedResponse("mock script exhausted".to_string())),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
