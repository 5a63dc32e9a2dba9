//! Client for the chat relay.
//!
//! `POST {api_base}/chat` with
//! `{"session_id": "...", "messages": [{"role", "content"}], "meta": {"source": "aura"}}`,
//! answered with `{"reply": "..."}`. Failed requests are retried with
//! exponential backoff.

use std::future::Future;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use aura_core::storage::{Storage, SESSION_KEY};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shown in place of a reply when the relay cannot be reached.
pub const FALLBACK_REPLY: &str = "Sorry, I'm having trouble connecting right now. Please try again later.";

/// Retry behavior for relay requests.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts, including the first
    pub max_attempts: u8,
    /// Wait after the first failure; doubled after each further failure
    pub base_backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff: Duration::from_secs(1),
        }
    }
}

impl RetryConfig {
    /// Wait after the given failed attempt (1-based).
    pub fn backoff(&self, attempt: u8) -> Duration {
        self.base_backoff * 2u32.saturating_pow(u32::from(attempt.saturating_sub(1)))
    }
}

/// A failed attempt, and whether trying again could help.
#[derive(Debug)]
enum AttemptError {
    Transient(anyhow::Error),
    Fatal(anyhow::Error),
}

impl AttemptError {
    fn from_status(status: StatusCode, body: &str) -> Self {
        let err = if body.trim().is_empty() {
            anyhow!("HTTP {}", status)
        } else {
            anyhow!("{}", body.trim())
        };

        if status.is_server_error()
            || status == StatusCode::TOO_MANY_REQUESTS
            || status == StatusCode::REQUEST_TIMEOUT
        {
            AttemptError::Transient(err)
        } else {
            AttemptError::Fatal(err)
        }
    }
}

/// Run `attempt` until it succeeds, fails fatally, or runs out of attempts.
async fn with_retry<T, F, Fut>(config: &RetryConfig, mut attempt: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, AttemptError>>,
{
    let mut attempts = 0u8;

    loop {
        attempts += 1;

        match attempt().await {
            Ok(value) => return Ok(value),
            Err(AttemptError::Fatal(e)) => return Err(e),
            Err(AttemptError::Transient(e)) => {
                if attempts >= config.max_attempts {
                    return Err(e.context(format!("Gave up after {} attempts", attempts)));
                }

                let wait = config.backoff(attempts);
                tracing::warn!(
                    attempt = attempts,
                    wait_ms = wait.as_millis() as u64,
                    error = %e,
                    "chat request failed, retrying"
                );
                tokio::time::sleep(wait).await;
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "user",
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    session_id: &'a str,
    messages: &'a [ChatMessage],
    meta: ChatMeta,
}

#[derive(Serialize)]
struct ChatMeta {
    source: &'static str,
}

#[derive(Deserialize)]
struct ChatReply {
    reply: String,
}

pub struct ChatRelay {
    client: reqwest::Client,
    base: String,
    retry: RetryConfig,
}

impl ChatRelay {
    pub fn new(base: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(format!("aura-cli/{}", CURRENT_VERSION))
            .build()?;

        Ok(ChatRelay {
            client,
            base: base.trim_end_matches('/').to_string(),
            retry: RetryConfig::default(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat", self.base)
    }

    pub async fn send(&self, session_id: &str, messages: &[ChatMessage]) -> Result<String> {
        let url = self.endpoint();
        let request = ChatRequest {
            session_id,
            messages,
            meta: ChatMeta { source: "aura" },
        };

        tracing::debug!(%url, messages = messages.len(), "sending chat request");

        let client = &self.client;
        let url = url.as_str();
        let request = &request;

        with_retry(&self.retry, move || async move {
            let response = client
                .post(url)
                .json(request)
                .send()
                .await
                .with_context(|| format!("Could not reach chat relay at {}", url))
                .map_err(AttemptError::Transient)?;

            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            if !status.is_success() {
                return Err(AttemptError::from_status(status, &text));
            }

            parse_reply(&text).map_err(AttemptError::Fatal)
        })
        .await
    }
}

fn parse_reply(text: &str) -> Result<String> {
    let reply: ChatReply = serde_json::from_str(text)
        .with_context(|| format!("Invalid JSON from /chat: {}", text))?;
    Ok(reply.reply)
}

/// The chat session id, created and saved on first use.
pub fn session_id(storage: &impl Storage) -> Result<String> {
    if let Some(id) = storage.get(SESSION_KEY)?.filter(|id| !id.trim().is_empty()) {
        return Ok(id.trim().to_string());
    }

    let id = uuid::Uuid::new_v4().to_string();
    if let Err(e) = storage.set(SESSION_KEY, &id) {
        tracing::warn!(error = %e, "could not save chat session id");
    }
    Ok(id)
}
