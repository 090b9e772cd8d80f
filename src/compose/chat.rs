//! OpenAI-compatible chat completions composer.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::compose::{ComposeRequest, Composer};
use crate::config::ComposerConfig;
use crate::error::{Result, SiftError};

const BASE_BACKOFF_MS: u64 = 500;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Sends the composed prompt to a hosted chat model.
pub struct ChatComposer {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f32,
    max_tokens: u32,
    max_retries: u32,
    backoff: Duration,
}

impl ChatComposer {
    /// Build from config; fails when the API key variable is unset.
    pub fn from_config(config: &ComposerConfig) -> Result<Self> {
        let api_key = config.api_key().ok_or_else(|| {
            SiftError::MissingConfig(format!("{} is not set", config.api_key_env))
        })?;
        Self::new(config, api_key)
    }

    pub fn new(config: &ComposerConfig, api_key: String) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|err| SiftError::Config(format!("composer http client: {err}")))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            max_retries: config.max_retries,
            backoff: Duration::from_millis(BASE_BACKOFF_MS),
        })
    }

    /// Base delay before the first retry; doubles after each attempt.
    #[must_use]
    pub const fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff
            .saturating_mul(1_u32 << (attempt - 1).min(16))
    }

    fn send_once(&self, body: &ChatRequest<'_>) -> Attempt {
        let response = match self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
        {
            Ok(response) => response,
            Err(err) => return Attempt::Retry(format!("request failed: {err}")),
        };

        let status = response.status();
        if status.as_u16() == 429 || status.is_server_error() {
            let text = response.text().unwrap_or_default();
            return Attempt::Retry(format!("HTTP {status}: {}", text.trim()));
        }

        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&text)
                .map(|err| err.error.message)
                .unwrap_or(text);
            return Attempt::Fatal(format!("HTTP {status}: {}", message.trim()));
        }

        match response.json::<ChatResponse>() {
            Ok(parsed) => parsed
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .map(|content| content.trim().to_string())
                .filter(|content| !content.is_empty())
                .map_or_else(
                    || Attempt::Fatal("model returned no content".to_string()),
                    Attempt::Done,
                ),
            Err(err) => Attempt::Fatal(format!("decode response: {err}")),
        }
    }
}

enum Attempt {
    Done(String),
    Retry(String),
    Fatal(String),
}

impl Composer for ChatComposer {
    fn compose(&self, request: &ComposeRequest) -> Result<String> {
        let prompt = request.prompt();
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let attempts = self.max_retries.max(1);
        let mut last_error = String::new();
        for attempt in 0..attempts {
            if attempt > 0 {
                let delay = self.delay_for(attempt);
                warn!(
                    attempt,
                    delay_ms = delay.as_millis(),
                    error = %last_error,
                    "composer call failed, retrying"
                );
                std::thread::sleep(delay);
            }

            match self.send_once(&body) {
                Attempt::Done(answer) => {
                    debug!(model = %self.model, attempt, chars = answer.len(), "composer answered");
                    return Ok(answer);
                }
                Attempt::Retry(reason) => last_error = reason,
                Attempt::Fatal(reason) => return Err(SiftError::Compose(reason)),
            }
        }

        Err(SiftError::Compose(format!(
            "gave up after {attempts} attempts: {last_error}"
        )))
    }
}
