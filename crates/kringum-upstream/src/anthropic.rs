//! Text generation through the Anthropic Messages API.

use std::time::Duration;

use kringum_core::upstream::Generator;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{Result, UpstreamError};

const API_VERSION: &str = "2023-06-01";

/// Connection and model settings for [`AnthropicGenerator`].
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
  /// Checked on every call; a missing key fails the call, not startup.
  pub api_key:    Option<String>,
  pub base_url:   String,
  pub model:      String,
  pub max_tokens: u32,
  pub timeout:    Duration,
}

impl Default for AnthropicConfig {
  fn default() -> Self {
    Self {
      api_key:    None,
      base_url:   "https://api.anthropic.com".into(),
      model:      "claude-sonnet-4-6".into(),
      max_tokens: 16384,
      timeout:    Duration::from_secs(300),
    }
  }
}

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
  model:      &'a str,
  max_tokens: u32,
  system:     &'a str,
  messages:   [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
  role:    &'static str,
  content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
  #[serde(default)]
  content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
  #[serde(rename = "type")]
  kind: String,
  #[serde(default)]
  text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
  error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
  message: String,
}

impl MessagesResponse {
  /// Text of the first text block.
  fn into_text(self) -> Option<String> {
    self
      .content
      .into_iter()
      .find(|b| b.kind == "text")
      .and_then(|b| b.text)
  }
}

/// The `error.message` of an API error body, or the body itself.
fn error_message(body: String) -> String {
  match serde_json::from_str::<ErrorResponse>(&body) {
    Ok(parsed) => parsed.error.message,
    Err(_) => body,
  }
}

// ─── Client ──────────────────────────────────────────────────────────────────

pub struct AnthropicGenerator {
  client: Client,
  config: AnthropicConfig,
}

impl AnthropicGenerator {
  pub fn new(config: AnthropicConfig) -> Result<Self> {
    let client = Client::builder().timeout(config.timeout).build()?;
    Ok(Self { client, config })
  }

  fn url(&self) -> String {
    format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'))
  }

  fn request<'a>(&'a self, system: &'a str, prompt: &'a str) -> MessagesRequest<'a> {
    MessagesRequest {
      model: &self.config.model,
      max_tokens: self.config.max_tokens,
      system,
      messages: [Message { role: "user", content: prompt }],
    }
  }
}

impl Generator for AnthropicGenerator {
  type Error = UpstreamError;

  /// `POST /v1/messages`
  async fn complete(&self, system: &str, prompt: &str) -> Result<String> {
    let api_key = self
      .config
      .api_key
      .as_deref()
      .filter(|k| !k.trim().is_empty())
      .ok_or(UpstreamError::MissingApiKey)?;

    tracing::debug!(model = %self.config.model, "sending generation request");
    let resp = self
      .client
      .post(self.url())
      .header("x-api-key", api_key)
      .header("anthropic-version", API_VERSION)
      .json(&self.request(system, prompt))
      .send()
      .await?;

    let status = resp.status();
    if !status.is_success() {
      let body = resp.text().await.unwrap_or_default();
      return Err(UpstreamError::Status {
        status:  status.as_u16(),
        message: error_message(body),
      });
    }

    let body: MessagesResponse = resp.json().await?;
    body.into_text().ok_or(UpstreamError::EmptyResponse)
  }
}
