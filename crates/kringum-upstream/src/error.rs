use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
  #[error("no API key configured (set ANTHROPIC_API_KEY)")]
  MissingApiKey,

  #[error("HTTP request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("upstream returned {status}: {message}")]
  Status { status: u16, message: String },

  #[error("response contained no text content")]
  EmptyResponse,
}

pub type Result<T, E = UpstreamError> = std::result::Result<T, E>;
