//! Error type for the port-fill pipeline.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Why a fill produced no items. Per-item location failures are not errors;
/// they leave the item unplaced.
#[derive(Debug, Error)]
pub enum FillError {
  #[error("port {0} not found")]
  PortNotFound(i64),

  #[error("PROMPT_FILLPORT is empty. Configure it in Settings.")]
  PromptNotConfigured,

  #[error("generation failed: {0}")]
  Upstream(#[source] BoxError),

  /// The reply did not contain a parseable JSON array. `raw` is the reply
  /// exactly as received.
  #[error("failed to parse generated response as JSON: {source}")]
  Parse {
    #[source]
    source: serde_json::Error,
    raw:    String,
  },

  #[error("store error: {0}")]
  Store(#[source] BoxError),
}
