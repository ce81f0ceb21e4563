//! Pulling a JSON array out of a free-form model reply.
//!
//! Models are told to answer with a bare array but often wrap it in a
//! markdown fence or put a sentence in front of it. Resolution order:
//!
//! 1. the array inside a ```` ``` ```` / ```` ```json ```` fence, if any;
//! 2. otherwise the trimmed reply;
//! 3. if that does not start with `[`, the span from the first `[` to the
//!    last `]`.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static FENCED_ARRAY: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"```(?:json)?\s*(\[[\s\S]*\])\s*```").expect("fence pattern is valid")
});

static BRACKETED: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\[[\s\S]*\]").expect("bracket pattern is valid"));

/// The slice of `raw` that should hold the JSON array.
pub fn array_span(raw: &str) -> &str {
  let body = FENCED_ARRAY
    .captures(raw)
    .and_then(|c| c.get(1))
    .map_or_else(|| raw.trim(), |m| m.as_str());

  if body.starts_with('[') {
    return body;
  }
  BRACKETED.find(body).map_or(body, |m| m.as_str())
}

/// Parse the array found by [`array_span`]. Anything other than a JSON array
/// is an error.
pub fn extract_array(raw: &str) -> Result<Vec<Value>, serde_json::Error> {
  serde_json::from_str(array_span(raw))
}
