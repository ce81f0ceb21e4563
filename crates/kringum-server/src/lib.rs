//! Configuration and wiring for the Kringum server binary.

use std::{path::PathBuf, sync::Arc, time::Duration};

use axum::Router;
use kringum_fill::{FillOptions, PortFiller};
use kringum_store_sqlite::SqliteStore;
use kringum_upstream::{
  AnthropicConfig, AnthropicGenerator, NominatimConfig, NominatimGeocoder,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Top-level server configuration, read from TOML and `KRINGUM_*` env vars.
/// Every field has a default, so an empty source is valid.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                 String,
  pub port:                 u16,
  pub store_path:           PathBuf,
  /// Falls back to `ANTHROPIC_API_KEY` when unset.
  pub anthropic_api_key:    Option<String>,
  pub anthropic_base_url:   String,
  pub anthropic_model:      String,
  pub anthropic_max_tokens: u32,
  pub nominatim_base_url:   String,
  pub nominatim_user_agent: String,
  pub geocode_timeout_secs: u64,
  pub geocode_delay_ms:     u64,
  pub disagreement_warn_km: f64,
}

impl Default for ServerConfig {
  fn default() -> Self {
    let anthropic = AnthropicConfig::default();
    let nominatim = NominatimConfig::default();
    let fill = FillOptions::default();
    Self {
      host:                 "127.0.0.1".into(),
      port:                 5000,
      store_path:           PathBuf::from("kringum.db"),
      anthropic_api_key:    None,
      anthropic_base_url:   anthropic.base_url,
      anthropic_model:      anthropic.model,
      anthropic_max_tokens: anthropic.max_tokens,
      nominatim_base_url:   nominatim.base_url,
      nominatim_user_agent: nominatim.user_agent,
      geocode_timeout_secs: nominatim.timeout.as_secs(),
      geocode_delay_ms:     fill.geocode_delay.as_millis() as u64,
      disagreement_warn_km: fill.disagreement_warn_km,
    }
  }
}

impl ServerConfig {
  /// `env_key` is used when no key is configured.
  pub fn anthropic_config(&self, env_key: Option<String>) -> AnthropicConfig {
    AnthropicConfig {
      api_key: self.anthropic_api_key.clone().or(env_key),
      base_url: self.anthropic_base_url.clone(),
      model: self.anthropic_model.clone(),
      max_tokens: self.anthropic_max_tokens,
      ..AnthropicConfig::default()
    }
  }

  pub fn nominatim_config(&self) -> NominatimConfig {
    NominatimConfig {
      base_url: self.nominatim_base_url.clone(),
      user_agent: self.nominatim_user_agent.clone(),
      timeout: Duration::from_secs(self.geocode_timeout_secs),
      ..NominatimConfig::default()
    }
  }

  pub fn fill_options(&self) -> FillOptions {
    FillOptions {
      geocode_delay:        Duration::from_millis(self.geocode_delay_ms),
      disagreement_warn_km: self.disagreement_warn_km,
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

pub type Filler = PortFiller<SqliteStore, AnthropicGenerator, NominatimGeocoder>;

/// The full application: the API under `/api`, with request tracing.
pub fn router(store: Arc<SqliteStore>, filler: Arc<Filler>) -> Router {
  Router::new()
    .nest("/api", kringum_api::api_router(store, filler))
    .layer(TraceLayer::new_for_http())
}
