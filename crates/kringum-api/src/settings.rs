//! Handlers for `/settings`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use kringum_core::{setting::Settings, store::CatalogStore};
use serde_json::{Map, Value, json};

use crate::error::ApiError;

/// `GET /settings`: every stored key and value.
pub async fn get_all<S: CatalogStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Settings>, ApiError> {
  let settings = store
    .get_settings()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(settings))
}

/// `POST /settings`, body `{"KEY": "value", ...}`. Each key is inserted or
/// replaced; keys not in the body are left alone. Non-string values are
/// stored as their JSON text, `null` as `""`.
pub async fn save<S: CatalogStore>(
  State(store): State<Arc<S>>,
  body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
  let Json(body) = body
    .map_err(|_| ApiError::BadRequest("JSON object body required".into()))?;

  let settings: Settings = body
    .into_iter()
    .map(|(key, value)| {
      let value = match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
      };
      (key, value)
    })
    .collect();

  let keys = settings.len();
  store
    .upsert_settings(settings)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  tracing::info!(keys, "settings saved");
  Ok(Json(json!({ "ok": true })))
}
