//! Handlers for `/items` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/items` | Optional `?portid=<id>&placed=<bool>` |
//! | `GET`    | `/items/{id}` | 404 if not found |
//! | `DELETE` | `/items/{id}` | 404 if not found |
//! | `PATCH`  | `/items/{id}/gps` | Body: `{"lat": 64.1, "lon": "-21.9"}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State, rejection::JsonRejection},
};
use kringum_core::{
  gps::{GeoPoint, coordinate_from_json},
  item::Item,
  store::{CatalogStore, ItemQuery},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub portid: Option<i64>,
  pub placed: Option<bool>,
}

/// `GET /items[?portid=<id>][&placed=<bool>]`
pub async fn list<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Item>>, ApiError> {
  let query = ItemQuery { port_id: params.portid, placed: params.placed };
  let items = store
    .list_items(&query)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(items))
}

// ─── Get / delete one ─────────────────────────────────────────────────────────

/// `GET /items/{id}`
pub async fn get_one<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Item>, ApiError> {
  store
    .get_item(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("item {id}")))
}

/// `DELETE /items/{id}`
pub async fn delete_one<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
  let deleted = store
    .delete_item(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !deleted {
    return Err(ApiError::NotFound(format!("item {id}")));
  }
  Ok(Json(json!({ "ok": true })))
}

// ─── Set location ─────────────────────────────────────────────────────────────

/// `PATCH /items/{id}/gps`
///
/// `lat` and `lon` may each be a JSON number or a numeric string.
pub async fn set_gps<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
  let Json(body) =
    body.map_err(|_| ApiError::BadRequest("JSON body required".into()))?;

  let numeric = |field: &str| body.get(field).and_then(coordinate_from_json);
  let (Some(lat), Some(lon)) = (numeric("lat"), numeric("lon")) else {
    return Err(ApiError::BadRequest("lat and lon must be numeric".into()));
  };
  let point =
    GeoPoint::new(lat, lon).map_err(|e| ApiError::BadRequest(e.to_string()))?;

  let updated = store
    .set_item_gps(id, point)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !updated {
    return Err(ApiError::NotFound(format!("item {id}")));
  }

  tracing::info!(item_id = id, gps = %point, "item location set");
  Ok(Json(json!({ "ok": true, "gps": point.to_string() })))
}
