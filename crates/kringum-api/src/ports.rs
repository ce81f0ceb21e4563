//! Handlers for `/ports` endpoints (except fill, see [`crate::fill`]).

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use kringum_core::{item::UnplacedItem, port::Port, store::CatalogStore};
use serde_json::{Value, json};

use crate::error::ApiError;

/// `GET /ports`
pub async fn list<S: CatalogStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Port>>, ApiError> {
  let ports = store
    .list_ports()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(ports))
}

/// `GET /ports/{id}`
pub async fn get_one<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Port>, ApiError> {
  store
    .get_port(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("port {id}")))
}

// ── Items owned by a port ──

/// `GET /ports/{id}/items`: `{"count": n}`. Unknown ports count 0.
pub async fn count_items<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
  let count = store
    .count_port_items(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(json!({ "count": count })))
}

/// `DELETE /ports/{id}/items`
pub async fn delete_items<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
  let deleted = store
    .delete_port_items(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  tracing::info!(port_id = id, deleted, "port items deleted");
  Ok(Json(json!({ "ok": true, "deleted": deleted })))
}

/// `GET /ports/{id}/unplaced`
pub async fn unplaced<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Vec<UnplacedItem>>, ApiError> {
  let items = store
    .list_unplaced(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(items))
}
