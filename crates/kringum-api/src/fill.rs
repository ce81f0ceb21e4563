//! `POST /ports/{id}/fill`

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use kringum_core::{
  item::Item,
  store::CatalogStore,
  upstream::{Generator, Geocoder},
};
use kringum_fill::PortFiller;

use crate::error::ApiError;

/// Run the fill pipeline for a port and return the inserted items.
pub async fn handler<S, G, C>(
  State(filler): State<Arc<PortFiller<S, G, C>>>,
  Path(id): Path<i64>,
) -> Result<Json<Vec<Item>>, ApiError>
where
  S: CatalogStore,
  G: Generator,
  C: Geocoder,
{
  match filler.fill(id).await {
    Ok(items) => Ok(Json(items)),
    Err(e) => {
      tracing::warn!(port_id = id, error = %e, "port fill failed");
      Err(e.into())
    }
  }
}
