//! JSON REST API for Kringum.
//!
//! Exposes an axum [`Router`] backed by any [`CatalogStore`] plus a
//! [`PortFiller`] for the generation endpoint. Transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", kringum_api::api_router(store.clone(), filler))
//! ```

pub mod error;
pub mod fill;
pub mod items;
pub mod ports;
pub mod settings;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, patch, post},
};
use kringum_core::{
  store::CatalogStore,
  upstream::{Generator, Geocoder},
};
use kringum_fill::PortFiller;

pub use error::ApiError;

/// Build a fully-materialised API router.
///
/// CRUD handlers only see the store; the fill endpoint gets the filler as its
/// own state. The two are merged into one `Router<()>`.
pub fn api_router<S, G, C>(
  store: Arc<S>,
  filler: Arc<PortFiller<S, G, C>>,
) -> Router<()>
where
  S: CatalogStore + 'static,
  G: Generator + 'static,
  C: Geocoder + 'static,
{
  let catalog = Router::new()
    // Items
    .route("/items", get(items::list::<S>))
    .route("/items/{id}", get(items::get_one::<S>).delete(items::delete_one::<S>))
    .route("/items/{id}/gps", patch(items::set_gps::<S>))
    // Ports
    .route("/ports", get(ports::list::<S>))
    .route("/ports/{id}", get(ports::get_one::<S>))
    .route(
      "/ports/{id}/items",
      get(ports::count_items::<S>).delete(ports::delete_items::<S>),
    )
    .route("/ports/{id}/unplaced", get(ports::unplaced::<S>))
    // Settings
    .route("/settings", get(settings::get_all::<S>).post(settings::save::<S>))
    .with_state(store);

  let generation = Router::new()
    .route("/ports/{id}/fill", post(fill::handler::<S, G, C>))
    .with_state(filler);

  catalog.merge(generation)
}
