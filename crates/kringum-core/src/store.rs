//! The `CatalogStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `kringum-store-sqlite`).
//! Higher layers (`kringum-fill`, `kringum-api`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use crate::{
  gps::GeoPoint,
  item::{Item, NewItem, UnplacedItem},
  port::Port,
  setting::Settings,
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`CatalogStore::list_items`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemQuery {
  /// Restrict to items owned by this port.
  pub port_id: Option<i64>,
  /// `Some(true)` keeps only items with a location, `Some(false)` only
  /// unplaced ones.
  pub placed:  Option<bool>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Kringum catalog backend.
///
/// Every method is a single, self-contained unit of work against the backend;
/// no method holds a connection or transaction open across calls.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CatalogStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Items ─────────────────────────────────────────────────────────────

  /// List items in insertion order.
  fn list_items<'a>(
    &'a self,
    query: &'a ItemQuery,
  ) -> impl Future<Output = Result<Vec<Item>, Self::Error>> + Send + 'a;

  /// Retrieve an item by id. Returns `None` if not found.
  fn get_item(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Item>, Self::Error>> + Send + '_;

  /// Insert a batch of items atomically and return them with their assigned
  /// ids, in input order. Either every row is written or none is.
  fn insert_items(
    &self,
    items: Vec<NewItem>,
  ) -> impl Future<Output = Result<Vec<Item>, Self::Error>> + Send + '_;

  /// Overwrite an item's location. Returns `false` if the item does not
  /// exist.
  fn set_item_gps(
    &self,
    id: i64,
    gps: GeoPoint,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Delete one item. Returns `false` if the item does not exist.
  fn delete_item(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Ports ─────────────────────────────────────────────────────────────

  fn list_ports(
    &self,
  ) -> impl Future<Output = Result<Vec<Port>, Self::Error>> + Send + '_;

  /// Retrieve a port by id. Returns `None` if not found.
  fn get_port(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Port>, Self::Error>> + Send + '_;

  /// Number of items owned by `port_id`. Unknown ports count as zero.
  fn count_port_items(
    &self,
    port_id: i64,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Items owned by `port_id` that have no location.
  fn list_unplaced(
    &self,
    port_id: i64,
  ) -> impl Future<Output = Result<Vec<UnplacedItem>, Self::Error>> + Send + '_;

  /// Delete every item owned by `port_id`; returns the number removed.
  fn delete_port_items(
    &self,
    port_id: i64,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  // ── Settings ──────────────────────────────────────────────────────────

  fn get_settings(
    &self,
  ) -> impl Future<Output = Result<Settings, Self::Error>> + Send + '_;

  /// Read a single setting. Returns `None` if the key is absent.
  fn get_setting<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;

  /// Insert or replace every key in `settings`. Keys not mentioned are left
  /// untouched.
  fn upsert_settings(
    &self,
    settings: Settings,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
