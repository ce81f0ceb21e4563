//! Traits for the two outbound services the port-fill pipeline calls.
//!
//! Concrete HTTP adapters live in `kringum-upstream`; tests substitute
//! scripted implementations.

use std::future::Future;

use crate::gps::GeoPoint;

/// A prompt-completion service.
pub trait Generator: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Send `prompt` under the `system` instruction and return the raw
  /// response text. The response shape is not validated here.
  fn complete<'a>(
    &'a self,
    system: &'a str,
    prompt: &'a str,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;
}

/// A free-text address lookup.
///
/// Best-effort by contract: any failure (network, timeout, no candidates)
/// yields `None` and is logged by the implementation.
pub trait Geocoder: Send + Sync {
  fn geocode<'a>(
    &'a self,
    address: &'a str,
  ) -> impl Future<Output = Option<GeoPoint>> + Send + 'a;
}
