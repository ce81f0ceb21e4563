//! Per-candidate location resolution.
//!
//! Priority, first hit wins:
//!
//! 1. geocode the `address` (authoritative when it succeeds);
//! 2. the model-supplied `gps` pair;
//! 3. legacy `lat`/`lon` fields;
//! 4. unplaced.
//!
//! Every geocoding attempt is followed by a fixed pause, hit or miss, so the
//! lookup service's shared-use limit holds across a whole batch.

use std::time::Duration;

use kringum_core::{gps::GeoPoint, upstream::Geocoder};

use crate::candidate::Candidate;

/// Where a resolved location came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSource {
  Geocoded,
  Supplied,
  Legacy,
  Unplaced,
}

/// The outcome of resolving one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
  pub gps:    Option<GeoPoint>,
  pub source: LocationSource,
}

impl Resolution {
  pub fn geocoded(point: GeoPoint) -> Self {
    Self { gps: Some(point), source: LocationSource::Geocoded }
  }

  pub fn supplied(point: GeoPoint) -> Self {
    Self { gps: Some(point), source: LocationSource::Supplied }
  }

  pub fn legacy(point: GeoPoint) -> Self {
    Self { gps: Some(point), source: LocationSource::Legacy }
  }

  pub fn unplaced() -> Self { Self { gps: None, source: LocationSource::Unplaced } }

  pub fn is_geocoded(&self) -> bool { self.source == LocationSource::Geocoded }
}

/// Resolves candidates one at a time against a [`Geocoder`].
pub struct Resolver<'a, G> {
  geocoder:      &'a G,
  geocode_delay: Duration,
  warn_km:       f64,
}

impl<'a, G: Geocoder> Resolver<'a, G> {
  /// `geocode_delay` is slept after every lookup; a geocoded point further
  /// than `warn_km` from the model-supplied one is logged.
  pub fn new(geocoder: &'a G, geocode_delay: Duration, warn_km: f64) -> Self {
    Self { geocoder, geocode_delay, warn_km }
  }

  pub async fn resolve(&self, candidate: &Candidate) -> Resolution {
    let supplied = candidate.supplied_point();

    if let Some(address) = candidate.address() {
      let hit = self.geocoder.geocode(address).await;
      tokio::time::sleep(self.geocode_delay).await;

      if let Some(point) = hit {
        tracing::info!(address, gps = %point, "geocoded address");
        if let Some(supplied) = supplied {
          let km = point.distance_km(&supplied);
          if km > self.warn_km {
            tracing::warn!(
              name = %candidate.name,
              address,
              geocoded = %point,
              supplied = %supplied,
              distance_km = km,
              "geocoded location disagrees with generated gps; keeping geocoded"
            );
          }
        }
        return Resolution::geocoded(point);
      }
    }

    if let Some(point) = supplied {
      return Resolution::supplied(point);
    }
    if let Some(point) = candidate.legacy_point() {
      return Resolution::legacy(point);
    }

    tracing::warn!(
      name = %candidate.name,
      "missing or invalid coordinates, item will be unplaced"
    );
    Resolution::unplaced()
  }
}

#[cfg(test)]
mod tests {
  use std::time::Instant;

  use serde_json::json;

  use super::*;
  use crate::fakes::ScriptedGeocoder;

  fn candidate(value: serde_json::Value) -> Candidate { Candidate::from_value(value) }

  fn point(lat: f64, lon: f64) -> GeoPoint { GeoPoint::new(lat, lon).unwrap() }

  #[tokio::test]
  async fn geocode_hit_wins_over_supplied_gps() {
    let geo = ScriptedGeocoder::new().hit("Laugavegur 28, Reykjavik", point(64.1451, -21.9257));
    let resolver = Resolver::new(&geo, Duration::ZERO, 50.0);

    let r = resolver
      .resolve(&candidate(json!({
        "address": "Laugavegur 28, Reykjavik",
        "gps": "64.0,-21.0",
      })))
      .await;

    assert_eq!(r, Resolution::geocoded(point(64.1451, -21.9257)));
    assert!(r.is_geocoded());
    assert_eq!(geo.calls(), vec!["Laugavegur 28, Reykjavik"]);
  }

  #[tokio::test]
  async fn distant_geocode_still_wins() {
    // Akureyri is ~250 km from the supplied Reykjavik point.
    let akureyri = point(65.6885, -18.1262);
    let reykjavik = point(64.1466, -21.9426);
    assert!(akureyri.distance_km(&reykjavik) > 50.0);

    let geo = ScriptedGeocoder::new().hit("Hafnarstræti 20, Akureyri", akureyri);
    let resolver = Resolver::new(&geo, Duration::ZERO, 50.0);

    let r = resolver
      .resolve(&candidate(json!({
        "address": "Hafnarstræti 20, Akureyri",
        "gps": "64.1466,-21.9426",
      })))
      .await;

    assert_eq!(r, Resolution::geocoded(akureyri));
  }

  #[tokio::test]
  async fn geocode_miss_falls_back_to_supplied_gps() {
    let geo = ScriptedGeocoder::new();
    let resolver = Resolver::new(&geo, Duration::ZERO, 50.0);

    let r = resolver
      .resolve(&candidate(json!({ "address": "Nowhere 1", "gps": "64.5,-22.5" })))
      .await;

    assert_eq!(r, Resolution::supplied(point(64.5, -22.5)));
    assert!(!r.is_geocoded());
    assert_eq!(geo.calls().len(), 1);
  }

  #[tokio::test]
  async fn no_address_skips_geocoder() {
    let geo = ScriptedGeocoder::new();
    let resolver = Resolver::new(&geo, Duration::ZERO, 50.0);

    let r = resolver.resolve(&candidate(json!({ "gps": "64.5,-22.5" }))).await;

    assert_eq!(r.source, LocationSource::Supplied);
    assert!(geo.calls().is_empty());
  }

  #[tokio::test]
  async fn legacy_lat_lon_after_bad_gps() {
    let geo = ScriptedGeocoder::new();
    let resolver = Resolver::new(&geo, Duration::ZERO, 50.0);

    let r = resolver
      .resolve(&candidate(json!({ "gps": "somewhere", "lat": 65.0, "lon": -18.0 })))
      .await;

    assert_eq!(r, Resolution::legacy(point(65.0, -18.0)));
  }

  #[tokio::test]
  async fn nothing_usable_is_unplaced() {
    let geo = ScriptedGeocoder::new();
    let resolver = Resolver::new(&geo, Duration::ZERO, 50.0);

    let r = resolver.resolve(&candidate(json!({ "name": "Mystery" }))).await;

    assert_eq!(r, Resolution::unplaced());
    assert_eq!(r.gps, None);
  }

  #[tokio::test]
  async fn delay_follows_every_attempt() {
    let geo = ScriptedGeocoder::new().hit("A 1", point(1.0, 1.0));
    let resolver = Resolver::new(&geo, Duration::from_millis(60), 50.0);

    let start = Instant::now();
    resolver.resolve(&candidate(json!({ "address": "A 1" }))).await;
    resolver.resolve(&candidate(json!({ "address": "B 2" }))).await;
    assert!(start.elapsed() >= Duration::from_millis(120));

    let start = Instant::now();
    resolver.resolve(&candidate(json!({ "gps": "1,1" }))).await;
    assert!(start.elapsed() < Duration::from_millis(60));
  }
}
