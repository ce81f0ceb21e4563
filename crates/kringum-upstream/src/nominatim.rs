//! Address lookup against a Nominatim `/search` endpoint.

use std::time::Duration;

use kringum_core::{
  gps::{GeoPoint, coordinate_from_json},
  upstream::Geocoder,
};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::{RateLimiter, Result, UpstreamError};

/// Connection settings for [`NominatimGeocoder`].
#[derive(Debug, Clone)]
pub struct NominatimConfig {
  pub base_url:     String,
  /// Nominatim's usage policy requires an identifying user agent.
  pub user_agent:   String,
  pub timeout:      Duration,
  /// Minimum spacing between requests from this client.
  pub min_interval: Duration,
}

impl Default for NominatimConfig {
  fn default() -> Self {
    Self {
      base_url:     "https://nominatim.openstreetmap.org".into(),
      user_agent:   "KringumCruiseData/1.0".into(),
      timeout:      Duration::from_secs(10),
      min_interval: Duration::from_millis(1100),
    }
  }
}

/// One search hit. Nominatim sends coordinates as decimal strings.
#[derive(Debug, Deserialize)]
struct Place {
  #[serde(default)]
  lat: Value,
  #[serde(default)]
  lon: Value,
}

/// The first usable point in a `/search?format=json` response body.
fn first_point(body: &[Place]) -> Option<GeoPoint> {
  let place = body.first()?;
  let lat = coordinate_from_json(&place.lat)?;
  let lon = coordinate_from_json(&place.lon)?;
  GeoPoint::new(lat, lon).ok()
}

pub struct NominatimGeocoder {
  client:   Client,
  base_url: String,
  limiter:  RateLimiter,
}

impl NominatimGeocoder {
  pub fn new(config: NominatimConfig) -> Result<Self> {
    let client = Client::builder()
      .user_agent(config.user_agent)
      .timeout(config.timeout)
      .build()?;
    Ok(Self {
      client,
      base_url: config.base_url.trim_end_matches('/').to_owned(),
      limiter: RateLimiter::new(config.min_interval),
    })
  }

  /// `GET /search?q=<address>&format=json&limit=1`
  pub async fn lookup(&self, address: &str) -> Result<Option<GeoPoint>> {
    self.limiter.wait().await;

    let resp = self
      .client
      .get(format!("{}/search", self.base_url))
      .query(&[("q", address), ("format", "json"), ("limit", "1")])
      .send()
      .await?;

    let status = resp.status();
    if !status.is_success() {
      return Err(UpstreamError::Status {
        status:  status.as_u16(),
        message: resp.text().await.unwrap_or_default(),
      });
    }

    let places: Vec<Place> = resp.json().await?;
    Ok(first_point(&places))
  }
}

impl Geocoder for NominatimGeocoder {
  async fn geocode(&self, address: &str) -> Option<GeoPoint> {
    match self.lookup(address).await {
      Ok(Some(point)) => Some(point),
      Ok(None) => {
        tracing::warn!(address, "geocoding found no match");
        None
      }
      Err(e) => {
        tracing::warn!(address, error = %e, "geocoding failed");
        None
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn places(body: &str) -> Vec<Place> { serde_json::from_str(body).unwrap() }

  #[test]
  fn string_coordinates() {
    let body = places(
      r#"[{"place_id": 1, "lat": "64.1504", "lon": "-21.9327", "display_name": "Harpa"}]"#,
    );
    assert_eq!(first_point(&body), Some(GeoPoint::new(64.1504, -21.9327).unwrap()));
  }

  #[test]
  fn numeric_coordinates() {
    let body = places(r#"[{"lat": 65.68, "lon": -18.1}]"#);
    assert_eq!(first_point(&body), Some(GeoPoint::new(65.68, -18.1).unwrap()));
  }

  #[test]
  fn empty_result_is_no_match() {
    assert_eq!(first_point(&places("[]")), None);
  }

  #[test]
  fn missing_or_garbled_coordinates_are_no_match() {
    assert_eq!(first_point(&places(r#"[{"lat": "64.1"}]"#)), None);
    assert_eq!(first_point(&places(r#"[{"lat": "north", "lon": "west"}]"#)), None);
  }

  #[test]
  fn default_config() {
    let config = NominatimConfig::default();
    assert_eq!(config.user_agent, "KringumCruiseData/1.0");
    assert_eq!(config.timeout, Duration::from_secs(10));
    assert_eq!(config.min_interval, Duration::from_millis(1100));
  }

  #[test]
  fn trailing_slash_is_trimmed() {
    let geocoder = NominatimGeocoder::new(NominatimConfig {
      base_url: "http://localhost:8080/".into(),
      ..NominatimConfig::default()
    })
    .unwrap();
    assert_eq!(geocoder.base_url, "http://localhost:8080");
  }
}
