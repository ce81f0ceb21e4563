//! Geographic points and their `"lat,lon"` text encoding.
//!
//! The text form is what the database and the JSON API carry. Everything
//! inside the process works on [`GeoPoint`] so that a malformed pair can never
//! be stored or compared.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Mean Earth radius used by [`GeoPoint::distance_km`].
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
  pub lat: f64,
  pub lon: f64,
}

impl GeoPoint {
  /// Build a point, rejecting NaN and infinities.
  pub fn new(lat: f64, lon: f64) -> Result<Self> {
    for v in [lat, lon] {
      if !v.is_finite() {
        return Err(Error::NonFiniteCoordinate(v));
      }
    }
    Ok(Self { lat, lon })
  }

  /// Parse the `"lat,lon"` encoding. Exactly two comma-separated decimal
  /// values are accepted; whitespace around each value is ignored.
  pub fn parse(input: &str) -> Result<Self> {
    let invalid = |reason: &str| Error::InvalidGps {
      input:  input.to_owned(),
      reason: reason.to_owned(),
    };

    let parts: Vec<&str> = input.split(',').collect();
    let [lat, lon] = parts.as_slice() else {
      return Err(invalid("expected exactly two comma-separated values"));
    };

    let lat: f64 = lat
      .trim()
      .parse()
      .map_err(|_| invalid("latitude is not a number"))?;
    let lon: f64 = lon
      .trim()
      .parse()
      .map_err(|_| invalid("longitude is not a number"))?;

    Self::new(lat, lon).map_err(|e| invalid(&e.to_string()))
  }

  /// Great-circle distance to `other` in kilometres (haversine).
  pub fn distance_km(&self, other: &GeoPoint) -> f64 {
    let (lat1, lat2) = (self.lat.to_radians(), other.lat.to_radians());
    let d_lat = lat2 - lat1;
    let d_lon = (other.lon - self.lon).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
      + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
  }
}

impl fmt::Display for GeoPoint {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{},{}", self.lat, self.lon)
  }
}

impl FromStr for GeoPoint {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

/// Read a coordinate from loosely-typed JSON: a number, or a string holding
/// one. Anything else (including non-finite values) is `None`.
pub fn coordinate_from_json(value: &serde_json::Value) -> Option<f64> {
  let v = match value {
    serde_json::Value::Number(n) => n.as_f64()?,
    serde_json::Value::String(s) => s.trim().parse().ok()?,
    _ => return None,
  };
  v.is_finite().then_some(v)
}

/// Serde adapter storing an `Option<GeoPoint>` as its `"lat,lon"` string,
/// with `None` written as the empty string.
///
/// ```rust,ignore
/// #[serde(with = "kringum_core::gps::text", default)]
/// pub gps: Option<GeoPoint>,
/// ```
pub mod text {
  use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

  use super::GeoPoint;

  pub fn serialize<S>(value: &Option<GeoPoint>, ser: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    match value {
      Some(point) => ser.collect_str(point),
      None => ser.serialize_str(""),
    }
  }

  pub fn deserialize<'de, D>(de: D) -> Result<Option<GeoPoint>, D::Error>
  where
    D: Deserializer<'de>,
  {
    let raw = Option::<String>::deserialize(de)?;
    match raw.as_deref().map(str::trim) {
      None | Some("") => Ok(None),
      Some(s) => GeoPoint::parse(s).map(Some).map_err(D::Error::custom),
    }
  }
}
