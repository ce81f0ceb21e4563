//! Decoding one generated array element into a typed record.
//!
//! Generated JSON is loosely typed: fields go missing, numbers show up where
//! strings were asked for, and legacy replies carry `lat`/`lon` instead of
//! `gps`. [`Candidate`] absorbs all of that with fixed defaulting rules:
//!
//! - text fields: strings verbatim, other scalars rendered as text, `null`
//!   or missing as `""`, arrays/objects as compact JSON;
//! - `lat`/`lon`: numbers or numeric strings, otherwise absent.

use kringum_core::{
  gps::{GeoPoint, coordinate_from_json},
  item::NewItem,
};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::resolve::Resolution;

/// One generated point of interest, before location resolution.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Candidate {
  #[serde(deserialize_with = "text")]
  pub name:      String,
  #[serde(deserialize_with = "text")]
  pub story:     String,
  #[serde(deserialize_with = "text")]
  pub tag:       String,
  #[serde(deserialize_with = "text")]
  pub reference: String,
  #[serde(deserialize_with = "text")]
  pub source:    String,
  #[serde(deserialize_with = "text")]
  pub link:      String,
  #[serde(deserialize_with = "text")]
  pub address:   String,
  /// `"lat,lon"` as supplied by the model; validated lazily.
  #[serde(deserialize_with = "text")]
  pub gps:       String,
  #[serde(deserialize_with = "coordinate")]
  pub lat:       Option<f64>,
  #[serde(deserialize_with = "coordinate")]
  pub lon:       Option<f64>,
}

impl Candidate {
  /// Decode an array element. Elements that are not JSON objects carry no
  /// fields and decode to [`Candidate::default`].
  pub fn from_value(value: Value) -> Self {
    if value.is_object() {
      serde_json::from_value(value).unwrap_or_default()
    } else {
      Self::default()
    }
  }

  /// The street address to geocode, if one was given.
  pub fn address(&self) -> Option<&str> {
    let address = self.address.trim();
    (!address.is_empty()).then_some(address)
  }

  /// The `gps` field, if it holds exactly two decimal values.
  pub fn supplied_point(&self) -> Option<GeoPoint> {
    let gps = self.gps.trim();
    if gps.is_empty() {
      return None;
    }
    GeoPoint::parse(gps).ok()
  }

  /// The legacy `lat`/`lon` pair, if both are present.
  pub fn legacy_point(&self) -> Option<GeoPoint> {
    GeoPoint::new(self.lat?, self.lon?).ok()
  }

  /// Build the row to insert under `port_id` with the resolved location.
  pub fn into_new_item(self, port_id: i64, resolution: Resolution) -> NewItem {
    let address = self.address.trim().to_owned();
    NewItem {
      name: self.name,
      story: self.story,
      tag: self.tag,
      reference: self.reference,
      source: self.source,
      gps: resolution.gps,
      link: self.link,
      port_id: Some(port_id),
      address,
      geocoded: resolution.is_geocoded(),
    }
  }
}

fn text<'de, D>(de: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(match Value::deserialize(de)? {
    Value::Null => String::new(),
    Value::String(s) => s,
    Value::Bool(b) => b.to_string(),
    Value::Number(n) => n.to_string(),
    other => other.to_string(),
  })
}

fn coordinate<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(coordinate_from_json(&Value::deserialize(de)?))
}
