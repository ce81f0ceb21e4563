//! Items: points of interest with a narrative, a tag, and a location.

use serde::{Deserialize, Serialize};

use crate::gps::{self, GeoPoint};

/// A persisted point of interest.
///
/// `gps` is `None` for an *unplaced* item; on the wire that is the empty
/// string, otherwise the `"lat,lon"` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
  pub id:        i64,
  pub name:      String,
  pub story:     String,
  pub tag:       String,
  pub reference: String,
  pub source:    String,
  #[serde(with = "gps::text", default)]
  pub gps:       Option<GeoPoint>,
  pub link:      String,
  /// Owning port, if any.
  #[serde(rename = "portid")]
  pub port_id:   Option<i64>,
  pub address:   String,
  /// `true` when `gps` came from geocoding `address` rather than being
  /// supplied directly.
  pub geocoded:  bool,
}

impl Item {
  pub fn is_placed(&self) -> bool { self.gps.is_some() }
}

/// Input to [`CatalogStore::insert_items`](crate::store::CatalogStore::insert_items).
/// Identity is assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
  pub name:      String,
  pub story:     String,
  pub tag:       String,
  pub reference: String,
  pub source:    String,
  #[serde(with = "gps::text", default)]
  pub gps:       Option<GeoPoint>,
  pub link:      String,
  #[serde(rename = "portid")]
  pub port_id:   Option<i64>,
  pub address:   String,
  pub geocoded:  bool,
}

impl NewItem {
  /// Attach the store-assigned identity.
  pub fn with_id(self, id: i64) -> Item {
    Item {
      id,
      name:      self.name,
      story:     self.story,
      tag:       self.tag,
      reference: self.reference,
      source:    self.source,
      gps:       self.gps,
      link:      self.link,
      port_id:   self.port_id,
      address:   self.address,
      geocoded:  self.geocoded,
    }
  }
}

/// The slim projection returned for a port's unplaced items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnplacedItem {
  pub id:   i64,
  pub name: String,
  pub tag:  String,
}
