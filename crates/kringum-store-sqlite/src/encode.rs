//! Encoding and decoding helpers between domain types and SQLite columns.
//!
//! Locations are stored as `"lat,lon"` text with the empty string (or NULL in
//! rows written by older versions) meaning unplaced. A stored value that does
//! not parse also reads back as unplaced, so it can be found and re-set.
//! Optional text columns read back as empty strings.

use kringum_core::{
  gps::GeoPoint,
  item::{Item, UnplacedItem},
  port::Port,
};

// ─── GeoPoint ────────────────────────────────────────────────────────────────

pub fn encode_gps(gps: Option<GeoPoint>) -> String {
  gps.map(|p| p.to_string()).unwrap_or_default()
}

/// Decode the `gps` column of row `id` in `table`. Blank is unplaced; an
/// unreadable value is logged and treated as unplaced.
pub fn decode_gps(table: &'static str, id: i64, s: Option<&str>) -> Option<GeoPoint> {
  match s.map(str::trim) {
    None | Some("") => None,
    Some(text) => match GeoPoint::parse(text) {
      Ok(point) => Some(point),
      Err(e) => {
        tracing::warn!(
          table,
          id,
          gps = text,
          error = %e,
          "unreadable stored gps, treating as unplaced"
        );
        None
      }
    },
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawItem::from_row`].
pub const ITEM_COLUMNS: &str =
  "id, name, story, tag, reference, source, gps, link, portid, address, geocoded";

/// Raw values read directly from an `items` row.
pub struct RawItem {
  pub id:        i64,
  pub name:      String,
  pub story:     Option<String>,
  pub tag:       Option<String>,
  pub reference: Option<String>,
  pub source:    Option<String>,
  pub gps:       Option<String>,
  pub link:      Option<String>,
  pub port_id:   Option<i64>,
  pub address:   Option<String>,
  pub geocoded:  Option<i64>,
}

impl RawItem {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:        row.get(0)?,
      name:      row.get(1)?,
      story:     row.get(2)?,
      tag:       row.get(3)?,
      reference: row.get(4)?,
      source:    row.get(5)?,
      gps:       row.get(6)?,
      link:      row.get(7)?,
      port_id:   row.get(8)?,
      address:   row.get(9)?,
      geocoded:  row.get(10)?,
    })
  }

  pub fn into_item(self) -> Item {
    let gps = decode_gps("items", self.id, self.gps.as_deref());

    Item {
      id:        self.id,
      name:      self.name,
      story:     self.story.unwrap_or_default(),
      tag:       self.tag.unwrap_or_default(),
      reference: self.reference.unwrap_or_default(),
      source:    self.source.unwrap_or_default(),
      gps,
      link:      self.link.unwrap_or_default(),
      port_id:   self.port_id,
      address:   self.address.unwrap_or_default(),
      geocoded:  self.geocoded.unwrap_or(0) != 0,
    }
  }
}

/// Column list matching [`RawPort::from_row`].
pub const PORT_COLUMNS: &str = "id, name, country, gps, description, tag";

/// Raw values read directly from a `ports` row.
pub struct RawPort {
  pub id:          i64,
  pub name:        String,
  pub country:     Option<String>,
  pub gps:         Option<String>,
  pub description: Option<String>,
  pub tag:         Option<String>,
}

impl RawPort {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      name:        row.get(1)?,
      country:     row.get(2)?,
      gps:         row.get(3)?,
      description: row.get(4)?,
      tag:         row.get(5)?,
    })
  }

  pub fn into_port(self) -> Port {
    let gps = decode_gps("ports", self.id, self.gps.as_deref());

    Port {
      id:          self.id,
      name:        self.name,
      country:     self.country.unwrap_or_default(),
      gps,
      description: self.description.unwrap_or_default(),
      tag:         self.tag.unwrap_or_default(),
    }
  }
}

/// Column list matching [`RawUnplaced::from_row`].
pub const UNPLACED_COLUMNS: &str = "id, name, tag, gps";

/// Candidate row for a port's unplaced list; kept only if its `gps` does not
/// decode.
pub struct RawUnplaced {
  pub id:   i64,
  pub name: String,
  pub tag:  Option<String>,
  pub gps:  Option<String>,
}

impl RawUnplaced {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:   row.get(0)?,
      name: row.get(1)?,
      tag:  row.get(2)?,
      gps:  row.get(3)?,
    })
  }

  pub fn into_unplaced(self) -> Option<UnplacedItem> {
    if decode_gps("items", self.id, self.gps.as_deref()).is_some() {
      return None;
    }
    Some(UnplacedItem {
      id:   self.id,
      name: self.name,
      tag:  self.tag.unwrap_or_default(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_and_null_gps_decode_to_none() {
    assert_eq!(decode_gps("items", 1, None), None);
    assert_eq!(decode_gps("items", 1, Some("")), None);
    assert_eq!(decode_gps("items", 1, Some("   ")), None);
  }

  #[test]
  fn gps_encoding_round_trips() {
    let p = GeoPoint::new(64.1272, -20.5269).unwrap();
    let text = encode_gps(Some(p));
    assert_eq!(text, "64.1272,-20.5269");
    assert_eq!(decode_gps("items", 1, Some(&text)), Some(p));
    assert_eq!(encode_gps(None), "");
  }

  #[test]
  fn unreadable_gps_decodes_to_none() {
    for text in ["somewhere", "nan,nan", "inf,0", "1,2,3"] {
      assert_eq!(decode_gps("items", 1, Some(text)), None, "{text}");
    }
  }

  #[test]
  fn unplaced_keeps_only_rows_without_a_location() {
    let raw = |gps: Option<&str>| RawUnplaced {
      id:   7,
      name: "Harpa".into(),
      tag:  None,
      gps:  gps.map(str::to_owned),
    };
    assert!(raw(Some("64.15,-21.93")).into_unplaced().is_none());
    for gps in [None, Some(""), Some("  "), Some("nan,nan")] {
      let item = raw(gps).into_unplaced().unwrap();
      assert_eq!(item, UnplacedItem { id: 7, name: "Harpa".into(), tag: String::new() });
    }
  }
}
