//! Ports: cruise-ship stops that own items.

use serde::{Deserialize, Serialize};

use crate::gps::{self, GeoPoint};

/// A cruise-ship stop. Ports are seeded once and never edited through the
/// API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
  pub id:          i64,
  pub name:        String,
  pub country:     String,
  #[serde(with = "gps::text", default)]
  pub gps:         Option<GeoPoint>,
  pub description: String,
  pub tag:         String,
}

impl Port {
  /// `"Name, Country"`, or just the name when the country is unknown.
  pub fn display_name(&self) -> String {
    let country = self.country.trim();
    if country.is_empty() {
      self.name.clone()
    } else {
      format!("{}, {country}", self.name)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn port(name: &str, country: &str) -> Port {
    Port {
      id:          1,
      name:        name.into(),
      country:     country.into(),
      gps:         None,
      description: String::new(),
      tag:         String::new(),
    }
  }

  #[test]
  fn display_name_appends_country() {
    assert_eq!(port("Reykjavik", "Iceland").display_name(), "Reykjavik, Iceland");
  }

  #[test]
  fn display_name_without_country() {
    assert_eq!(port("Reykjavik", "").display_name(), "Reykjavik");
    assert_eq!(port("Reykjavik", "  ").display_name(), "Reykjavik");
  }
}
