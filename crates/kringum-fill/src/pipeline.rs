//! [`PortFiller`]: orchestration of one port-fill run.

use std::{sync::Arc, time::Duration};

use kringum_core::{
  item::Item,
  port::Port,
  setting::SettingKey,
  store::CatalogStore,
  upstream::{Generator, Geocoder},
};

use crate::{
  FillError,
  candidate::Candidate,
  extract::extract_array,
  resolve::Resolver,
};

/// Placeholder in the `PROMPT_FILLPORT` template replaced by the port name.
pub const PORT_NAME_PLACEHOLDER: &str = "{port_name}";

/// System instruction sent with every fill prompt.
pub const SYSTEM_INSTRUCTION: &str = "Return ONLY the JSON array. No markdown fences, no \
explanation. Keep each story under 150 words. Each item MUST include a \"gps\" field as a \
\"lat,lon\" string with real-world decimal GPS coordinates (e.g. \"65.7331,-23.1994\" for \
Dynjandi). Each item MUST also include an \"address\" field with the street address including \
house number if applicable (e.g. \"Laugavegur 28, 101 Reykjavik, Iceland\"). Be as accurate as \
possible. Only generate items about real physical places that exist on a map.";

/// Tunables for [`PortFiller`].
#[derive(Debug, Clone)]
pub struct FillOptions {
  /// Pause after every geocoding attempt.
  pub geocode_delay:        Duration,
  /// Log when a geocoded point is further than this from the generated one.
  pub disagreement_warn_km: f64,
}

impl Default for FillOptions {
  fn default() -> Self {
    Self {
      geocode_delay:        Duration::from_millis(1100),
      disagreement_warn_km: 50.0,
    }
  }
}

/// Substitute the port's display name into `template`.
pub fn build_prompt(template: &str, port: &Port) -> String {
  template.replace(PORT_NAME_PLACEHOLDER, &port.display_name())
}

/// Generates, resolves, and stores a batch of items for a port.
///
/// Runs strictly sequentially: one generation call, then one geocoding call
/// per candidate with an address. Nothing is written unless the reply parsed,
/// and the batch is written in one transaction.
pub struct PortFiller<S, G, C> {
  store:     Arc<S>,
  generator: Arc<G>,
  geocoder:  Arc<C>,
  options:   FillOptions,
}

impl<S, G, C> PortFiller<S, G, C>
where
  S: CatalogStore,
  G: Generator,
  C: Geocoder,
{
  pub fn new(
    store: Arc<S>,
    generator: Arc<G>,
    geocoder: Arc<C>,
    options: FillOptions,
  ) -> Self {
    Self { store, generator, geocoder, options }
  }

  /// Run the pipeline for `port_id` and return the inserted items in the
  /// order the model listed them.
  pub async fn fill(&self, port_id: i64) -> Result<Vec<Item>, FillError> {
    let port = self
      .store
      .get_port(port_id)
      .await
      .map_err(|e| FillError::Store(Box::new(e)))?
      .ok_or(FillError::PortNotFound(port_id))?;

    let template = self
      .store
      .get_setting(SettingKey::PromptFillPort.as_ref())
      .await
      .map_err(|e| FillError::Store(Box::new(e)))?
      .unwrap_or_default();
    if template.trim().is_empty() {
      return Err(FillError::PromptNotConfigured);
    }

    let prompt = build_prompt(&template, &port);
    tracing::info!(port_id, port = %port.display_name(), "requesting generated items");

    let raw = self
      .generator
      .complete(SYSTEM_INSTRUCTION, &prompt)
      .await
      .map_err(|e| FillError::Upstream(Box::new(e)))?;
    tracing::info!(port_id, raw = %raw, "generated response");

    let elements = extract_array(&raw).map_err(|source| FillError::Parse {
      source,
      raw: raw.clone(),
    })?;

    let resolver = Resolver::new(
      self.geocoder.as_ref(),
      self.options.geocode_delay,
      self.options.disagreement_warn_km,
    );
    let mut rows = Vec::with_capacity(elements.len());
    for element in elements {
      let candidate = Candidate::from_value(element);
      let resolution = resolver.resolve(&candidate).await;
      rows.push(candidate.into_new_item(port_id, resolution));
    }

    let inserted = self
      .store
      .insert_items(rows)
      .await
      .map_err(|e| FillError::Store(Box::new(e)))?;

    tracing::info!(
      port_id,
      inserted = inserted.len(),
      placed = inserted.iter().filter(|i| i.is_placed()).count(),
      geocoded = inserted.iter().filter(|i| i.geocoded).count(),
      "port fill complete"
    );
    Ok(inserted)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn port(country: &str) -> Port {
    Port {
      id:          1,
      name:        "Reykjavik".into(),
      country:     country.into(),
      gps:         None,
      description: String::new(),
      tag:         String::new(),
    }
  }

  #[test]
  fn prompt_substitutes_every_placeholder() {
    let prompt = build_prompt("Sights in {port_name}. Only {port_name}!", &port("Iceland"));
    assert_eq!(prompt, "Sights in Reykjavik, Iceland. Only Reykjavik, Iceland!");
  }

  #[test]
  fn prompt_without_country() {
    assert_eq!(build_prompt("Near {port_name}", &port("")), "Near Reykjavik");
  }

  #[test]
  fn prompt_without_placeholder_is_unchanged() {
    assert_eq!(build_prompt("Anything", &port("Iceland")), "Anything");
  }
}
