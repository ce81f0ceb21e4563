//! Scripted upstream services for tests.

use std::{collections::HashMap, sync::Mutex};

use kringum_core::{
  gps::GeoPoint,
  upstream::{Generator, Geocoder},
};

/// Returns a fixed point for known addresses and `None` for the rest,
/// recording every lookup.
#[derive(Default)]
pub struct ScriptedGeocoder {
  hits:  HashMap<String, GeoPoint>,
  calls: Mutex<Vec<String>>,
}

impl ScriptedGeocoder {
  pub fn new() -> Self { Self::default() }

  pub fn hit(mut self, address: &str, point: GeoPoint) -> Self {
    self.hits.insert(address.to_owned(), point);
    self
  }

  pub fn calls(&self) -> Vec<String> { self.calls.lock().unwrap().clone() }
}

impl Geocoder for ScriptedGeocoder {
  async fn geocode(&self, address: &str) -> Option<GeoPoint> {
    self.calls.lock().unwrap().push(address.to_owned());
    self.hits.get(address).copied()
  }
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ScriptedFailure(pub String);

/// Answers every prompt with the same reply, recording the prompts.
pub struct ScriptedGenerator {
  reply:   Result<String, String>,
  prompts: Mutex<Vec<(String, String)>>,
}

impl ScriptedGenerator {
  pub fn replying(text: &str) -> Self {
    Self { reply: Ok(text.to_owned()), prompts: Mutex::default() }
  }

  pub fn failing(message: &str) -> Self {
    Self { reply: Err(message.to_owned()), prompts: Mutex::default() }
  }

  /// `(system, prompt)` pairs received so far.
  pub fn prompts(&self) -> Vec<(String, String)> { self.prompts.lock().unwrap().clone() }
}

impl Generator for ScriptedGenerator {
  type Error = ScriptedFailure;

  async fn complete(&self, system: &str, prompt: &str) -> Result<String, ScriptedFailure> {
    self
      .prompts
      .lock()
      .unwrap()
      .push((system.to_owned(), prompt.to_owned()));
    self.reply.clone().map_err(ScriptedFailure)
  }
}
