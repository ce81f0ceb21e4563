//! Well-known setting keys.
//!
//! Settings are a free-form string map; the keys below are the ones the
//! application itself reads.

use std::collections::BTreeMap;

use strum::{AsRefStr, Display, EnumIter};

/// The full key → value settings map, ordered by key.
pub type Settings = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter)]
pub enum SettingKey {
  /// Prompt template for the port-fill pipeline. Contains a `{port_name}`
  /// placeholder.
  #[strum(serialize = "PROMPT_FILLPORT")]
  PromptFillPort,
}

impl SettingKey {
  /// Value written at first startup when the key is absent.
  pub fn default_value(self) -> &'static str {
    match self {
      SettingKey::PromptFillPort => "",
    }
  }
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator as _;

  use super::*;

  #[test]
  fn key_uses_screaming_snake_name() {
    assert_eq!(SettingKey::PromptFillPort.as_ref(), "PROMPT_FILLPORT");
    assert_eq!(SettingKey::PromptFillPort.to_string(), "PROMPT_FILLPORT");
  }

  #[test]
  fn every_key_defaults_to_empty() {
    assert!(SettingKey::iter().all(|k| k.default_value().is_empty()));
  }
}
