//! End-to-end pipeline tests against an in-memory `SqliteStore`.

use std::{collections::BTreeMap, sync::Arc, time::Duration};

use kringum_core::{
  gps::GeoPoint,
  setting::SettingKey,
  store::{CatalogStore, ItemQuery},
};
use kringum_store_sqlite::SqliteStore;

use crate::{
  FillError, FillOptions, PortFiller,
  fakes::{ScriptedGenerator, ScriptedGeocoder},
  pipeline::SYSTEM_INSTRUCTION,
};

const REYKJAVIK: i64 = 1;

type Filler = PortFiller<SqliteStore, ScriptedGenerator, ScriptedGeocoder>;

async fn store_with_prompt(template: &str) -> Arc<SqliteStore> {
  let store = SqliteStore::open_in_memory().await.expect("in-memory store");
  let mut settings = BTreeMap::new();
  settings.insert(SettingKey::PromptFillPort.to_string(), template.to_owned());
  store.upsert_settings(settings).await.unwrap();
  Arc::new(store)
}

fn filler(
  store: &Arc<SqliteStore>,
  generator: ScriptedGenerator,
  geocoder: ScriptedGeocoder,
) -> (Filler, Arc<ScriptedGenerator>, Arc<ScriptedGeocoder>) {
  let generator = Arc::new(generator);
  let geocoder = Arc::new(geocoder);
  let options = FillOptions { geocode_delay: Duration::ZERO, ..FillOptions::default() };
  let filler = PortFiller::new(store.clone(), generator.clone(), geocoder.clone(), options);
  (filler, generator, geocoder)
}

fn point(lat: f64, lon: f64) -> GeoPoint { GeoPoint::new(lat, lon).unwrap() }

async fn total_items(store: &SqliteStore) -> usize {
  store.list_items(&ItemQuery::default()).await.unwrap().len()
}

// ─── Successful fills ────────────────────────────────────────────────────────

#[tokio::test]
async fn fill_inserts_items_in_reply_order() {
  let store = store_with_prompt("Sights in {port_name}").await;
  let reply = r#"[
    {"name": "Harpa", "story": "Concert hall.", "tag": "Culture",
     "address": "Austurbakki 2, 101 Reykjavik", "gps": "64.0,-21.0"},
    {"name": "Perlan", "tag": "Views", "gps": "64.1292,-21.9187"},
    {"name": "Old Harbour", "lat": 64.1510, "lon": "-21.9420"},
    {"name": "Somewhere", "address": "Unknown Street 9"}
  ]"#;
  let geocoder =
    ScriptedGeocoder::new().hit("Austurbakki 2, 101 Reykjavik", point(64.1504, -21.9327));
  let (filler, _, geocoder) = filler(&store, ScriptedGenerator::replying(reply), geocoder);

  let inserted = filler.fill(REYKJAVIK).await.unwrap();

  let names: Vec<_> = inserted.iter().map(|i| i.name.as_str()).collect();
  assert_eq!(names, ["Harpa", "Perlan", "Old Harbour", "Somewhere"]);
  assert!(inserted.windows(2).all(|w| w[0].id < w[1].id));
  assert!(inserted.iter().all(|i| i.port_id == Some(REYKJAVIK)));

  assert_eq!(inserted[0].gps, Some(point(64.1504, -21.9327)));
  assert!(inserted[0].geocoded);
  assert_eq!(inserted[0].address, "Austurbakki 2, 101 Reykjavik");
  assert_eq!(inserted[0].story, "Concert hall.");

  assert_eq!(inserted[1].gps, Some(point(64.1292, -21.9187)));
  assert!(!inserted[1].geocoded);

  assert_eq!(inserted[2].gps, Some(point(64.1510, -21.9420)));
  assert!(!inserted[2].geocoded);

  assert_eq!(inserted[3].gps, None);
  assert!(!inserted[3].geocoded);

  assert_eq!(
    geocoder.calls(),
    vec!["Austurbakki 2, 101 Reykjavik", "Unknown Street 9"]
  );
  assert_eq!(store.count_port_items(REYKJAVIK).await.unwrap(), 4);
}

#[tokio::test]
async fn unplaced_items_are_listed_for_the_port() {
  let store = store_with_prompt("Sights in {port_name}").await;
  let reply = r#"[{"name": "Placed", "gps": "64,-21"}, {"name": "Lost", "tag": "Nature"}]"#;
  let (filler, ..) = filler(&store, ScriptedGenerator::replying(reply), ScriptedGeocoder::new());

  let inserted = filler.fill(REYKJAVIK).await.unwrap();

  let unplaced = store.list_unplaced(REYKJAVIK).await.unwrap();
  assert_eq!(unplaced.len(), 1);
  assert_eq!(unplaced[0].id, inserted[1].id);
  assert_eq!(unplaced[0].name, "Lost");
  assert_eq!(unplaced[0].tag, "Nature");
}

#[tokio::test]
async fn prompt_and_system_instruction_are_sent() {
  let store = store_with_prompt("List sights near {port_name}.").await;
  let (filler, generator, _) =
    filler(&store, ScriptedGenerator::replying("[]"), ScriptedGeocoder::new());

  let inserted = filler.fill(REYKJAVIK).await.unwrap();

  assert!(inserted.is_empty());
  let prompts = generator.prompts();
  assert_eq!(prompts.len(), 1);
  assert_eq!(prompts[0].0, SYSTEM_INSTRUCTION);
  assert_eq!(prompts[0].1, "List sights near Reykjavik, Iceland.");
}

#[tokio::test]
async fn fenced_reply_with_prose_is_accepted() {
  let store = store_with_prompt("Sights in {port_name}").await;
  let reply = "Here you go:\n```json\n[{\"name\": \"Harpa\", \"gps\": \"64.15,-21.93\"}]\n```";
  let (filler, ..) = filler(&store, ScriptedGenerator::replying(reply), ScriptedGeocoder::new());

  let inserted = filler.fill(REYKJAVIK).await.unwrap();

  assert_eq!(inserted.len(), 1);
  assert_eq!(inserted[0].name, "Harpa");
}

#[tokio::test]
async fn non_object_elements_become_empty_unplaced_items() {
  let store = store_with_prompt("Sights in {port_name}").await;
  let (filler, ..) = filler(
    &store,
    ScriptedGenerator::replying(r#"["Harpa", {"name": "Perlan"}]"#),
    ScriptedGeocoder::new(),
  );

  let inserted = filler.fill(REYKJAVIK).await.unwrap();

  assert_eq!(inserted.len(), 2);
  assert_eq!(inserted[0].name, "");
  assert_eq!(inserted[0].gps, None);
  assert_eq!(inserted[1].name, "Perlan");
}

// ─── Failures leave the store untouched ──────────────────────────────────────

#[tokio::test]
async fn unknown_port_is_rejected_before_generation() {
  let store = store_with_prompt("Sights in {port_name}").await;
  let (filler, generator, _) =
    filler(&store, ScriptedGenerator::replying("[]"), ScriptedGeocoder::new());

  let err = filler.fill(9_999).await.unwrap_err();

  assert!(matches!(err, FillError::PortNotFound(9_999)));
  assert!(generator.prompts().is_empty());
}

#[tokio::test]
async fn blank_prompt_is_a_configuration_error() {
  for template in ["", "   \n"] {
    let store = store_with_prompt(template).await;
    let before = total_items(&store).await;
    let (filler, generator, _) =
      filler(&store, ScriptedGenerator::replying("[]"), ScriptedGeocoder::new());

    let err = filler.fill(REYKJAVIK).await.unwrap_err();

    assert!(matches!(err, FillError::PromptNotConfigured), "{template:?}");
    assert_eq!(err.to_string(), "PROMPT_FILLPORT is empty. Configure it in Settings.");
    assert!(generator.prompts().is_empty());
    assert_eq!(total_items(&store).await, before);
  }
}

#[tokio::test]
async fn upstream_failure_inserts_nothing() {
  let store = store_with_prompt("Sights in {port_name}").await;
  let before = total_items(&store).await;
  let (filler, ..) = filler(
    &store,
    ScriptedGenerator::failing("service unavailable"),
    ScriptedGeocoder::new(),
  );

  let err = filler.fill(REYKJAVIK).await.unwrap_err();

  assert!(matches!(err, FillError::Upstream(_)));
  assert!(err.to_string().contains("service unavailable"));
  assert_eq!(total_items(&store).await, before);
}

#[tokio::test]
async fn unparseable_reply_carries_raw_text() {
  let store = store_with_prompt("Sights in {port_name}").await;
  let before = total_items(&store).await;
  let reply = "Sorry, I cannot help with that.";
  let (filler, _, geocoder) =
    filler(&store, ScriptedGenerator::replying(reply), ScriptedGeocoder::new());

  let err = filler.fill(REYKJAVIK).await.unwrap_err();

  match err {
    FillError::Parse { raw, .. } => assert_eq!(raw, reply),
    other => panic!("expected parse error, got {other:?}"),
  }
  assert!(geocoder.calls().is_empty());
  assert_eq!(total_items(&store).await, before);
}
