//! [`SqliteStore`], the SQLite implementation of [`CatalogStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use strum::IntoEnumIterator as _;

use kringum_core::{
  gps::GeoPoint,
  item::{Item, NewItem, UnplacedItem},
  port::Port,
  setting::{SettingKey, Settings},
  store::{CatalogStore, ItemQuery},
};

use crate::{
  Result,
  encode::{
    ITEM_COLUMNS, PORT_COLUMNS, RawItem, RawPort, RawUnplaced, UNPLACED_COLUMNS,
    encode_gps,
  },
  schema::{INDEXES, ITEM_COLUMN_MIGRATIONS, SCHEMA},
  seed::{EXAMPLE_ITEM, PORTS},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Kringum catalog backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted. Each trait
/// method runs as one closure on the connection's thread, so nothing stays
/// borrowed once the method returns, whether it succeeded or not.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

/// What [`SqliteStore::init`] changed on this startup.
#[derive(Debug, Default)]
struct InitReport {
  added_columns: Vec<&'static str>,
  seeded_ports:  usize,
  seeded_items:  usize,
}

impl SqliteStore {
  /// Open (or create) a store at `path`, run schema initialisation, and seed
  /// reference data into empty tables.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init().await?;
    Ok(store)
  }

  async fn init(&self) -> Result<()> {
    let report = self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        let added_columns = migrate_item_columns(conn)?;
        conn.execute_batch(INDEXES)?;
        let (seeded_ports, seeded_items) = seed(conn)?;
        Ok(InitReport { added_columns, seeded_ports, seeded_items })
      })
      .await?;

    if !report.added_columns.is_empty() {
      tracing::info!(columns = ?report.added_columns, "migrated items table");
    }
    if report.seeded_ports > 0 || report.seeded_items > 0 {
      tracing::info!(
        ports = report.seeded_ports,
        items = report.seeded_items,
        "seeded empty database"
      );
    }
    Ok(())
  }
}

/// Add any `items` columns missing from databases created by older versions.
fn migrate_item_columns(
  conn: &rusqlite::Connection,
) -> rusqlite::Result<Vec<&'static str>> {
  let existing: Vec<String> = conn
    .prepare("PRAGMA table_info(items)")?
    .query_map([], |row| row.get(1))?
    .collect::<rusqlite::Result<_>>()?;

  let mut added = Vec::new();
  for (column, ddl) in ITEM_COLUMN_MIGRATIONS {
    if !existing.iter().any(|c| c == column) {
      conn.execute_batch(ddl)?;
      added.push(*column);
    }
  }
  Ok(added)
}

/// Write default settings, the example item, and the reference port list.
/// Each is only written when absent; returns `(ports, items)` inserted.
fn seed(conn: &mut rusqlite::Connection) -> rusqlite::Result<(usize, usize)> {
  let tx = conn.transaction()?;

  for key in SettingKey::iter() {
    tx.execute(
      "INSERT OR IGNORE INTO settings (key, value) VALUES (?1, ?2)",
      rusqlite::params![key.as_ref(), key.default_value()],
    )?;
  }

  let mut seeded_items = 0;
  let item_count: i64 = tx.query_row("SELECT COUNT(*) FROM items", [], |r| r.get(0))?;
  if item_count == 0 {
    tx.execute(
      "INSERT INTO items (name, story, tag, reference, source, gps, link)
       VALUES (?1, ?2, ?3, '', '', ?4, '')",
      rusqlite::params![
        EXAMPLE_ITEM.name,
        EXAMPLE_ITEM.story,
        EXAMPLE_ITEM.tag,
        EXAMPLE_ITEM.gps,
      ],
    )?;
    seeded_items = 1;
  }

  let mut seeded_ports = 0;
  let port_count: i64 = tx.query_row("SELECT COUNT(*) FROM ports", [], |r| r.get(0))?;
  if port_count == 0 {
    let mut stmt = tx.prepare(
      "INSERT INTO ports (name, country, gps, description, tag)
       VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for p in PORTS {
      stmt.execute(rusqlite::params![p.name, p.country, p.gps, p.description, p.tag])?;
    }
    seeded_ports = PORTS.len();
  }

  tx.commit()?;
  Ok((seeded_ports, seeded_items))
}

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for SqliteStore {
  type Error = crate::Error;

  // ── Items ─────────────────────────────────────────────────────────────────

  async fn list_items(&self, query: &ItemQuery) -> Result<Vec<Item>> {
    let port_id = query.port_id;

    let raws: Vec<RawItem> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {ITEM_COLUMNS} FROM items
           WHERE (?1 IS NULL OR portid = ?1)
           ORDER BY id"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![port_id], RawItem::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    // Placement is decided by decoding, not by the raw column text.
    Ok(
      raws
        .into_iter()
        .map(RawItem::into_item)
        .filter(|item| query.placed.is_none_or(|placed| item.is_placed() == placed))
        .collect(),
    )
  }

  async fn get_item(&self, id: i64) -> Result<Option<Item>> {
    let raw: Option<RawItem> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = ?1"),
              rusqlite::params![id],
              RawItem::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(raw.map(RawItem::into_item))
  }

  async fn insert_items(&self, items: Vec<NewItem>) -> Result<Vec<Item>> {
    let rows: Vec<_> = items
      .iter()
      .map(|i| {
        (
          i.name.clone(),
          i.story.clone(),
          i.tag.clone(),
          i.reference.clone(),
          i.source.clone(),
          encode_gps(i.gps),
          i.link.clone(),
          i.port_id,
          i.address.clone(),
          i.geocoded,
        )
      })
      .collect();

    let ids: Vec<i64> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut ids = Vec::with_capacity(rows.len());
        {
          let mut stmt = tx.prepare(
            "INSERT INTO items (
               name, story, tag, reference, source,
               gps, link, portid, address, geocoded
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          )?;
          for (name, story, tag, reference, source, gps, link, port_id, address, geocoded) in
            &rows
          {
            ids.push(stmt.insert(rusqlite::params![
              name, story, tag, reference, source, gps, link, port_id, address, geocoded,
            ])?);
          }
        }
        tx.commit()?;
        Ok(ids)
      })
      .await?;

    Ok(
      items
        .into_iter()
        .zip(ids)
        .map(|(item, id)| item.with_id(id))
        .collect(),
    )
  }

  async fn set_item_gps(&self, id: i64, gps: GeoPoint) -> Result<bool> {
    let gps_str = encode_gps(Some(gps));

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE items SET gps = ?1 WHERE id = ?2",
          rusqlite::params![gps_str, id],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }

  async fn delete_item(&self, id: i64) -> Result<bool> {
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM items WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    Ok(changed > 0)
  }

  // ── Ports ─────────────────────────────────────────────────────────────────

  async fn list_ports(&self) -> Result<Vec<Port>> {
    let raws: Vec<RawPort> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {PORT_COLUMNS} FROM ports ORDER BY id"))?;
        let rows = stmt
          .query_map([], RawPort::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(raws.into_iter().map(RawPort::into_port).collect())
  }

  async fn get_port(&self, id: i64) -> Result<Option<Port>> {
    let raw: Option<RawPort> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {PORT_COLUMNS} FROM ports WHERE id = ?1"),
              rusqlite::params![id],
              RawPort::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(raw.map(RawPort::into_port))
  }

  async fn count_port_items(&self, port_id: i64) -> Result<u64> {
    let count: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*) FROM items WHERE portid = ?1",
          rusqlite::params![port_id],
          |r| r.get(0),
        )?)
      })
      .await?;

    Ok(count.max(0) as u64)
  }

  async fn list_unplaced(&self, port_id: i64) -> Result<Vec<UnplacedItem>> {
    let raws: Vec<RawUnplaced> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {UNPLACED_COLUMNS} FROM items WHERE portid = ?1 ORDER BY id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![port_id], RawUnplaced::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(raws.into_iter().filter_map(RawUnplaced::into_unplaced).collect())
  }

  async fn delete_port_items(&self, port_id: i64) -> Result<u64> {
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM items WHERE portid = ?1",
          rusqlite::params![port_id],
        )?)
      })
      .await?;

    Ok(deleted as u64)
  }

  // ── Settings ──────────────────────────────────────────────────────────────

  async fn get_settings(&self) -> Result<Settings> {
    let pairs: Vec<(String, Option<String>)> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT key, value FROM settings")?;
        let rows = stmt
          .query_map([], |r| Ok((r.get(0)?, r.get(1)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(
      pairs
        .into_iter()
        .map(|(k, v)| (k, v.unwrap_or_default()))
        .collect(),
    )
  }

  async fn get_setting(&self, key: &str) -> Result<Option<String>> {
    let key = key.to_owned();

    let value: Option<Option<String>> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT value FROM settings WHERE key = ?1",
              rusqlite::params![key],
              |r| r.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    Ok(value.map(Option::unwrap_or_default))
  }

  async fn upsert_settings(&self, settings: Settings) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
          )?;
          for (key, value) in &settings {
            stmt.execute(rusqlite::params![key, value])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
