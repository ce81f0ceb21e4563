//! SQL schema for the Kringum SQLite store.
//!
//! Executed once at connection startup. Databases created before items
//! belonged to ports lack some `items` columns; [`ITEM_COLUMN_MIGRATIONS`]
//! adds them in place.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS ports (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    country     TEXT,
    gps         TEXT,            -- 'lat,lon' or empty
    description TEXT,
    tag         TEXT
);

CREATE TABLE IF NOT EXISTS items (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    name      TEXT NOT NULL,
    story     TEXT,
    tag       TEXT,
    reference TEXT,
    source    TEXT,
    gps       TEXT,              -- 'lat,lon', empty or NULL when unplaced
    link      TEXT,
    portid    INTEGER REFERENCES ports(id),
    address   TEXT DEFAULT '',
    geocoded  INTEGER DEFAULT 0  -- 1 when gps came from geocoding address
);

CREATE TABLE IF NOT EXISTS settings (
    key   TEXT PRIMARY KEY,
    value TEXT
);
";

/// Columns added to `items` after the first release, as
/// `(column, ALTER statement)`. Applied when `PRAGMA table_info` lacks them.
pub const ITEM_COLUMN_MIGRATIONS: &[(&str, &str)] = &[
  ("portid", "ALTER TABLE items ADD COLUMN portid INTEGER REFERENCES ports(id)"),
  ("address", "ALTER TABLE items ADD COLUMN address TEXT DEFAULT ''"),
  ("geocoded", "ALTER TABLE items ADD COLUMN geocoded INTEGER DEFAULT 0"),
];

/// Created after the column migrations so `portid` is guaranteed to exist.
pub const INDEXES: &str = "
CREATE INDEX IF NOT EXISTS items_portid_idx ON items(portid);
";
