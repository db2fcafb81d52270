//! SQL schema for the AIS SQLite store.
//!
//! Executed once per opened handle. The column names match the relational
//! schema the downstream query tools read; each table adds an integer primary
//! key named `<table>_id`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Deduplicated on the full tuple; an MMSI-only signature has NULL in every
-- other column.
CREATE TABLE IF NOT EXISTS vessel_signature (
    vessel_signature_id INTEGER PRIMARY KEY,
    mmsi                INTEGER NOT NULL,
    imo                 INTEGER,
    call_sign           TEXT,
    name                TEXT,
    vessel_type_id      INTEGER
);

-- Deduplicated on the full tuple.
CREATE TABLE IF NOT EXISTS vessel_data (
    vessel_data_id INTEGER PRIMARY KEY,
    to_bow         INTEGER NOT NULL,
    to_stern       INTEGER NOT NULL,
    to_port        INTEGER NOT NULL,
    to_starboard   INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS voyage_data (
    voyage_data_id INTEGER PRIMARY KEY,
    draught        REAL NOT NULL,
    eta            TEXT,            -- ISO 8601 UTC or NULL
    destination    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS navigation_data (
    navigation_data_id    INTEGER PRIMARY KEY,
    speed_over_ground     REAL NOT NULL,
    course_over_ground    REAL NOT NULL,
    heading               REAL NOT NULL,
    rate_of_turn          REAL NOT NULL,
    nav_status_id         INTEGER NOT NULL,
    maneuver_indicator_id INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS geospatial_data (
    geospatial_data_id INTEGER PRIMARY KEY,
    coord              TEXT NOT NULL,    -- '(lon,lat)'
    accuracy           INTEGER NOT NULL  -- 0 | 1
);

CREATE TABLE IF NOT EXISTS message_data (
    message_data_id     INTEGER PRIMARY KEY,
    time_received       TEXT NOT NULL,
    is_valid_msg        INTEGER NOT NULL,
    is_multi_part       INTEGER NOT NULL,
    raw_nmea            TEXT NOT NULL,
    message_type_id     INTEGER NOT NULL,
    geospatial_data_id  INTEGER REFERENCES geospatial_data(geospatial_data_id),
    navigation_data_id  INTEGER REFERENCES navigation_data(navigation_data_id),
    voyage_data_id      INTEGER REFERENCES voyage_data(voyage_data_id),
    vessel_signature_id INTEGER REFERENCES vessel_signature(vessel_signature_id),
    vessel_data_id      INTEGER REFERENCES vessel_data(vessel_data_id)
);

CREATE INDEX IF NOT EXISTS vessel_signature_mmsi_idx ON vessel_signature(mmsi);
CREATE INDEX IF NOT EXISTS vessel_data_tuple_idx
    ON vessel_data(to_bow, to_stern, to_port, to_starboard);
CREATE INDEX IF NOT EXISTS message_data_received_idx ON message_data(time_received);

PRAGMA user_version = 1;
";
