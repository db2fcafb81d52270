//! [`SqliteConnection`]: the SQLite implementation of [`Connection`].

use std::path::{Path, PathBuf};

use ais_core::{
  connection::Connection,
  record::{
    GeospatialData, MessageData, Mmsi, NavigationData, Record, RowId, Table,
    VesselData, VesselSignature, VoyageData,
  },
};
use rusqlite::OptionalExtension as _;

use crate::{
  encode::{
    encode_bool, encode_dt, encode_point, RawGeospatialData, RawMessageData,
    RawVesselSignature, RawVoyageData,
  },
  schema::SCHEMA,
  Error, Result,
};

// ─── Connection ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Location {
  Memory,
  File(PathBuf),
}

/// A handle to an AIS store backed by a single SQLite database.
///
/// The handle can be dropped (explicitly via [`close`](Self::close), or when
/// the background thread reports the connection closed) and is reopened by
/// [`Connection::connect_if_dropped`]. Reopening an in-memory store yields a
/// fresh, empty database.
pub struct SqliteConnection {
  location: Location,
  conn:     Option<tokio_rusqlite::Connection>,
}

impl SqliteConnection {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let location = Location::File(path.as_ref().to_path_buf());
    let conn = Self::connect(&location).await?;
    Ok(Self { location, conn: Some(conn) })
  }

  /// Open an in-memory store, used by tests.
  pub async fn open_in_memory() -> Result<Self> {
    let location = Location::Memory;
    let conn = Self::connect(&location).await?;
    Ok(Self { location, conn: Some(conn) })
  }

  async fn connect(location: &Location) -> Result<tokio_rusqlite::Connection> {
    let conn = match location {
      Location::Memory => tokio_rusqlite::Connection::open_in_memory().await?,
      Location::File(path) => tokio_rusqlite::Connection::open(path).await?,
    };
    conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(conn)
  }

  pub fn is_connected(&self) -> bool { self.conn.is_some() }

  /// Drop the underlying handle. Any open transaction is discarded.
  pub async fn close(&mut self) -> Result<()> {
    if let Some(conn) = self.conn.take() {
      conn.close().await?;
    }
    Ok(())
  }

  /// Run `f` on the database thread. A handle the background thread reports
  /// as closed is dropped so the next `connect_if_dropped` reopens it.
  async fn call<F, R>(&mut self, f: F) -> Result<R>
  where
    F: FnOnce(&mut rusqlite::Connection) -> tokio_rusqlite::Result<R>
      + Send
      + 'static,
    R: Send + 'static,
  {
    let conn = self.conn.as_ref().ok_or(Error::NotConnected)?;
    let result = conn.call(f).await;
    if matches!(result, Err(tokio_rusqlite::Error::ConnectionClosed)) {
      tracing::warn!("sqlite handle closed underneath us; dropping it");
      self.conn = None;
    }
    Ok(result?)
  }

  async fn execute_batch(&mut self, sql: &'static str) -> Result<()> {
    self
      .call(move |conn| {
        conn.execute_batch(sql)?;
        Ok(())
      })
      .await
  }

  // ── Read-back ─────────────────────────────────────────────────────────

  pub async fn count_rows(&mut self, table: Table) -> Result<u64> {
    let sql = format!("SELECT COUNT(*) FROM {}", table.name());
    let count: i64 = self
      .call(move |conn| Ok(conn.query_row(&sql, [], |r| r.get(0))?))
      .await?;
    u64::try_from(count).map_err(|_| Error::InvalidValue(count.to_string()))
  }

  pub async fn vessel_signature(
    &mut self,
    id: RowId,
  ) -> Result<Option<VesselSignature>> {
    let raw: Option<RawVesselSignature> = self
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT mmsi, imo, call_sign, name, vessel_type_id
               FROM vessel_signature WHERE vessel_signature_id = ?1",
              rusqlite::params![id.0],
              |row| {
                Ok(RawVesselSignature {
                  mmsi:           row.get(0)?,
                  imo:            row.get(1)?,
                  call_sign:      row.get(2)?,
                  name:           row.get(3)?,
                  vessel_type_id: row.get(4)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawVesselSignature::into_signature).transpose()
  }

  pub async fn vessel_data(&mut self, id: RowId) -> Result<Option<VesselData>> {
    self
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT to_bow, to_stern, to_port, to_starboard
               FROM vessel_data WHERE vessel_data_id = ?1",
              rusqlite::params![id.0],
              |row| {
                Ok(VesselData {
                  to_bow:       row.get(0)?,
                  to_stern:     row.get(1)?,
                  to_port:      row.get(2)?,
                  to_starboard: row.get(3)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await
  }

  pub async fn voyage_data(&mut self, id: RowId) -> Result<Option<VoyageData>> {
    let raw: Option<RawVoyageData> = self
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT draught, eta, destination
               FROM voyage_data WHERE voyage_data_id = ?1",
              rusqlite::params![id.0],
              |row| {
                Ok(RawVoyageData {
                  draught:     row.get(0)?,
                  eta:         row.get(1)?,
                  destination: row.get(2)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawVoyageData::into_voyage).transpose()
  }

  pub async fn navigation_data(
    &mut self,
    id: RowId,
  ) -> Result<Option<NavigationData>> {
    self
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT speed_over_ground, course_over_ground, heading,
                      rate_of_turn, nav_status_id, maneuver_indicator_id
               FROM navigation_data WHERE navigation_data_id = ?1",
              rusqlite::params![id.0],
              |row| {
                Ok(NavigationData {
                  speed_over_ground:     row.get::<_, f64>(0)? as f32,
                  course_over_ground:    row.get::<_, f64>(1)? as f32,
                  heading:               row.get::<_, f64>(2)? as f32,
                  rate_of_turn:          row.get::<_, f64>(3)? as f32,
                  nav_status_id:         row.get(4)?,
                  maneuver_indicator_id: row.get(5)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await
  }

  pub async fn geospatial_data(
    &mut self,
    id: RowId,
  ) -> Result<Option<GeospatialData>> {
    let raw: Option<RawGeospatialData> = self
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT coord, accuracy
               FROM geospatial_data WHERE geospatial_data_id = ?1",
              rusqlite::params![id.0],
              |row| {
                Ok(RawGeospatialData {
                  coord:    row.get(0)?,
                  accuracy: row.get(1)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawGeospatialData::into_geospatial).transpose()
  }

  pub async fn message_data(&mut self, id: RowId) -> Result<Option<MessageData>> {
    let raw: Option<RawMessageData> = self
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT time_received, is_valid_msg, is_multi_part, raw_nmea,
                      message_type_id, geospatial_data_id, navigation_data_id,
                      voyage_data_id, vessel_signature_id, vessel_data_id
               FROM message_data WHERE message_data_id = ?1",
              rusqlite::params![id.0],
              |row| {
                Ok(RawMessageData {
                  time_received:       row.get(0)?,
                  is_valid_msg:        row.get(1)?,
                  is_multi_part:       row.get(2)?,
                  raw_nmea:            row.get(3)?,
                  message_type_id:     row.get(4)?,
                  geospatial_data_id:  row.get(5)?,
                  navigation_data_id:  row.get(6)?,
                  voyage_data_id:      row.get(7)?,
                  vessel_signature_id: row.get(8)?,
                  vessel_data_id:      row.get(9)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawMessageData::into_message).transpose()
  }
}

// ─── Inserts ─────────────────────────────────────────────────────────────────

/// Insert `record` and return the key from its `RETURNING` clause.
fn insert_record(
  conn: &rusqlite::Connection,
  record: &Record,
) -> rusqlite::Result<Option<i64>> {
  match record {
    Record::VesselSignature(sig) => conn
      .query_row(
        "INSERT INTO vessel_signature (mmsi, imo, call_sign, name, vessel_type_id)
         VALUES (?1, ?2, ?3, ?4, ?5)
         RETURNING vessel_signature_id",
        rusqlite::params![
          sig.mmsi.get(),
          sig.imo,
          sig.call_sign,
          sig.name,
          sig.vessel_type_id,
        ],
        |r| r.get(0),
      )
      .optional(),
    Record::VesselData(hull) => conn
      .query_row(
        "INSERT INTO vessel_data (to_bow, to_stern, to_port, to_starboard)
         VALUES (?1, ?2, ?3, ?4)
         RETURNING vessel_data_id",
        rusqlite::params![
          hull.to_bow,
          hull.to_stern,
          hull.to_port,
          hull.to_starboard,
        ],
        |r| r.get(0),
      )
      .optional(),
    Record::VoyageData(voyage) => conn
      .query_row(
        "INSERT INTO voyage_data (draught, eta, destination)
         VALUES (?1, ?2, ?3)
         RETURNING voyage_data_id",
        rusqlite::params![
          f64::from(voyage.draught),
          voyage.eta.map(encode_dt),
          voyage.destination,
        ],
        |r| r.get(0),
      )
      .optional(),
    Record::NavigationData(nav) => conn
      .query_row(
        "INSERT INTO navigation_data (
           speed_over_ground, course_over_ground, heading, rate_of_turn,
           nav_status_id, maneuver_indicator_id
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         RETURNING navigation_data_id",
        rusqlite::params![
          f64::from(nav.speed_over_ground),
          f64::from(nav.course_over_ground),
          f64::from(nav.heading),
          f64::from(nav.rate_of_turn),
          nav.nav_status_id,
          nav.maneuver_indicator_id,
        ],
        |r| r.get(0),
      )
      .optional(),
    Record::GeospatialData(geo) => conn
      .query_row(
        "INSERT INTO geospatial_data (coord, accuracy)
         VALUES (?1, ?2)
         RETURNING geospatial_data_id",
        rusqlite::params![encode_point(geo.coord), encode_bool(geo.accuracy)],
        |r| r.get(0),
      )
      .optional(),
    Record::MessageData(msg) => conn
      .query_row(
        "INSERT INTO message_data (
           time_received, is_valid_msg, is_multi_part, raw_nmea,
           message_type_id, geospatial_data_id, navigation_data_id,
           voyage_data_id, vessel_signature_id, vessel_data_id
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
         RETURNING message_data_id",
        rusqlite::params![
          encode_dt(msg.time_received),
          encode_bool(msg.is_valid_msg),
          encode_bool(msg.is_multi_part),
          msg.raw_nmea,
          msg.message_type_id,
          msg.keys.geospatial_data_id.map(|k| k.0),
          msg.keys.navigation_data_id.map(|k| k.0),
          msg.keys.voyage_data_id.map(|k| k.0),
          msg.keys.vessel_signature_id.map(|k| k.0),
          msg.keys.vessel_data_id.map(|k| k.0),
        ],
        |r| r.get(0),
      )
      .optional(),
  }
}

// ─── Connection impl ─────────────────────────────────────────────────────────

impl Connection for SqliteConnection {
  type Error = Error;

  // ── Lifecycle ─────────────────────────────────────────────────────────────

  async fn connect_if_dropped(&mut self) -> Result<()> {
    if self.conn.is_none() {
      tracing::info!(location = ?self.location, "reopening sqlite store");
      self.conn = Some(Self::connect(&self.location).await?);
    }
    Ok(())
  }

  async fn begin_transaction(&mut self) -> Result<()> {
    self.execute_batch("BEGIN IMMEDIATE").await
  }

  async fn commit_transaction(&mut self) -> Result<()> {
    self.execute_batch("COMMIT").await
  }

  async fn roll_back_transaction(&mut self) -> Result<()> {
    self.execute_batch("ROLLBACK").await
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn insert_one_record(&mut self, record: Record) -> Result<Option<RowId>> {
    let key = self
      .call(move |conn| Ok(insert_record(conn, &record)?))
      .await?;
    Ok(key.map(RowId))
  }

  // ── Dedup lookups ─────────────────────────────────────────────────────────

  async fn find_vessel_signature(
    &mut self,
    signature: &VesselSignature,
  ) -> Result<Option<RowId>> {
    let sig = signature.clone();
    let key: Option<i64> = self
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT vessel_signature_id FROM vessel_signature
               WHERE mmsi = ?1
                 AND imo IS ?2
                 AND call_sign IS ?3
                 AND name IS ?4
                 AND vessel_type_id IS ?5
               ORDER BY vessel_signature_id
               LIMIT 1",
              rusqlite::params![
                sig.mmsi.get(),
                sig.imo,
                sig.call_sign,
                sig.name,
                sig.vessel_type_id,
              ],
              |r| r.get(0),
            )
            .optional()?,
        )
      })
      .await?;
    Ok(key.map(RowId))
  }

  async fn find_vessel_signature_by_mmsi(
    &mut self,
    mmsi: Mmsi,
  ) -> Result<Option<RowId>> {
    let key: Option<i64> = self
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT vessel_signature_id FROM vessel_signature
               WHERE mmsi = ?1
               ORDER BY vessel_signature_id
               LIMIT 1",
              rusqlite::params![mmsi.get()],
              |r| r.get(0),
            )
            .optional()?,
        )
      })
      .await?;
    Ok(key.map(RowId))
  }

  async fn find_vessel_data(&mut self, hull: &VesselData) -> Result<Option<RowId>> {
    let hull = *hull;
    let key: Option<i64> = self
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT vessel_data_id FROM vessel_data
               WHERE to_bow = ?1
                 AND to_stern = ?2
                 AND to_port = ?3
                 AND to_starboard = ?4
               ORDER BY vessel_data_id
               LIMIT 1",
              rusqlite::params![
                hull.to_bow,
                hull.to_stern,
                hull.to_port,
                hull.to_starboard,
              ],
              |r| r.get(0),
            )
            .optional()?,
        )
      })
      .await?;
    Ok(key.map(RowId))
  }
}
