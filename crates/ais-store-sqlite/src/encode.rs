//! Encoding and decoding helpers between Rust domain types and the plain
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, points as `(x,y)` text and
//! booleans as 0/1 integers. Floats are widened to `f64` for `REAL` columns.

use ais_core::{
  geo::Point,
  record::{
    GeospatialData, MessageData, MessageKeys, Mmsi, RowId, VesselSignature,
    VoyageData,
  },
};
use chrono::{DateTime, Utc};

use crate::{Error, Result};

// ─── DateTime<Utc>
// ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_bool(b: bool) -> i64 { i64::from(b) }

pub fn decode_bool(v: i64) -> bool { v != 0 }

pub fn encode_point(p: Point) -> String { p.to_string() }

pub fn decode_point(s: &str) -> Result<Point> { Ok(s.parse()?) }

pub fn decode_mmsi(v: i64) -> Result<Mmsi> {
  let value = u64::try_from(v)
    .map_err(|_| Error::InvalidValue(format!("negative mmsi: {v}")))?;
  Ok(Mmsi::new(value)?)
}

pub fn decode_key(v: Option<i64>) -> Option<RowId> { v.map(RowId) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `vessel_signature` row.
pub struct RawVesselSignature {
  pub mmsi:           i64,
  pub imo:            Option<u32>,
  pub call_sign:      Option<String>,
  pub name:           Option<String>,
  pub vessel_type_id: Option<i32>,
}

impl RawVesselSignature {
  pub fn into_signature(self) -> Result<VesselSignature> {
    Ok(VesselSignature {
      mmsi:           decode_mmsi(self.mmsi)?,
      imo:            self.imo,
      call_sign:      self.call_sign,
      name:           self.name,
      vessel_type_id: self.vessel_type_id,
    })
  }
}

/// Raw values read directly from a `voyage_data` row.
pub struct RawVoyageData {
  pub draught:     f64,
  pub eta:         Option<String>,
  pub destination: String,
}

impl RawVoyageData {
  pub fn into_voyage(self) -> Result<VoyageData> {
    Ok(VoyageData {
      draught:     self.draught as f32,
      eta:         self.eta.as_deref().map(decode_dt).transpose()?,
      destination: self.destination,
    })
  }
}

/// Raw values read directly from a `geospatial_data` row.
pub struct RawGeospatialData {
  pub coord:    String,
  pub accuracy: i64,
}

impl RawGeospatialData {
  pub fn into_geospatial(self) -> Result<GeospatialData> {
    Ok(GeospatialData {
      coord:    decode_point(&self.coord)?,
      accuracy: decode_bool(self.accuracy),
    })
  }
}

/// Raw values read directly from a `message_data` row.
pub struct RawMessageData {
  pub time_received:       String,
  pub is_valid_msg:        i64,
  pub is_multi_part:       i64,
  pub raw_nmea:            String,
  pub message_type_id:     i32,
  pub geospatial_data_id:  Option<i64>,
  pub navigation_data_id:  Option<i64>,
  pub voyage_data_id:      Option<i64>,
  pub vessel_signature_id: Option<i64>,
  pub vessel_data_id:      Option<i64>,
}

impl RawMessageData {
  pub fn into_message(self) -> Result<MessageData> {
    Ok(MessageData {
      time_received:   decode_dt(&self.time_received)?,
      is_valid_msg:    decode_bool(self.is_valid_msg),
      is_multi_part:   decode_bool(self.is_multi_part),
      raw_nmea:        self.raw_nmea,
      message_type_id: self.message_type_id,
      keys:            MessageKeys {
        vessel_data_id:      decode_key(self.vessel_data_id),
        vessel_signature_id: decode_key(self.vessel_signature_id),
        voyage_data_id:      decode_key(self.voyage_data_id),
        navigation_data_id:  decode_key(self.navigation_data_id),
        geospatial_data_id:  decode_key(self.geospatial_data_id),
      },
    })
  }
}
