//! Row types for the star schema.
//!
//! One fact table (`message_data`) references five dimension tables. Two of
//! them (`vessel_signature`, `vessel_data`) are deduplicated on their value
//! tuple; the other three receive a fresh row per message.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, geo::Point, message::VesselIdentity};

// ─── Keys ────────────────────────────────────────────────────────────────────

/// Primary key of a row in any of the six tables.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RowId(pub i64);

impl fmt::Display for RowId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

/// Maritime Mobile Service Identity: the station identifier of a vessel.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u64", into = "u32")]
pub struct Mmsi(u32);

impl Mmsi {
  pub const MAX: u32 = 999_999_999;

  pub fn new(value: u64) -> Result<Self> {
    match u32::try_from(value) {
      Ok(v) if v <= Self::MAX => Ok(Self(v)),
      _ => Err(Error::InvalidMmsi(value)),
    }
  }

  pub fn get(self) -> u32 { self.0 }
}

impl TryFrom<u64> for Mmsi {
  type Error = Error;

  fn try_from(value: u64) -> Result<Self> { Self::new(value) }
}

impl From<Mmsi> for u32 {
  fn from(mmsi: Mmsi) -> u32 { mmsi.0 }
}

impl fmt::Display for Mmsi {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:09}", self.0)
  }
}

// ─── Tables ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
  VesselSignature,
  VesselData,
  VoyageData,
  NavigationData,
  GeospatialData,
  MessageData,
}

impl Table {
  pub const ALL: [Table; 6] = [
    Table::VesselSignature,
    Table::VesselData,
    Table::VoyageData,
    Table::NavigationData,
    Table::GeospatialData,
    Table::MessageData,
  ];

  pub fn name(self) -> &'static str {
    match self {
      Table::VesselSignature => "vessel_signature",
      Table::VesselData => "vessel_data",
      Table::VoyageData => "voyage_data",
      Table::NavigationData => "navigation_data",
      Table::GeospatialData => "geospatial_data",
      Table::MessageData => "message_data",
    }
  }
}

impl fmt::Display for Table {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

// ─── Dimension rows ──────────────────────────────────────────────────────────

/// Identity attributes of a vessel. Deduplicated on the full tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VesselSignature {
  pub mmsi:           Mmsi,
  pub imo:            Option<u32>,
  pub call_sign:      Option<String>,
  pub name:           Option<String>,
  pub vessel_type_id: Option<i32>,
}

impl VesselSignature {
  pub fn new(mmsi: Mmsi, identity: VesselIdentity) -> Self {
    Self {
      mmsi,
      imo: identity.imo,
      call_sign: identity.call_sign,
      name: identity.name,
      vessel_type_id: identity.vessel_type_id,
    }
  }

  /// The degraded signature written when a message carries only its MMSI.
  pub fn mmsi_only(mmsi: Mmsi) -> Self {
    Self {
      mmsi,
      imo: None,
      call_sign: None,
      name: None,
      vessel_type_id: None,
    }
  }
}

/// Hull geometry: distances in metres from the position reference point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VesselData {
  pub to_bow:       i32,
  pub to_stern:     i32,
  pub to_port:      i32,
  pub to_starboard: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoyageData {
  pub draught:     f32,
  #[serde(default)]
  pub eta:         Option<DateTime<Utc>>,
  pub destination: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NavigationData {
  pub speed_over_ground:     f32,
  pub course_over_ground:    f32,
  pub heading:               f32,
  pub rate_of_turn:          f32,
  pub nav_status_id:         i32,
  pub maneuver_indicator_id: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeospatialData {
  pub coord:    Point,
  pub accuracy: bool,
}

// ─── Fact row ────────────────────────────────────────────────────────────────

/// Dimension keys resolved while processing a single message.
///
/// `None` means the dimension was not applicable to the message (or, for the
/// vessel signature, could not be resolved) and is written as NULL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageKeys {
  pub vessel_data_id:      Option<RowId>,
  pub vessel_signature_id: Option<RowId>,
  pub voyage_data_id:      Option<RowId>,
  pub navigation_data_id:  Option<RowId>,
  pub geospatial_data_id:  Option<RowId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageData {
  pub time_received:   DateTime<Utc>,
  pub is_valid_msg:    bool,
  pub is_multi_part:   bool,
  pub raw_nmea:        String,
  pub message_type_id: i32,
  pub keys:            MessageKeys,
}

// ─── Insertable record ───────────────────────────────────────────────────────

/// A single row handed to [`Connection::insert_one_record`].
///
/// [`Connection::insert_one_record`]: crate::connection::Connection::insert_one_record
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
  VesselSignature(VesselSignature),
  VesselData(VesselData),
  VoyageData(VoyageData),
  NavigationData(NavigationData),
  GeospatialData(GeospatialData),
  MessageData(MessageData),
}

impl Record {
  pub fn table(&self) -> Table {
    match self {
      Record::VesselSignature(_) => Table::VesselSignature,
      Record::VesselData(_) => Table::VesselData,
      Record::VoyageData(_) => Table::VoyageData,
      Record::NavigationData(_) => Table::NavigationData,
      Record::GeospatialData(_) => Table::GeospatialData,
      Record::MessageData(_) => Table::MessageData,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn mmsi_bounds() {
    assert_eq!(Mmsi::new(123_456_789).unwrap().get(), 123_456_789);
    assert!(Mmsi::new(1_000_000_000).is_err());
    assert!(Mmsi::new(u64::MAX).is_err());
  }

  #[test]
  fn mmsi_displays_zero_padded() {
    assert_eq!(Mmsi::new(2_579_999).unwrap().to_string(), "002579999");
  }

  #[test]
  fn record_reports_its_table() {
    let record = Record::VesselSignature(VesselSignature::mmsi_only(
      Mmsi::new(123_456_789).unwrap(),
    ));
    assert_eq!(record.table(), Table::VesselSignature);
    assert_eq!(record.table().name(), "vessel_signature");
  }
}
