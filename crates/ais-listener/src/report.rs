//! [`DecodedReport`]: one line of decoder output, as JSON.
//!
//! The upstream decoder emits one object per line. Field groups the message
//! type does not carry are omitted or `null`:
//!
//! ```json
//! {"time_received":"2024-05-01T12:00:00Z","is_valid":true,"is_multi_part":false,
//!  "raw_nmea":"!AIVDM,1,1,,A,...","message_type_id":1,"mmsi":123456789,
//!  "navigation":{"speed_over_ground":12.5,"course_over_ground":271.2,
//!                "heading":270,"rate_of_turn":0,"nav_status_id":0,
//!                "maneuver_indicator_id":0},
//!  "position":{"latitude":48.1,"longitude":-122.7,"accuracy":true}}
//! ```

use ais_core::{
  message::{FieldGroup, MessageAccessor, Position, VesselIdentity},
  record::{Mmsi, NavigationData, VesselData, VoyageData},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// AIS "position not available" markers.
pub const LATITUDE_NOT_AVAILABLE: f64 = 91.0;
pub const LONGITUDE_NOT_AVAILABLE: f64 = 181.0;

fn default_true() -> bool { true }

#[derive(Debug, Clone, Deserialize)]
pub struct DecodedReport {
  /// Defaults to the time the line was parsed.
  #[serde(default = "Utc::now")]
  pub time_received:   DateTime<Utc>,
  #[serde(default = "default_true")]
  pub is_valid:        bool,
  #[serde(default)]
  pub is_multi_part:   bool,
  #[serde(default)]
  pub raw_nmea:        String,
  pub message_type_id: i32,
  #[serde(default)]
  pub mmsi:            Option<Mmsi>,
  #[serde(default)]
  pub identity:        Option<VesselIdentity>,
  #[serde(default)]
  pub dimensions:      Option<VesselData>,
  #[serde(default)]
  pub voyage:          Option<VoyageData>,
  #[serde(default)]
  pub navigation:      Option<NavigationData>,
  #[serde(default)]
  pub position:        Option<Position>,
}

impl DecodedReport {
  pub fn parse(line: &str) -> serde_json::Result<Self> {
    serde_json::from_str(line)
  }
}

impl MessageAccessor for DecodedReport {
  fn time_received(&self) -> DateTime<Utc> { self.time_received }

  fn is_valid(&self) -> bool { self.is_valid }

  fn is_multi_part(&self) -> bool { self.is_multi_part }

  fn raw_nmea(&self) -> &str { &self.raw_nmea }

  fn message_type_id(&self) -> i32 { self.message_type_id }

  fn mmsi(&self) -> FieldGroup<Mmsi> { self.mmsi.into() }

  fn vessel_identity(&self) -> FieldGroup<VesselIdentity> {
    self.identity.clone().into()
  }

  fn vessel_dimensions(&self) -> FieldGroup<VesselData> {
    self.dimensions.into()
  }

  fn voyage(&self) -> FieldGroup<VoyageData> { self.voyage.clone().into() }

  fn navigation(&self) -> FieldGroup<NavigationData> { self.navigation.into() }

  /// A report carrying the "not available" markers has no usable position
  /// group. Any other out-of-range value is passed through as reported.
  fn position(&self) -> FieldGroup<Position> {
    match self.position {
      Some(p)
        if p.latitude == LATITUDE_NOT_AVAILABLE
          || p.longitude == LONGITUDE_NOT_AVAILABLE =>
      {
        FieldGroup::NotApplicable
      }
      other => other.into(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const POSITION_REPORT: &str = r#"{
    "time_received": "2024-05-01T12:00:00Z",
    "raw_nmea": "!AIVDM,1,1,,A,15M67FC000G?ufbE`FepT@3n00Sa,0*5C",
    "message_type_id": 1,
    "mmsi": 123456789,
    "navigation": {
      "speed_over_ground": 12.5, "course_over_ground": 271.25,
      "heading": 270, "rate_of_turn": 0,
      "nav_status_id": 0, "maneuver_indicator_id": 0
    },
    "position": { "latitude": 48.125, "longitude": -122.75, "accuracy": true }
  }"#;

  #[test]
  fn absent_groups_are_not_applicable() {
    let report = DecodedReport::parse(POSITION_REPORT).unwrap();

    assert_eq!(report.mmsi(), FieldGroup::Applicable(Mmsi::new(123_456_789).unwrap()));
    assert!(report.navigation().is_applicable());
    assert!(report.position().is_applicable());
    assert!(!report.vessel_identity().is_applicable());
    assert!(!report.vessel_dimensions().is_applicable());
    assert!(!report.voyage().is_applicable());
    assert!(report.is_valid());
    assert!(!report.is_multi_part());
  }

  #[test]
  fn null_group_is_not_applicable() {
    let report =
      DecodedReport::parse(r#"{"message_type_id":5,"mmsi":1,"voyage":null}"#)
        .unwrap();
    assert!(!report.voyage().is_applicable());
  }

  #[test]
  fn identity_fields_may_be_empty_while_the_group_is_present() {
    let report = DecodedReport::parse(
      r#"{"message_type_id":24,"mmsi":1,"identity":{"name":"SEA DOG"}}"#,
    )
    .unwrap();

    let FieldGroup::Applicable(identity) = report.vessel_identity() else {
      panic!("identity group should be present");
    };
    assert_eq!(identity.name.as_deref(), Some("SEA DOG"));
    assert_eq!(identity.imo, None);
    assert_eq!(identity.call_sign, None);
  }

  #[test]
  fn unavailable_position_sentinel_is_not_applicable() {
    let report = DecodedReport::parse(
      r#"{"message_type_id":1,"mmsi":1,
          "position":{"latitude":91,"longitude":181,"accuracy":false}}"#,
    )
    .unwrap();
    assert!(!report.position().is_applicable());
  }

  #[test]
  fn other_out_of_range_positions_pass_through() {
    let report = DecodedReport::parse(
      r#"{"message_type_id":1,"mmsi":1,"position":{"latitude":-95,"longitude":10}}"#,
    )
    .unwrap();
    assert!(report.position().is_applicable());
  }

  #[test]
  fn rejects_oversized_mmsi_and_missing_type() {
    assert!(
      DecodedReport::parse(r#"{"message_type_id":1,"mmsi":1000000000}"#).is_err()
    );
    assert!(DecodedReport::parse(r#"{"mmsi":1}"#).is_err());
    assert!(DecodedReport::parse("not json").is_err());
  }
}
